use serde::{Deserialize, Serialize};
use strum::Display;

/// One connected client as reported by the backend.
///
/// Replaced wholesale on every poll cycle -- no client-side identity
/// persists across polls beyond `ip` equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Unique key: string form of the client's network address.
    pub ip: String,
    /// Optional operator-assigned display label.
    pub friendly_name: Option<String>,
    /// Optional device glyph.
    pub icon: Option<String>,
    /// Integer priority; rendered via three bands, see [`PriorityClass`].
    pub priority: i64,
    /// Current throughput in Mbps.
    pub usage: f64,
    /// Granted throughput in Mbps.
    pub allocated: f64,
    /// Usage as a percentage; unbounded above 100 by design.
    pub usage_percent: f64,
}

impl ClientRecord {
    /// Display name: friendly label if set, otherwise the address.
    pub fn display_name(&self) -> &str {
        self.friendly_name.as_deref().unwrap_or(&self.ip)
    }

    pub fn priority_class(&self) -> PriorityClass {
        PriorityClass::from_priority(self.priority)
    }

    /// Bar width for the usage gauge, clamped to [0, 100]. The numeric
    /// label shown next to the bar stays the raw, unclamped
    /// [`usage_percent`](Self::usage_percent).
    pub fn usage_bar_percent(&self) -> f64 {
        self.usage_percent.clamp(0.0, 100.0)
    }
}

/// Priority band derived from the integer priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PriorityClass {
    Low,
    Medium,
    High,
}

impl PriorityClass {
    /// Fixed thresholds: `p >= 7` is high, `4 <= p < 7` is medium,
    /// anything below 4 is low.
    pub fn from_priority(priority: i64) -> Self {
        if priority >= 7 {
            Self::High
        } else if priority >= 4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_bands_have_fixed_thresholds() {
        assert_eq!(PriorityClass::from_priority(10), PriorityClass::High);
        assert_eq!(PriorityClass::from_priority(7), PriorityClass::High);
        assert_eq!(PriorityClass::from_priority(6), PriorityClass::Medium);
        assert_eq!(PriorityClass::from_priority(4), PriorityClass::Medium);
        assert_eq!(PriorityClass::from_priority(3), PriorityClass::Low);
        assert_eq!(PriorityClass::from_priority(0), PriorityClass::Low);
        assert_eq!(PriorityClass::from_priority(-2), PriorityClass::Low);
    }

    #[test]
    fn usage_bar_clamps_but_label_does_not() {
        let mut record = ClientRecord {
            ip: "10.0.0.5".into(),
            friendly_name: None,
            icon: None,
            priority: 5,
            usage: 3.0,
            allocated: 5.0,
            usage_percent: 60.0,
        };
        assert!((record.usage_bar_percent() - 60.0).abs() < f64::EPSILON);

        record.usage_percent = 240.0;
        assert!((record.usage_bar_percent() - 100.0).abs() < f64::EPSILON);
        // The raw value is untouched -- rendering prints it as-is.
        assert!((record.usage_percent - 240.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_name_falls_back_to_ip() {
        let record = ClientRecord {
            ip: "10.0.0.9".into(),
            friendly_name: None,
            icon: None,
            priority: 1,
            usage: 0.0,
            allocated: 0.0,
            usage_percent: 0.0,
        };
        assert_eq!(record.display_name(), "10.0.0.9");
    }
}
