// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The
// monitor routes each variant to the matching backend endpoint and
// returns one `CommandOutcome`, so callers handle success and
// rejection the same way for every mutation.

use crate::error::CoreError;
use crate::model::PriorityClass;

/// All possible write operations against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the total bandwidth cap in Mbps.
    SetBandwidthCap { mbps: u64 },
    /// Set one client's priority.
    SetPriority { ip: String, priority: i64 },
    /// Assign or replace a client's friendly label.
    RenameDevice { ip: String, label: String },
    /// Set the usage-alert threshold percentage.
    SetAlertThreshold { percent: f64 },
    /// Push every client's configured limit to the gateway.
    ApplyRouterLimits,
    /// Remove all enforced limits from the gateway.
    ClearRouterLimits,
    /// Mirror one client's priority onto the gateway.
    SyncRouterPriority { ip: String, priority: i64 },
    /// Flip QoS enforcement on or off.
    ToggleQos,
}

impl Command {
    /// Short human-readable description, used in log lines and
    /// failure toasts.
    pub fn describe(&self) -> String {
        match self {
            Self::SetBandwidthCap { mbps } => format!("set bandwidth cap to {mbps} Mbps"),
            Self::SetPriority { ip, priority } => {
                let class = PriorityClass::from_priority(*priority);
                format!("set priority of {ip} to {priority} ({class})")
            }
            Self::RenameDevice { ip, label } => format!("rename {ip} to {label:?}"),
            Self::SetAlertThreshold { percent } => {
                format!("set alert threshold to {percent:.0}%")
            }
            Self::ApplyRouterLimits => "apply limits to router".into(),
            Self::ClearRouterLimits => "clear router limits".into(),
            Self::SyncRouterPriority { ip, .. } => format!("sync priority of {ip} to router"),
            Self::ToggleQos => "toggle QoS".into(),
        }
    }

    /// Whether executing this command should be followed by a client
    /// list refresh (the backend recomputes allocations on these).
    pub(crate) fn refreshes_clients(&self) -> bool {
        matches!(
            self,
            Self::SetBandwidthCap { .. }
                | Self::SetPriority { .. }
                | Self::RenameDevice { .. }
        )
    }

    /// Whether executing this command should be followed by a router
    /// info refresh.
    pub(crate) fn refreshes_router(&self) -> bool {
        matches!(
            self,
            Self::ApplyRouterLimits | Self::ClearRouterLimits | Self::ToggleQos
        )
    }
}

/// What a successfully acknowledged command reported back.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Plain acknowledgement with no extra payload.
    Ok,
    /// Router limit application with per-client counts.
    RouterLimits {
        message: String,
        applied: u64,
        total: u64,
    },
    /// QoS toggle reporting the new enforcement state.
    Qos { enabled: bool, message: String },
}

impl CommandOutcome {
    /// Toast text for the outcome, falling back to a generic line for
    /// commands whose acknowledgement carries no message.
    pub fn message(&self, command: &Command) -> String {
        match self {
            Self::Ok => format!("done: {}", command.describe()),
            Self::RouterLimits {
                message,
                applied,
                total,
            } => {
                if message.is_empty() {
                    format!("applied limits to {applied} of {total} clients")
                } else {
                    message.clone()
                }
            }
            Self::Qos { enabled, message } => {
                if message.is_empty() {
                    format!("QoS {}", if *enabled { "enabled" } else { "disabled" })
                } else {
                    message.clone()
                }
            }
        }
    }
}

/// Validate command parameters before anything is sent.
///
/// The backend validates too; this catches the obviously malformed
/// cases locally so the UI can refuse them without a round trip.
pub(crate) fn validate(command: &Command) -> Result<(), CoreError> {
    match command {
        Command::SetBandwidthCap { mbps } if *mbps == 0 => Err(CoreError::Config {
            message: "bandwidth cap must be at least 1 Mbps".into(),
        }),
        Command::SetAlertThreshold { percent }
            if !(0.0..=100.0).contains(percent) =>
        {
            Err(CoreError::Config {
                message: format!("alert threshold {percent} is outside 0-100"),
            })
        }
        Command::RenameDevice { label, .. } if label.trim().is_empty() => {
            Err(CoreError::Config {
                message: "device label cannot be empty".into(),
            })
        }
        _ => Ok(()),
    }
}
