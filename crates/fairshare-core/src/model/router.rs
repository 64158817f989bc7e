use serde::{Deserialize, Serialize};
use strum::Display;

/// Operating mode reported by the enforcement layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum RouterMode {
    Hotspot,
    Router,
    Simulation,
    #[default]
    Unknown,
}

impl RouterMode {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "hotspot" => Self::Hotspot,
            "router" => Self::Router,
            "simulation" => Self::Simulation,
            _ => Self::Unknown,
        }
    }
}

/// Gateway details for the router screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterInfo {
    pub ip: Option<String>,
    pub kind: String,
    pub mode: RouterMode,
    pub status: String,
    /// Whether the process has the privileges needed to enforce limits.
    pub admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parsing_is_case_insensitive() {
        assert_eq!(RouterMode::parse("Hotspot"), RouterMode::Hotspot);
        assert_eq!(RouterMode::parse("ROUTER"), RouterMode::Router);
        assert_eq!(RouterMode::parse("simulation"), RouterMode::Simulation);
        assert_eq!(RouterMode::parse("bridge"), RouterMode::Unknown);
    }
}
