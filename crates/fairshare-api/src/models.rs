// Wire-format DTOs for the backend's `/api` responses.
//
// These mirror the JSON the backend emits; `fairshare-core` converts
// them into domain types. Optional and missing fields are tolerated
// with serde defaults -- a sparse backend response must never be fatal.

use serde::Deserialize;

/// `GET /api/status`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusDto {
    #[serde(default)]
    pub total_clients: u64,
    #[serde(default)]
    pub network_stats: NetworkStatsDto,
    #[serde(default)]
    pub total_bandwidth: f64,
}

/// Instantaneous interface throughput in KB/s.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkStatsDto {
    #[serde(default)]
    pub sent: f64,
    #[serde(default)]
    pub recv: f64,
}

/// One entry of `GET /api/clients`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientDto {
    pub ip: String,
    pub friendly_name: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub usage: f64,
    #[serde(default)]
    pub allocated: f64,
    #[serde(default)]
    pub usage_percent: f64,
}

/// `GET /api/history` -- three parallel series, index i across all
/// three refers to the same sample instant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryDto {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub upload: Vec<f64>,
    #[serde(default)]
    pub download: Vec<f64>,
}

/// `GET /api/device/{ip}/label`
#[derive(Debug, Clone, Deserialize)]
pub struct LabelDto {
    pub label: Option<String>,
}

/// `GET /api/router/info`
#[derive(Debug, Clone, Deserialize)]
pub struct RouterInfoDto {
    pub ip: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mode: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

/// Outcome of `POST /api/router/apply_limits`.
#[derive(Debug, Clone)]
pub struct ApplyLimitsOutcome {
    pub message: String,
    pub applied: u64,
    pub total: u64,
}

/// Outcome of `POST /api/qos/toggle`.
#[derive(Debug, Clone)]
pub struct QosToggleOutcome {
    pub enabled: bool,
    pub message: String,
}
