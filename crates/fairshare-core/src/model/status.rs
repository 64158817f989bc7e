use serde::{Deserialize, Serialize};

/// Aggregate throughput counters for the whole link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    /// Interface upload rate in KB/s.
    pub sent: f64,
    /// Interface download rate in KB/s.
    pub recv: f64,
}

/// Headline figures shown on the overview screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub total_clients: u64,
    pub network_stats: NetworkStats,
    /// Configured total bandwidth cap in Mbps.
    pub total_bandwidth: f64,
}
