// Monitor configuration.

use std::time::Duration;

use fairshare_api::transport::TransportConfig;
use url::Url;

/// Default poll cadence for the three telemetry reads.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a [`Monitor`](crate::Monitor).
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend root URL (e.g. `http://192.168.1.10:5000`).
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Cadence of the telemetry poll cycle. Ticks are interval-based,
    /// not completion-based: a slow request never delays the next tick.
    pub poll_interval: Duration,
}

impl MonitorConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
        }
    }
}
