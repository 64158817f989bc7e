// Shared transport configuration for building reqwest::Client instances.
//
// The backend is a plain-HTTP service on the local network, so there is
// no TLS or cookie plumbing here -- just timeout and user-agent settings
// shared by every ApiClient.

use std::time::Duration;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("fairshare/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}
