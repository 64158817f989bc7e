// Read-side telemetry endpoints
//
// The three polled resources: status, client list, and traffic history.
// Each is fetched independently by the core poller; failures here are
// isolated per concern and never merged across resources.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ClientDto, HistoryDto, StatusDto};

impl ApiClient {
    /// Fetch the backend status summary.
    ///
    /// `GET /api/status`
    pub async fn get_status(&self) -> Result<StatusDto, Error> {
        let url = self.api_url("status")?;
        debug!("fetching status");
        self.get(url).await
    }

    /// Fetch the current client list.
    ///
    /// `GET /api/clients`
    pub async fn list_clients(&self) -> Result<Vec<ClientDto>, Error> {
        let url = self.api_url("clients")?;
        debug!("fetching client list");
        self.get(url).await
    }

    /// Fetch the rolling traffic history series.
    ///
    /// `GET /api/history`
    pub async fn get_history(&self) -> Result<HistoryDto, Error> {
        let url = self.api_url("history")?;
        debug!("fetching traffic history");
        self.get(url).await
    }
}
