// Router control endpoints
//
// Enforcement lives on the router/hotspot side of the backend; this
// client only relays apply/clear/sync requests and reads back status.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApplyLimitsOutcome, RouterInfoDto};

impl ApiClient {
    /// Fetch router connectivity and control-mode info.
    ///
    /// `GET /api/router/info`
    pub async fn router_info(&self) -> Result<RouterInfoDto, Error> {
        let url = self.api_url("router/info")?;
        debug!("fetching router info");
        self.get(url).await
    }

    /// Push the current bandwidth limits to the router.
    ///
    /// `POST /api/router/apply_limits` (no body). The backend reports
    /// how many devices it managed to configure.
    pub async fn apply_router_limits(&self) -> Result<ApplyLimitsOutcome, Error> {
        let url = self.api_url("router/apply_limits")?;
        debug!("applying router limits");
        let value = self.post_ack(url, None::<&Value>).await?;
        Ok(ApplyLimitsOutcome {
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Limits applied")
                .to_owned(),
            applied: value.get("applied").and_then(Value::as_u64).unwrap_or(0),
            total: value.get("total").and_then(Value::as_u64).unwrap_or(0),
        })
    }

    /// Remove all bandwidth limits from the router.
    ///
    /// `POST /api/router/clear_limits` (no body)
    pub async fn clear_router_limits(&self) -> Result<(), Error> {
        let url = self.api_url("router/clear_limits")?;
        debug!("clearing router limits");
        self.post_ack(url, None::<&Value>).await?;
        Ok(())
    }

    /// Sync a single client's priority to the router.
    ///
    /// `POST /api/router/set_priority/{ip}` with `{"priority": <int>}`
    pub async fn set_router_priority(&self, ip: &str, priority: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("router/set_priority/{ip}"))?;
        debug!(ip, priority, "syncing priority to router");
        self.post_ack(url, Some(&json!({ "priority": priority })))
            .await?;
        Ok(())
    }
}
