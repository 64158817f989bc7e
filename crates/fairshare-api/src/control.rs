// Mutation endpoints: bandwidth cap, per-client priority, device labels,
// alert threshold, and the QoS auto-adjustment toggle.
//
// All mutations go through `post_ack`, so every one of them shares the
// same success contract regardless of whether the backend replies with
// a bare HTTP 200 or a `{success: bool}` body.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{LabelDto, QosToggleOutcome};

impl ApiClient {
    /// Set the total bandwidth cap in Mbps.
    ///
    /// `POST /api/config` with `{"total_bandwidth": <int>}`
    pub async fn set_total_bandwidth(&self, mbps: u64) -> Result<(), Error> {
        let url = self.api_url("config")?;
        debug!(mbps, "updating bandwidth cap");
        self.post_ack(url, Some(&json!({ "total_bandwidth": mbps })))
            .await?;
        Ok(())
    }

    /// Set a client's priority.
    ///
    /// `POST /api/priority/{ip}` with `{"priority": <int>}`
    pub async fn set_priority(&self, ip: &str, priority: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("priority/{ip}"))?;
        debug!(ip, priority, "updating client priority");
        self.post_ack(url, Some(&json!({ "priority": priority })))
            .await?;
        Ok(())
    }

    /// Fetch a device's custom label, if one is stored.
    ///
    /// `GET /api/device/{ip}/label`
    pub async fn get_device_label(&self, ip: &str) -> Result<Option<String>, Error> {
        let url = self.api_url(&format!("device/{ip}/label"))?;
        debug!(ip, "fetching device label");
        let dto: LabelDto = self.get(url).await?;
        Ok(dto.label)
    }

    /// Store a device's custom label.
    ///
    /// `POST /api/device/{ip}/label` with `{"label": <string>}`
    pub async fn set_device_label(&self, ip: &str, label: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("device/{ip}/label"))?;
        debug!(ip, label, "storing device label");
        self.post_ack(url, Some(&json!({ "label": label }))).await?;
        Ok(())
    }

    /// Set the high-usage alert threshold percentage.
    ///
    /// `POST /api/alerts/threshold` with `{"threshold": <float>}`
    pub async fn set_alert_threshold(&self, percent: f64) -> Result<(), Error> {
        let url = self.api_url("alerts/threshold")?;
        debug!(percent, "updating alert threshold");
        self.post_ack(url, Some(&json!({ "threshold": percent })))
            .await?;
        Ok(())
    }

    /// Toggle QoS auto-adjustment on the backend.
    ///
    /// `POST /api/qos/toggle` (no body)
    pub async fn toggle_qos(&self) -> Result<QosToggleOutcome, Error> {
        let url = self.api_url("qos/toggle")?;
        debug!("toggling qos auto-adjustment");
        let value = self.post_ack(url, None::<&Value>).await?;
        Ok(QosToggleOutcome {
            enabled: value.get("enabled").and_then(Value::as_bool).unwrap_or(false),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("QoS toggled")
                .to_owned(),
        })
    }
}
