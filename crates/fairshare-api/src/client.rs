// Backend API HTTP client
//
// Wraps `reqwest::Client` with base-URL construction and the shared
// acknowledgement contract for mutations. Endpoint groups (telemetry,
// control, router, export) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the FairShare backend's `/api` surface.
///
/// Mutations share a single success contract: the request must be
/// HTTP-successful AND, when the response body carries a `success`
/// field, it must be `true`. See [`ApiClient::post_ack`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://192.168.1.10:5000`);
    /// the `/api` prefix is appended per request.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and deserialize the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a raw GET request without JSON decoding (CSV download).
    pub(crate) async fn http_get(&self, url: Url) -> Result<reqwest::Response, Error> {
        debug!("GET {}", url);
        self.http.get(url).send().await.map_err(Error::Transport)
    }

    /// Send a POST request with an optional JSON body and apply the
    /// shared acknowledgement contract.
    ///
    /// Returns the parsed body so callers can pull out extra fields
    /// (`applied`, `total`, `enabled`, ...). An empty body on an
    /// HTTP-successful response is treated as a bare acknowledgement.
    pub(crate) async fn post_ack(
        &self,
        url: Url,
        body: Option<&impl Serialize>,
    ) -> Result<Value, Error> {
        debug!("POST {}", url);

        let mut req = self.http.post(url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        let value: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: text.clone(),
            })?
        };

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        // success flag, when present, must be true
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(Error::Rejected {
                message: rejection_message(&value),
            });
        }

        Ok(value)
    }

    /// Check status and deserialize a GET response body.
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Pull the most descriptive failure message out of a rejection body.
fn rejection_message(value: &Value) -> String {
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map_or_else(|| "operation failed".to_owned(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::rejection_message;
    use serde_json::json;

    #[test]
    fn rejection_prefers_error_over_message() {
        let v = json!({"success": false, "error": "tc not available", "message": "nope"});
        assert_eq!(rejection_message(&v), "tc not available");
    }

    #[test]
    fn rejection_falls_back_to_generic() {
        let v = json!({"success": false});
        assert_eq!(rejection_message(&v), "operation failed");
    }
}
