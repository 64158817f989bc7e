// ── Core error types ──
//
// User-facing errors from fairshare-core. Consumers never see HTTP
// status codes or JSON parse failures directly; the From impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("{message}")]
    Rejected { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Backend error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fairshare_api::Error> for CoreError {
    fn from(err: fairshare_api::Error) -> Self {
        match err {
            fairshare_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            fairshare_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            fairshare_api::Error::Http { status: 404, body: _ } => CoreError::NotFound {
                what: "resource".into(),
            },
            fairshare_api::Error::Http { status, body: _ } => CoreError::Api {
                message: format!("HTTP {status}"),
                status: Some(status),
            },
            fairshare_api::Error::Rejected { message } => CoreError::Rejected { message },
            fairshare_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            fairshare_api::Error::Io(e) => CoreError::Internal(format!("IO error: {e}")),
        }
    }
}
