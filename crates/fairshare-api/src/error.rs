use thiserror::Error;

/// Top-level error type for the `fairshare-api` crate.
///
/// Covers every failure mode across the API surface: transport, HTTP
/// status rejection, backend-level rejection (`success: false` or an
/// `error` payload), and payload decoding. `fairshare-core` maps these
/// into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Protocol ────────────────────────────────────────────────────
    /// Non-success HTTP status with the raw body for debugging.
    #[error("Backend returned HTTP {status}")]
    Http { status: u16, body: String },

    /// The backend acknowledged the request but reported failure
    /// (`success: false` or an `{error: ...}` payload).
    #[error("Backend rejected request: {message}")]
    Rejected { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Local IO (CSV export target file) ───────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this is a transient transport error -- the
    /// poller treats these as "keep the previous snapshot" failures.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }
}
