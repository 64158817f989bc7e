// CSV report export
//
// Report generation happens on the backend; this module only builds the
// download URL and streams the response to a local file. The `alerts`
// report is windowed by row count, the rest by hours.

use std::fmt;
use std::path::Path;

use tracing::debug;
use url::Url;

use crate::client::ApiClient;
use crate::error::Error;

/// The CSV report kinds the backend can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Bandwidth,
    Clients,
    Alerts,
    FullReport,
}

impl ExportKind {
    /// Path segment under `/api/export/csv/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bandwidth => "bandwidth",
            Self::Clients => "clients",
            Self::Alerts => "alerts",
            Self::FullReport => "full-report",
        }
    }

    /// Query parameter name for the window: alerts are limited by row
    /// count, everything else by a time window in hours.
    pub fn window_param(self) -> &'static str {
        match self {
            Self::Alerts => "limit",
            _ => "hours",
        }
    }

    pub const ALL: [Self; 4] = [Self::Bandwidth, Self::Clients, Self::Alerts, Self::FullReport];
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApiClient {
    /// Build the parameterized CSV download URL.
    ///
    /// `GET /api/export/csv/{kind}?hours=N` (or `?limit=N` for alerts)
    pub fn export_url(&self, kind: ExportKind, window: u32) -> Result<Url, Error> {
        let mut url = self.api_url(&format!("export/csv/{kind}"))?;
        url.query_pairs_mut()
            .append_pair(kind.window_param(), &window.to_string());
        Ok(url)
    }

    /// Download a CSV report to `dest`, returning the byte count written.
    pub async fn download_csv(
        &self,
        kind: ExportKind,
        window: u32,
        dest: &Path,
    ) -> Result<u64, Error> {
        let url = self.export_url(kind, window)?;
        debug!(%url, dest = %dest.display(), "downloading csv report");

        let resp = self.http_get(url).await?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        tokio::fs::write(dest, &bytes).await?;
        Ok(bytes.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::ExportKind;

    #[test]
    fn alerts_are_windowed_by_limit() {
        assert_eq!(ExportKind::Alerts.window_param(), "limit");
        for kind in [ExportKind::Bandwidth, ExportKind::Clients, ExportKind::FullReport] {
            assert_eq!(kind.window_param(), "hours");
        }
    }

    #[test]
    fn path_segments_match_backend_routes() {
        assert_eq!(ExportKind::FullReport.as_str(), "full-report");
        assert_eq!(ExportKind::Bandwidth.to_string(), "bandwidth");
    }
}
