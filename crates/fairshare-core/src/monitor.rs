// ── Monitor ──────────────────────────────────────────────────────
//
// The main entry point for consumers. Owns the API client, the
// snapshot store, and the background polling lifecycle; routes all
// write operations through `execute`.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use fairshare_api::{ApiClient, ExportKind};

use crate::command::{Command, CommandOutcome, validate};
use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::model::RouterInfo;
use crate::poller::{self, PollSequences};
use crate::store::SnapshotStore;

/// Client-side monitor for one backend instance.
///
/// Cheaply cloneable via `Arc`. Construct with [`new`](Self::new),
/// call [`start`](Self::start) to begin polling, and
/// [`shutdown`](Self::shutdown) to cancel and drain every background
/// task. All state lives behind the shared inner so every clone
/// observes the same store.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    api: ApiClient,
    store: Arc<SnapshotStore>,
    seqs: Arc<PollSequences>,
    cancel: CancellationToken,
    tasks: TaskTracker,
}

impl Monitor {
    /// Create a new monitor from configuration. Does NOT poll --
    /// call [`start()`](Self::start) to spawn the background loop.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                api,
                store: Arc::new(SnapshotStore::new()),
                seqs: Arc::new(PollSequences::default()),
                cancel: CancellationToken::new(),
                tasks: TaskTracker::new(),
            }),
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    /// Access the underlying snapshot store.
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Spawn the periodic poll loop.
    ///
    /// Idempotent in effect only if called once; callers own the
    /// single-start discipline. The first cycle fires immediately.
    pub fn start(&self) {
        let inner = &self.inner;
        inner.tasks.spawn(poller::poll_task(
            inner.api.clone(),
            inner.store.clone(),
            inner.seqs.clone(),
            inner.config.poll_interval,
            inner.cancel.clone(),
            inner.tasks.clone(),
        ));
        info!(interval = ?inner.config.poll_interval, "polling started");
    }

    /// Cancel all background work and wait for it to finish.
    ///
    /// In-flight fetches are abandoned, not awaited to completion;
    /// nothing they would have written can land after this returns.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        debug!("monitor shut down");
    }

    // ── On-demand refreshes ──────────────────────────────────────

    /// Re-fetch the client list outside the poll cadence.
    ///
    /// Goes through the same sequence guard as the poll loop, so a
    /// concurrent periodic fetch cannot be clobbered by this one or
    /// vice versa.
    pub async fn refresh_clients(&self) -> Result<(), CoreError> {
        poller::fetch_clients(&self.inner.api, &self.inner.store, &self.inner.seqs).await
    }

    /// Re-fetch gateway details and update the store.
    pub async fn refresh_router_info(&self) -> Result<RouterInfo, CoreError> {
        let info: RouterInfo = self.inner.api.router_info().await?.into();
        self.inner.store.apply_router(info.clone());
        Ok(info)
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Fetch a device's stored label, falling back to its address when
    /// no label exists or the lookup fails. Used to seed the rename
    /// editor; a failed lookup must not block editing.
    pub async fn device_label_or_ip(&self, ip: &str) -> String {
        match self.inner.api.get_device_label(ip).await {
            Ok(Some(label)) => label,
            Ok(None) => ip.to_owned(),
            Err(e) => {
                warn!(ip, error = %e, "label lookup failed, falling back to address");
                ip.to_owned()
            }
        }
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Execute a write operation.
    ///
    /// Validates locally, routes to the matching endpoint, and on
    /// acknowledgement triggers the follow-up refresh the command
    /// calls for. Backend rejections surface as
    /// [`CoreError::Rejected`].
    pub async fn execute(&self, command: Command) -> Result<CommandOutcome, CoreError> {
        validate(&command)?;
        debug!(command = %command.describe(), "executing");

        let api = &self.inner.api;
        let outcome = match &command {
            Command::SetBandwidthCap { mbps } => {
                api.set_total_bandwidth(*mbps).await?;
                CommandOutcome::Ok
            }
            Command::SetPriority { ip, priority } => {
                api.set_priority(ip, *priority).await?;
                CommandOutcome::Ok
            }
            Command::RenameDevice { ip, label } => {
                api.set_device_label(ip, label.trim()).await?;
                CommandOutcome::Ok
            }
            Command::SetAlertThreshold { percent } => {
                api.set_alert_threshold(*percent).await?;
                CommandOutcome::Ok
            }
            Command::ApplyRouterLimits => {
                let res = api.apply_router_limits().await?;
                CommandOutcome::RouterLimits {
                    message: res.message,
                    applied: res.applied,
                    total: res.total,
                }
            }
            Command::ClearRouterLimits => {
                api.clear_router_limits().await?;
                CommandOutcome::Ok
            }
            Command::SyncRouterPriority { ip, priority } => {
                api.set_router_priority(ip, *priority).await?;
                CommandOutcome::Ok
            }
            Command::ToggleQos => {
                let res = api.toggle_qos().await?;
                CommandOutcome::Qos {
                    enabled: res.enabled,
                    message: res.message,
                }
            }
        };

        // Post-mutation refreshes are best-effort: the command already
        // succeeded, and the next poll cycle will converge regardless.
        if command.refreshes_clients() {
            if let Err(e) = self.refresh_clients().await {
                warn!(error = %e, "post-command client refresh failed");
            }
        }
        if command.refreshes_router() {
            if let Err(e) = self.refresh_router_info().await {
                warn!(error = %e, "post-command router refresh failed");
            }
        }

        Ok(outcome)
    }

    // ── Export ───────────────────────────────────────────────────

    /// Download a CSV report to `dest`, returning the byte count.
    pub async fn export_csv(
        &self,
        kind: ExportKind,
        window: u32,
        dest: &Path,
    ) -> Result<u64, CoreError> {
        let bytes = self.inner.api.download_csv(kind, window, dest).await?;
        info!(kind = %kind, window, dest = %dest.display(), bytes, "report exported");
        Ok(bytes)
    }
}
