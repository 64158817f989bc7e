// ── Background polling ──
//
// Drives the periodic fetch cycle. Each polled concern carries a
// monotonic sequence counter: every fetch is issued under a fresh
// sequence number, and a response is only applied to the store if no
// later fetch for the same concern has already landed. Slow responses
// are discarded instead of clobbering newer data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use fairshare_api::ApiClient;

use crate::error::CoreError;
use crate::model::{ClientRecord, HistorySeries, StatusSnapshot};
use crate::store::SnapshotStore;

/// Last-issued-wins guard for one polled concern.
///
/// `issue` hands out strictly increasing sequence numbers; `try_apply`
/// admits a response only if its sequence is newer than anything
/// already applied. Out-of-order completions of older fetches are
/// rejected.
#[derive(Debug, Default)]
pub(crate) struct ConcernSeq {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl ConcernSeq {
    pub(crate) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns true if `seq` is newer than every previously applied
    /// sequence, marking it applied in the same step.
    pub(crate) fn try_apply(&self, seq: u64) -> bool {
        self.applied.fetch_max(seq, Ordering::AcqRel) < seq
    }
}

/// One [`ConcernSeq`] per polled slice.
#[derive(Debug, Default)]
pub(crate) struct PollSequences {
    pub(crate) status: ConcernSeq,
    pub(crate) clients: ConcernSeq,
    pub(crate) history: ConcernSeq,
}

// ── Fetches ──────────────────────────────────────────────────────

// Shared by the poll loop and on-demand refreshes after mutations,
// so both paths go through the same sequence guard.

pub(crate) async fn fetch_status(
    api: &ApiClient,
    store: &SnapshotStore,
    seqs: &PollSequences,
) -> Result<(), CoreError> {
    let seq = seqs.status.issue();
    let status: StatusSnapshot = api.get_status().await?.into();
    if seqs.status.try_apply(seq) {
        store.apply_status(status);
    } else {
        debug!(seq, "discarding stale status response");
    }
    Ok(())
}

pub(crate) async fn fetch_clients(
    api: &ApiClient,
    store: &SnapshotStore,
    seqs: &PollSequences,
) -> Result<(), CoreError> {
    let seq = seqs.clients.issue();
    let clients: Vec<ClientRecord> = api
        .list_clients()
        .await?
        .into_iter()
        .map(ClientRecord::from)
        .collect();
    if seqs.clients.try_apply(seq) {
        store.apply_clients(clients);
    } else {
        debug!(seq, "discarding stale clients response");
    }
    Ok(())
}

pub(crate) async fn fetch_history(
    api: &ApiClient,
    store: &SnapshotStore,
    seqs: &PollSequences,
) -> Result<(), CoreError> {
    let seq = seqs.history.issue();
    let history: HistorySeries = api.get_history().await?.into();
    if seqs.history.try_apply(seq) {
        store.apply_history(history);
    } else {
        debug!(seq, "discarding stale history response");
    }
    Ok(())
}

// ── Poll loop ────────────────────────────────────────────────────

/// Periodically fetch status, clients, and history.
///
/// The first tick fires immediately so the UI has data right after
/// startup. Ticks that fall behind are skipped rather than bursted;
/// the three fetches of one tick run concurrently and a failure of
/// one does not block the others.
pub(crate) async fn poll_task(
    api: ApiClient,
    store: Arc<SnapshotStore>,
    seqs: Arc<PollSequences>,
    interval: Duration,
    cancel: CancellationToken,
    tracker: TaskTracker,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                spawn_fetch(&tracker, &cancel, {
                    let api = api.clone();
                    let store = store.clone();
                    let seqs = seqs.clone();
                    async move { fetch_status(&api, &store, &seqs).await }
                }, "status");
                spawn_fetch(&tracker, &cancel, {
                    let api = api.clone();
                    let store = store.clone();
                    let seqs = seqs.clone();
                    async move { fetch_clients(&api, &store, &seqs).await }
                }, "clients");
                spawn_fetch(&tracker, &cancel, {
                    let api = api.clone();
                    let store = store.clone();
                    let seqs = seqs.clone();
                    async move { fetch_history(&api, &store, &seqs).await }
                }, "history");
            }
        }
    }
}

fn spawn_fetch<F>(tracker: &TaskTracker, cancel: &CancellationToken, fut: F, what: &'static str)
where
    F: std::future::Future<Output = Result<(), CoreError>> + Send + 'static,
{
    let cancel = cancel.clone();
    tracker.spawn(async move {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {}
            res = fut => {
                if let Err(e) = res {
                    warn!(what, error = %e, "poll fetch failed");
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_strictly_increasing() {
        let seq = ConcernSeq::default();
        assert_eq!(seq.issue(), 1);
        assert_eq!(seq.issue(), 2);
        assert_eq!(seq.issue(), 3);
    }

    #[test]
    fn later_issue_wins_over_slow_earlier_response() {
        let seq = ConcernSeq::default();
        let first = seq.issue();
        let second = seq.issue();

        // The newer fetch lands first; the older one must be rejected.
        assert!(seq.try_apply(second));
        assert!(!seq.try_apply(first));
    }

    #[test]
    fn in_order_responses_all_apply() {
        let seq = ConcernSeq::default();
        let a = seq.issue();
        let b = seq.issue();
        assert!(seq.try_apply(a));
        assert!(seq.try_apply(b));
        // Re-applying the same sequence is also rejected.
        assert!(!seq.try_apply(b));
    }
}
