// ── Reactive snapshot store ──
//
// Single-writer storage for the four polled slices. Each slice is a
// `watch` channel holding the latest complete snapshot; a new poll
// replaces the slice wholesale and wakes subscribers. Readers never
// see a partially-applied update.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{ClientRecord, HistorySeries, RouterInfo, StatusSnapshot};

/// Latest-known state of everything the backend reports.
///
/// Data flows one way: pollers and command refreshes write via the
/// `apply_*` methods, the UI reads via subscriptions and snapshot
/// accessors. Components never write back into the store.
pub struct SnapshotStore {
    status: watch::Sender<Arc<StatusSnapshot>>,
    clients: watch::Sender<Arc<Vec<ClientRecord>>>,
    history: watch::Sender<Arc<HistorySeries>>,
    router: watch::Sender<Arc<RouterInfo>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (status, _) = watch::channel(Arc::new(StatusSnapshot::default()));
        let (clients, _) = watch::channel(Arc::new(Vec::new()));
        let (history, _) = watch::channel(Arc::new(HistorySeries::default()));
        let (router, _) = watch::channel(Arc::new(RouterInfo::default()));
        Self {
            status,
            clients,
            history,
            router,
        }
    }

    // ── Writers (pollers and command refreshes only) ─────────────────

    pub(crate) fn apply_status(&self, status: StatusSnapshot) {
        self.status.send_replace(Arc::new(status));
    }

    pub(crate) fn apply_clients(&self, clients: Vec<ClientRecord>) {
        self.clients.send_replace(Arc::new(clients));
    }

    pub(crate) fn apply_history(&self, history: HistorySeries) {
        self.history.send_replace(Arc::new(history));
    }

    pub(crate) fn apply_router(&self, router: RouterInfo) {
        self.router.send_replace(Arc::new(router));
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn status(&self) -> Arc<StatusSnapshot> {
        self.status.borrow().clone()
    }

    pub fn clients(&self) -> Arc<Vec<ClientRecord>> {
        self.clients.borrow().clone()
    }

    pub fn history(&self) -> Arc<HistorySeries> {
        self.history.borrow().clone()
    }

    pub fn router(&self) -> Arc<RouterInfo> {
        self.router.borrow().clone()
    }

    /// Look up one client by address in the current snapshot.
    pub fn client_by_ip(&self, ip: &str) -> Option<ClientRecord> {
        self.clients
            .borrow()
            .iter()
            .find(|c| c.ip == ip)
            .cloned()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_status(&self) -> watch::Receiver<Arc<StatusSnapshot>> {
        self.status.subscribe()
    }

    pub fn subscribe_clients(&self) -> watch::Receiver<Arc<Vec<ClientRecord>>> {
        self.clients.subscribe()
    }

    pub fn subscribe_history(&self) -> watch::Receiver<Arc<HistorySeries>> {
        self.history.subscribe()
    }

    pub fn subscribe_router(&self) -> watch::Receiver<Arc<RouterInfo>> {
        self.router.subscribe()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkStats;

    #[test]
    fn apply_replaces_slice_wholesale() {
        let store = SnapshotStore::new();
        store.apply_status(StatusSnapshot {
            total_clients: 3,
            network_stats: NetworkStats {
                sent: 1.0,
                recv: 2.0,
            },
            total_bandwidth: 100.0,
        });
        assert_eq!(store.status().total_clients, 3);

        store.apply_status(StatusSnapshot::default());
        assert_eq!(store.status().total_clients, 0);
    }

    #[tokio::test]
    async fn subscribers_see_new_snapshots() {
        let store = SnapshotStore::new();
        let mut rx = store.subscribe_clients();
        assert!(rx.borrow().is_empty());

        store.apply_clients(vec![ClientRecord {
            ip: "10.0.0.5".into(),
            friendly_name: None,
            icon: None,
            priority: 5,
            usage: 1.0,
            allocated: 2.0,
            usage_percent: 50.0,
        }]);
        rx.changed().await.expect("sender alive");
        assert_eq!(rx.borrow().len(), 1);
        assert_eq!(
            store.client_by_ip("10.0.0.5").map(|c| c.priority),
            Some(5)
        );
    }
}
