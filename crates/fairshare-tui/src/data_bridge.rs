//! Data bridge — forwards [`SnapshotStore`] changes to TUI actions.
//!
//! Runs as a background task: watches the four store slices and
//! forwards every change (plus any snapshot already fetched before the
//! bridge started) as an [`Action`] through the TUI's action channel.
//! This keeps data flow one-way: store → bridge → action loop → screens.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use fairshare_core::Monitor;

use crate::action::Action;

pub async fn spawn_data_bridge(
    monitor: Monitor,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let store = monitor.store();
    let mut status = store.subscribe_status();
    let mut clients = store.subscribe_clients();
    let mut history = store.subscribe_history();
    let mut router = store.subscribe_router();

    // Forward initial snapshots only where a fetch has already landed;
    // the store's startup defaults must not flip the connection
    // indicator to "live" before the backend has answered.
    let initial_status = status.borrow_and_update().clone();
    if initial_status.total_clients > 0 || initial_status.total_bandwidth > 0.0 {
        let _ = action_tx.send(Action::StatusUpdated(initial_status));
    }
    let initial_clients = clients.borrow_and_update().clone();
    if !initial_clients.is_empty() {
        let _ = action_tx.send(Action::ClientsUpdated(initial_clients));
    }
    let initial_history = history.borrow_and_update().clone();
    if !initial_history.is_empty() {
        let _ = action_tx.send(Action::HistoryUpdated(initial_history));
    }
    let initial_router = router.borrow_and_update().clone();
    if initial_router.ip.is_some() {
        let _ = action_tx.send(Action::RouterUpdated(initial_router));
    }

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = status.changed() => {
                let _ = action_tx.send(Action::StatusUpdated(status.borrow_and_update().clone()));
            }
            Ok(()) = clients.changed() => {
                let _ = action_tx.send(Action::ClientsUpdated(clients.borrow_and_update().clone()));
            }
            Ok(()) = history.changed() => {
                let _ = action_tx.send(Action::HistoryUpdated(history.borrow_and_update().clone()));
            }
            Ok(()) = router.changed() => {
                let _ = action_tx.send(Action::RouterUpdated(router.borrow_and_update().clone()));
            }
        }
    }

    debug!("data bridge shut down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairshare_core::MonitorConfig;

    #[tokio::test]
    async fn startup_defaults_stay_out_of_the_action_channel() {
        let config = MonitorConfig::new("http://127.0.0.1:1".parse().expect("url"));
        let monitor = Monitor::new(config).expect("monitor");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let bridge = tokio::spawn(spawn_data_bridge(monitor, tx, cancel.clone()));
        cancel.cancel();
        bridge.await.expect("bridge task");

        // Nothing was fetched, so nothing flows; the connection
        // indicator stays on "waiting for data".
        assert!(rx.try_recv().is_err(), "default snapshot leaked");
    }
}
