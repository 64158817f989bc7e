//! Core engine for FairShare dashboard clients.
//!
//! Owns the domain model, the reactive [`SnapshotStore`], the periodic
//! poller, and one-shot command dispatch against the backend. Consumers
//! (the TUI) construct a [`Monitor`], subscribe to store slices, and
//! send [`Command`]s.

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod monitor;
pub mod poller;
pub mod store;

pub use command::{Command, CommandOutcome};
pub use config::MonitorConfig;
pub use error::CoreError;
pub use fairshare_api::ExportKind;
pub use model::{
    ClientRecord, HistorySeries, NetworkStats, PriorityClass, RouterInfo, RouterMode,
    StatusSnapshot,
};
pub use monitor::Monitor;
pub use store::SnapshotStore;
