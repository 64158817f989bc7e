// ── Domain model ──

mod client;
mod history;
mod router;
mod status;

pub use client::{ClientRecord, PriorityClass};
pub use history::HistorySeries;
pub use router::{RouterInfo, RouterMode};
pub use status::{NetworkStats, StatusSnapshot};
