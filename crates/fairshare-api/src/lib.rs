// fairshare-api: Async Rust client for the FairShare backend REST API

pub mod client;
pub mod control;
pub mod error;
pub mod export;
pub mod models;
pub mod router;
pub mod telemetry;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use export::ExportKind;
