//! `fairshare-tui` — terminal dashboard for the fairshare bandwidth manager.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `fairshare-core`'s [`Monitor`](fairshare_core::Monitor). Screens are
//! navigable via number keys (1-5): Overview, Clients, Traffic, Router,
//! and Export.
//!
//! Logs are written to a file to avoid corrupting the terminal UI. A
//! background data bridge task continuously forwards store snapshots
//! into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod edit;
mod event;
mod notify;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fairshare_config::Config;
use fairshare_core::Monitor;

use crate::app::App;

/// Terminal dashboard for monitoring and shaping home network bandwidth.
#[derive(Parser, Debug)]
#[command(name = "fairshare-tui", version, about)]
struct Cli {
    /// Backend base URL (e.g. http://192.168.1.10:5000)
    #[arg(short, long)]
    backend: Option<String>,

    /// Directory CSV exports are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log file path (defaults to the platform data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli, config: &Config) -> Result<WorkerGuard> {
    // CLI verbosity overrides the configured filter.
    let directive = match cli.verbose {
        0 => config.log.level.clone(),
        1 => "info".into(),
        2 => "debug".into(),
        _ => "trace".into(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fairshare_tui={directive},fairshare_core={directive},fairshare_api={directive}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.log.file.clone())
        .unwrap_or_else(fairshare_config::log_path);
    let log_dir = log_file
        .parent()
        .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf);
    std::fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("cannot create log dir {}", log_dir.display()))?;
    let log_filename = log_file
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("fairshare.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let mut config = fairshare_config::load_config_or_default();

    // Write a starter file on first run so the defaults are editable.
    // Done before CLI overrides are applied; a one-off `--backend`
    // must not end up persisted.
    if !fairshare_config::config_path().exists() {
        fairshare_config::save_config(&config)
            .wrap_err("cannot write initial config file")?;
    }

    if let Some(backend) = &cli.backend {
        config.backend.clone_from(backend);
    }

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli, &config)?;

    info!(backend = %config.backend, "starting fairshare-tui");

    let monitor_config = fairshare_config::to_monitor_config(&config)
        .wrap_err("invalid configuration")?;
    let monitor = Monitor::new(monitor_config)?;
    monitor.start();

    let export_dir = cli
        .export_dir
        .or(config.export_dir)
        .unwrap_or_else(fairshare_config::default_export_dir);

    let mut app = App::new(monitor.clone(), export_dir);

    // Bridge store changes into the action loop for as long as the UI runs.
    let bridge_cancel = CancellationToken::new();
    let bridge = tokio::spawn(data_bridge::spawn_data_bridge(
        monitor.clone(),
        app.action_sender(),
        bridge_cancel.clone(),
    ));

    let result = app.run().await;

    bridge_cancel.cancel();
    let _ = bridge.await;
    monitor.shutdown().await;

    result
}
