//! Shared configuration for the FairShare TUI.
//!
//! TOML file + environment overrides, and translation to
//! `fairshare_core::MonitorConfig`. The file lives at the platform
//! config dir (e.g. `~/.config/fairshare/config.toml`); every field
//! can be overridden via `FAIRSHARE_`-prefixed environment variables.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fairshare_core::MonitorConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Poll cadence in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Directory CSV exports are written to. Defaults to the platform
    /// download dir, falling back to the current directory.
    pub export_dir: Option<PathBuf>,

    #[serde(default)]
    pub log: LogSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            timeout: default_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
            export_dir: None,
            log: LogSettings::default(),
        }
    }
}

/// Log output settings. The TUI owns the terminal, so logs go to a
/// file instead of stderr.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    /// Filter directive (e.g. "info", "fairshare_core=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Override for the log file path.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_backend() -> String {
    "http://127.0.0.1:5000".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_poll_interval_ms() -> u64 {
    2000
}
fn default_log_level() -> String {
    "info".into()
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "fairshare", "fairshare").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default log file path, alongside other app data.
pub fn log_path() -> PathBuf {
    ProjectDirs::from("net", "fairshare", "fairshare").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("fairshare.log");
            p
        },
        |dirs| dirs.data_dir().join("fairshare.log"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fairshare");
    p
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("FAIRSHARE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if the file doesn't exist or is
/// malformed.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`, creating parent
/// directories as needed.
pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `MonitorConfig` from the loaded settings.
pub fn to_monitor_config(cfg: &Config) -> Result<MonitorConfig, ConfigError> {
    let base_url: url::Url = cfg.backend.parse().map_err(|_| ConfigError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL: {}", cfg.backend),
    })?;

    if cfg.poll_interval_ms == 0 {
        return Err(ConfigError::Validation {
            field: "poll_interval_ms".into(),
            reason: "must be greater than zero".into(),
        });
    }

    let mut monitor = MonitorConfig::new(base_url)
        .with_poll_interval(Duration::from_millis(cfg.poll_interval_ms));
    monitor.timeout = Duration::from_secs(cfg.timeout);
    Ok(monitor)
}

/// Directory exports land in when the config doesn't name one.
pub fn default_export_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|d| d.download_dir().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
