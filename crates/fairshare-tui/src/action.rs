//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use fairshare_core::{
    ClientRecord, Command, ExportKind, HistorySeries, RouterInfo, StatusSnapshot,
};

use crate::edit::EditKind;
use crate::notify::ToastLevel;
use crate::screen::ScreenId;

/// Command that must be confirmed before dispatch. These touch the
/// gateway for every client at once, so a stray keypress must not
/// fire them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ApplyRouterLimits,
    ClearRouterLimits,
    ToggleQos,
}

impl ConfirmAction {
    pub fn command(self) -> Command {
        match self {
            Self::ApplyRouterLimits => Command::ApplyRouterLimits,
            Self::ClearRouterLimits => Command::ClearRouterLimits,
            Self::ToggleQos => Command::ToggleQos,
        }
    }
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApplyRouterLimits => write!(f, "Apply configured limits to the router?"),
            Self::ClearRouterLimits => {
                write!(f, "Clear all enforced limits? Clients become unrestricted.")
            }
            Self::ToggleQos => write!(f, "Toggle QoS enforcement?"),
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Data events (from the store bridge) ───────────────────────
    StatusUpdated(Arc<StatusSnapshot>),
    ClientsUpdated(Arc<Vec<ClientRecord>>),
    HistoryUpdated(Arc<HistorySeries>),
    RouterUpdated(Arc<RouterInfo>),

    // ── Mutations ─────────────────────────────────────────────────
    /// Fire a backend command; the outcome comes back as a `Notify`,
    /// except for the background router sync, which only logs.
    Dispatch(Command),
    /// Open the rename editor for a client; the seed value is fetched
    /// from the backend first.
    RequestRename { ip: String },
    /// Open (or replace) the single edit session.
    OpenEdit { kind: EditKind, seed: String },

    // ── Confirmation gate ─────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Notifications ─────────────────────────────────────────────
    Notify { message: String, level: ToastLevel },
    /// A dispatched command finished; screens can surface the outcome
    /// inline next to where it was triggered.
    CommandCompleted {
        command: Command,
        message: String,
        ok: bool,
    },

    // ── Router / export ───────────────────────────────────────────
    RefreshRouter,
    StartExport { kind: ExportKind, window: u32 },
}

impl Action {
    pub fn notify_success(message: impl Into<String>) -> Self {
        Self::Notify {
            message: message.into(),
            level: ToastLevel::Success,
        }
    }

    pub fn notify_error(message: impl Into<String>) -> Self {
        Self::Notify {
            message: message.into(),
            level: ToastLevel::Error,
        }
    }
}
