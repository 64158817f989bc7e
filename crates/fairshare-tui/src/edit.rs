//! Single-slot edit session for inline value editing.
//!
//! At most one edit session exists at any time; opening a new one
//! replaces the previous session and its buffer. The session owns the
//! input buffer and parses it into a [`Command`] on submit.

use crossterm::event::{KeyCode, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use fairshare_core::Command;

/// What value the open session edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Integer priority for one client.
    Priority { ip: String },
    /// Friendly label for one client.
    Rename { ip: String },
    /// Total bandwidth cap in Mbps.
    BandwidthCap,
    /// Usage-alert threshold percentage.
    AlertThreshold,
}

/// Result of feeding one key event into the session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Keep editing.
    Pending,
    /// Session dismissed without submitting.
    Cancelled,
    /// Input parsed into a command ready for dispatch.
    Submit(Command),
    /// Submit attempted but the buffer doesn't parse; session stays
    /// open with the buffer intact.
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    kind: EditKind,
    input: Input,
}

impl EditSession {
    pub fn new(kind: EditKind, seed: impl Into<String>) -> Self {
        Self {
            kind,
            input: Input::new(seed.into()),
        }
    }

    pub fn kind(&self) -> &EditKind {
        &self.kind
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn cursor(&self) -> usize {
        self.input.visual_cursor()
    }

    /// Popup title for the open session.
    pub fn title(&self) -> String {
        match &self.kind {
            EditKind::Priority { ip } => format!(" Priority for {ip} (0-10) "),
            EditKind::Rename { ip } => format!(" Label for {ip} "),
            EditKind::BandwidthCap => " Total bandwidth cap (Mbps) ".into(),
            EditKind::AlertThreshold => " Alert threshold (%) ".into(),
        }
    }

    /// Feed one key event into the session.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        match key.code {
            KeyCode::Esc => EditOutcome::Cancelled,
            KeyCode::Enter => self.submit(),
            _ => {
                self.input
                    .handle_event(&crossterm::event::Event::Key(key));
                EditOutcome::Pending
            }
        }
    }

    fn submit(&self) -> EditOutcome {
        let raw = self.input.value().trim();
        match &self.kind {
            EditKind::Priority { ip } => match raw.parse::<i64>() {
                Ok(priority) => EditOutcome::Submit(Command::SetPriority {
                    ip: ip.clone(),
                    priority,
                }),
                Err(_) => EditOutcome::Invalid(format!("'{raw}' is not a valid priority")),
            },
            EditKind::Rename { ip } => {
                if raw.is_empty() {
                    EditOutcome::Invalid("label cannot be empty".into())
                } else {
                    EditOutcome::Submit(Command::RenameDevice {
                        ip: ip.clone(),
                        label: raw.to_owned(),
                    })
                }
            }
            EditKind::BandwidthCap => match raw.parse::<u64>() {
                Ok(mbps) if mbps > 0 => EditOutcome::Submit(Command::SetBandwidthCap { mbps }),
                _ => EditOutcome::Invalid(format!("'{raw}' is not a valid Mbps value")),
            },
            EditKind::AlertThreshold => match raw.parse::<f64>() {
                Ok(percent) if (0.0..=100.0).contains(&percent) => {
                    EditOutcome::Submit(Command::SetAlertThreshold { percent })
                }
                _ => EditOutcome::Invalid(format!("'{raw}' is not a percentage (0-100)")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(session: &mut EditSession, s: &str) {
        for c in s.chars() {
            assert_eq!(
                session.handle_key(key(KeyCode::Char(c))),
                EditOutcome::Pending
            );
        }
    }

    #[test]
    fn priority_submit_parses_into_command() {
        let mut session = EditSession::new(
            EditKind::Priority {
                ip: "10.0.0.2".into(),
            },
            "",
        );
        type_str(&mut session, "8");
        assert_eq!(
            session.handle_key(key(KeyCode::Enter)),
            EditOutcome::Submit(Command::SetPriority {
                ip: "10.0.0.2".into(),
                priority: 8,
            })
        );
    }

    #[test]
    fn invalid_input_keeps_the_buffer() {
        let mut session = EditSession::new(EditKind::BandwidthCap, "");
        type_str(&mut session, "abc");
        assert!(matches!(
            session.handle_key(key(KeyCode::Enter)),
            EditOutcome::Invalid(_)
        ));
        // Buffer survives a failed submit so the user can correct it.
        assert_eq!(session.value(), "abc");
    }

    #[test]
    fn escape_cancels() {
        let mut session = EditSession::new(EditKind::AlertThreshold, "80");
        assert_eq!(session.handle_key(key(KeyCode::Esc)), EditOutcome::Cancelled);
    }

    #[test]
    fn threshold_rejects_out_of_range() {
        let mut session = EditSession::new(EditKind::AlertThreshold, "150");
        assert!(matches!(
            session.handle_key(key(KeyCode::Enter)),
            EditOutcome::Invalid(_)
        ));
    }

    #[test]
    fn seed_prefills_the_buffer() {
        let session = EditSession::new(
            EditKind::Rename {
                ip: "10.0.0.5".into(),
            },
            "Kitchen TV",
        );
        assert_eq!(session.value(), "Kitchen TV");
    }
}
