//! Router screen — gateway details and enforcement commands.

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use fairshare_core::{Command, RouterInfo, RouterMode};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;

/// How long the inline result line stays visible.
const RESULT_TTL: Duration = Duration::from_secs(5);

struct CommandResult {
    message: String,
    ok: bool,
    shown_at: Instant,
}

pub struct RouterScreen {
    focused: bool,
    info: Arc<RouterInfo>,
    /// Whether at least one router info response has arrived.
    loaded: bool,
    /// Outcome of the last enforcement command, shown inline under the
    /// panel in addition to its toast.
    last_result: Option<CommandResult>,
}

impl RouterScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            info: Arc::new(RouterInfo::default()),
            loaded: false,
            last_result: None,
        }
    }

    fn field_line<'a>(label: &'a str, value: String, color: ratatui::style::Color) -> Line<'a> {
        Line::from(vec![
            Span::styled(
                format!("  {label:<14}"),
                Style::default().fg(theme::DIM_WHITE),
            ),
            Span::styled(value, Style::default().fg(color)),
        ])
    }
}

impl Component for RouterScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Every enforcement command passes through the confirm gate.
        match key.code {
            KeyCode::Char('A') => Ok(Some(Action::ShowConfirm(ConfirmAction::ApplyRouterLimits))),
            KeyCode::Char('C') => Ok(Some(Action::ShowConfirm(ConfirmAction::ClearRouterLimits))),
            KeyCode::Char('Q') => Ok(Some(Action::ShowConfirm(ConfirmAction::ToggleQos))),
            KeyCode::Char('r') => Ok(Some(Action::RefreshRouter)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RouterUpdated(info) => {
                self.info = Arc::clone(info);
                self.loaded = true;
            }
            // Fetch on entry; router info is not part of the poll cycle.
            Action::SwitchScreen(crate::screen::ScreenId::Router) => {
                return Ok(Some(Action::RefreshRouter));
            }
            Action::CommandCompleted {
                command:
                    Command::ApplyRouterLimits | Command::ClearRouterLimits | Command::ToggleQos,
                message,
                ok,
            } => {
                self.last_result = Some(CommandResult {
                    message: message.clone(),
                    ok: *ok,
                    shown_at: Instant::now(),
                });
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Router ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !self.loaded {
            frame.render_widget(
                Paragraph::new("  Fetching router details...")
                    .style(Style::default().fg(theme::BORDER_GRAY)),
                inner,
            );
            return;
        }

        let info = &self.info;
        let mode_color = match info.mode {
            RouterMode::Simulation => theme::AMBER,
            RouterMode::Unknown => theme::BORDER_GRAY,
            RouterMode::Hotspot | RouterMode::Router => theme::SUCCESS_GREEN,
        };
        let admin_value = if info.admin {
            ("yes".to_owned(), theme::SUCCESS_GREEN)
        } else {
            ("no (limits cannot be enforced)".to_owned(), theme::ERROR_RED)
        };

        let mut lines = vec![
            Line::from(""),
            Self::field_line(
                "Address",
                info.ip.clone().unwrap_or_else(|| "unknown".into()),
                theme::ACCENT_BLUE,
            ),
            Self::field_line("Type", info.kind.clone(), theme::DIM_WHITE),
            Self::field_line("Mode", info.mode.to_string(), mode_color),
            Self::field_line("Status", info.status.clone(), theme::DIM_WHITE),
            Self::field_line("Admin", admin_value.0, admin_value.1),
            Line::from(""),
        ];

        if info.mode == RouterMode::Simulation {
            lines.push(Line::from(Span::styled(
                "  Running in simulation mode: limits are tracked but not enforced.",
                Style::default().fg(theme::AMBER),
            )));
            lines.push(Line::from(""));
        }

        if let Some(result) = &self.last_result {
            if result.shown_at.elapsed() < RESULT_TTL {
                let color = if result.ok {
                    theme::SUCCESS_GREEN
                } else {
                    theme::ERROR_RED
                };
                lines.push(Self::field_line("Last command", result.message.clone(), color));
                lines.push(Line::from(""));
            }
        }

        lines.push(Line::from(vec![
            Span::styled("  A ", theme::key_hint_key()),
            Span::styled("apply limits  ", theme::key_hint()),
            Span::styled("C ", theme::key_hint_key()),
            Span::styled("clear limits  ", theme::key_hint()),
            Span::styled("Q ", theme::key_hint_key()),
            Span::styled("toggle QoS  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enforcement_keys_request_confirmation_not_dispatch() {
        let mut screen = RouterScreen::new();
        for (code, expected) in [
            (KeyCode::Char('A'), ConfirmAction::ApplyRouterLimits),
            (KeyCode::Char('C'), ConfirmAction::ClearRouterLimits),
            (KeyCode::Char('Q'), ConfirmAction::ToggleQos),
        ] {
            match screen.handle_key_event(key(code)).expect("key") {
                Some(Action::ShowConfirm(action)) => assert_eq!(action, expected),
                other => panic!("expected confirm gate, got {other:?}"),
            }
        }
    }

    #[test]
    fn router_command_outcomes_are_kept_for_the_result_line() {
        let mut screen = RouterScreen::new();
        screen
            .update(&Action::CommandCompleted {
                command: Command::ApplyRouterLimits,
                message: "applied limits to 3 of 4 clients".into(),
                ok: true,
            })
            .expect("update");
        let result = screen.last_result.as_ref().expect("result stored");
        assert!(result.ok);
        assert_eq!(result.message, "applied limits to 3 of 4 clients");

        // Non-router commands don't touch the panel, and neither does
        // the background per-client sync.
        screen.last_result = None;
        screen
            .update(&Action::CommandCompleted {
                command: Command::SetBandwidthCap { mbps: 50 },
                message: "done".into(),
                ok: true,
            })
            .expect("update");
        screen
            .update(&Action::CommandCompleted {
                command: Command::SyncRouterPriority {
                    ip: "10.0.0.2".into(),
                    priority: 7,
                },
                message: "done".into(),
                ok: true,
            })
            .expect("update");
        assert!(screen.last_result.is_none());
    }

    #[test]
    fn entering_the_screen_triggers_a_refresh() {
        let mut screen = RouterScreen::new();
        let follow_up = screen
            .update(&Action::SwitchScreen(crate::screen::ScreenId::Router))
            .expect("update");
        assert!(matches!(follow_up, Some(Action::RefreshRouter)));
    }
}
