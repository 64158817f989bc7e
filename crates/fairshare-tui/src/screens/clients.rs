//! Clients screen — per-client table with inline editing entry points.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use fairshare_core::ClientRecord;

use crate::action::Action;
use crate::component::Component;
use crate::edit::EditKind;
use crate::theme;
use crate::widgets::rate_fmt;

const BAR_WIDTH: u16 = 16;

pub struct ClientsScreen {
    focused: bool,
    clients: Arc<Vec<ClientRecord>>,
    table_state: TableState,
}

impl ClientsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            clients: Arc::new(Vec::new()),
            table_state: TableState::default(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.clients.len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.clients.len();
        if len == 0 {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    fn selected_client(&self) -> Option<&ClientRecord> {
        self.clients.get(self.selected_index())
    }
}

impl Component for ClientsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                let len = self.clients.len();
                if len > 0 {
                    self.select(len - 1);
                }
                Ok(None)
            }
            // Priority edit, seeded with the current value.
            KeyCode::Char('e') => Ok(self.selected_client().map(|client| Action::OpenEdit {
                kind: EditKind::Priority {
                    ip: client.ip.clone(),
                },
                seed: client.priority.to_string(),
            })),
            // Rename goes through the app so the stored label can be
            // fetched as the seed.
            KeyCode::Char('r') => Ok(self.selected_client().map(|client| Action::RequestRename {
                ip: client.ip.clone(),
            })),
            // Mirror the selected client's priority onto the gateway.
            KeyCode::Char('s') => Ok(self.selected_client().map(|client| {
                Action::Dispatch(fairshare_core::Command::SyncRouterPriority {
                    ip: client.ip.clone(),
                    priority: client.priority,
                })
            })),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ClientsUpdated(clients) = action {
            self.clients = Arc::clone(clients);
            // Keep the selection stable across poll refreshes; clamp
            // if the list shrank under it.
            let len = self.clients.len();
            if len > 0 && self.selected_index() >= len {
                self.select(len - 1);
            }
        }
        Ok(None)
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Clients ({}) ", self.clients.len()))
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

        let layout = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        if self.clients.is_empty() {
            frame.render_widget(
                Paragraph::new("  No clients connected")
                    .style(Style::default().fg(theme::BORDER_GRAY)),
                layout[0],
            );
        } else {
            let header = Row::new(vec![
                Cell::from("Name").style(theme::table_header()),
                Cell::from("IP Address").style(theme::table_header()),
                Cell::from("Priority").style(theme::table_header()),
                Cell::from("Usage").style(theme::table_header()),
                Cell::from("").style(theme::table_header()), // usage bar
                Cell::from("%").style(theme::table_header()),
                Cell::from("Allocated").style(theme::table_header()),
            ]);

            let selected_idx = self.selected_index();
            let rows: Vec<Row> = self
                .clients
                .iter()
                .enumerate()
                .map(|(i, client)| {
                    let is_selected = i == selected_idx;
                    let prefix = if is_selected { "▸ " } else { "  " };

                    let class = client.priority_class();
                    let priority_cell = Cell::from(format!("{} ({class})", client.priority))
                        .style(Style::default().fg(theme::priority_color(class)));

                    let (filled, empty) =
                        rate_fmt::fmt_pct_bar(client.usage_bar_percent(), BAR_WIDTH);
                    let usage_color = theme::usage_color(client.usage_percent);
                    let bar = Line::from(vec![
                        Span::styled(filled, Style::default().fg(usage_color)),
                        Span::styled(empty, Style::default().fg(theme::BG_HIGHLIGHT)),
                    ]);

                    let row_style = if is_selected {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    };

                    let icon = client.icon.as_deref().unwrap_or("·");

                    Row::new(vec![
                        Cell::from(format!("{prefix}{icon} {}", client.display_name()))
                            .style(Style::default().fg(theme::ACCENT_BLUE)),
                        Cell::from(client.ip.clone()),
                        priority_cell,
                        Cell::from(rate_fmt::fmt_mbps(client.usage)),
                        Cell::from(bar),
                        // Raw percentage label, deliberately unclamped.
                        Cell::from(rate_fmt::fmt_percent(client.usage_percent))
                            .style(Style::default().fg(usage_color)),
                        Cell::from(rate_fmt::fmt_mbps(client.allocated)),
                    ])
                    .style(row_style)
                })
                .collect();

            let widths = [
                Constraint::Fill(2),                  // name
                Constraint::Length(16),               // ip
                Constraint::Length(12),               // priority
                Constraint::Length(11),               // usage
                Constraint::Length(BAR_WIDTH),        // bar
                Constraint::Length(6),                // percent
                Constraint::Length(11),               // allocated
            ];

            let table = Table::new(rows, widths).header(header);
            let mut state = self.table_state.clone();
            frame.render_stateful_widget(table, layout[0], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("priority  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("rename  ", theme::key_hint()),
            Span::styled("s ", theme::key_hint_key()),
            Span::styled("sync to router", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn client(ip: &str, priority: i64) -> ClientRecord {
        ClientRecord {
            ip: ip.into(),
            friendly_name: None,
            icon: None,
            priority,
            usage: 1.0,
            allocated: 5.0,
            usage_percent: 20.0,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn priority_key_opens_edit_seeded_with_current_value() {
        let mut screen = ClientsScreen::new();
        screen
            .update(&Action::ClientsUpdated(Arc::new(vec![
                client("10.0.0.2", 7),
                client("10.0.0.3", 2),
            ])))
            .expect("update");

        let action = screen
            .handle_key_event(key(KeyCode::Char('e')))
            .expect("key");
        match action {
            Some(Action::OpenEdit {
                kind: EditKind::Priority { ip },
                seed,
            }) => {
                assert_eq!(ip, "10.0.0.2");
                assert_eq!(seed, "7");
            }
            other => panic!("expected priority edit, got {other:?}"),
        }
    }

    #[test]
    fn selection_clamps_when_list_shrinks() {
        let mut screen = ClientsScreen::new();
        screen
            .update(&Action::ClientsUpdated(Arc::new(vec![
                client("10.0.0.2", 5),
                client("10.0.0.3", 5),
                client("10.0.0.4", 5),
            ])))
            .expect("update");
        screen.select(2);

        screen
            .update(&Action::ClientsUpdated(Arc::new(vec![client(
                "10.0.0.2", 5,
            )])))
            .expect("update");
        assert_eq!(screen.selected_index(), 0);
    }

    #[test]
    fn keys_do_nothing_with_no_clients() {
        let mut screen = ClientsScreen::new();
        assert!(
            screen
                .handle_key_event(key(KeyCode::Char('e')))
                .expect("key")
                .is_none()
        );
        assert!(
            screen
                .handle_key_event(key(KeyCode::Char('r')))
                .expect("key")
                .is_none()
        );
    }
}
