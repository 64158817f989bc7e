//! Export screen — CSV report downloads.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use fairshare_core::ExportKind;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::sub_tabs;

/// Fallback window when the input is left empty: alert reports are
/// row-limited, the rest are hour-limited.
fn default_window(kind: ExportKind) -> u32 {
    match kind {
        ExportKind::Alerts => 100,
        _ => 24,
    }
}

pub struct ExportScreen {
    focused: bool,
    kind_index: usize,
    window: Input,
}

impl ExportScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            kind_index: 0,
            window: Input::default(),
        }
    }

    fn kind(&self) -> ExportKind {
        ExportKind::ALL[self.kind_index]
    }

    fn window_value(&self) -> Option<u32> {
        let raw = self.window.value().trim();
        if raw.is_empty() {
            Some(default_window(self.kind()))
        } else {
            raw.parse().ok()
        }
    }
}

impl Component for ExportScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => {
                self.kind_index = (self.kind_index + 1) % ExportKind::ALL.len();
                Ok(None)
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.kind_index =
                    (self.kind_index + ExportKind::ALL.len() - 1) % ExportKind::ALL.len();
                Ok(None)
            }
            KeyCode::Enter => match self.window_value() {
                Some(window) if window > 0 => Ok(Some(Action::StartExport {
                    kind: self.kind(),
                    window,
                })),
                _ => Ok(Some(Action::notify_error(format!(
                    "'{}' is not a valid window",
                    self.window.value()
                )))),
            },
            // Digits go into the window buffer; everything else is ignored.
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.window
                    .handle_event(&crossterm::event::Event::Key(key));
                Ok(None)
            }
            KeyCode::Backspace => {
                self.window
                    .handle_event(&crossterm::event::Event::Key(key));
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Export Reports ")
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
            Constraint::Length(2), // kind tabs
            Constraint::Length(2), // window input
            Constraint::Min(1),    // description
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let labels = ["Bandwidth", "Clients", "Alerts", "Full report"];
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&labels, self.kind_index)),
            layout[0],
        );

        let window_label = if self.kind() == ExportKind::Alerts {
            "Rows"
        } else {
            "Hours"
        };
        let window_display = if self.window.value().is_empty() {
            format!("{} (default)", default_window(self.kind()))
        } else {
            self.window.value().to_owned()
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("  {window_label}: "),
                    Style::default().fg(theme::DIM_WHITE),
                ),
                Span::styled(window_display, Style::default().fg(theme::ACCENT_BLUE)),
            ])),
            layout[1],
        );

        let description = match self.kind() {
            ExportKind::Bandwidth => "  Per-sample upload/download rates over the window.",
            ExportKind::Clients => "  Current clients with priorities and allocations.",
            ExportKind::Alerts => "  Most recent usage alerts, newest first.",
            ExportKind::FullReport => "  Combined bandwidth, client, and alert report.",
        };
        frame.render_widget(
            Paragraph::new(description).style(Style::default().fg(theme::DIM_WHITE)),
            layout[2],
        );

        let hints = Line::from(vec![
            Span::styled("  ←/→ ", theme::key_hint_key()),
            Span::styled("report kind  ", theme::key_hint()),
            Span::styled("0-9 ", theme::key_hint_key()),
            Span::styled("window  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("download", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
