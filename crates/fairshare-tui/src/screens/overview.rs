//! Overview screen — headline figures and top talkers.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use fairshare_core::{ClientRecord, StatusSnapshot};

use crate::action::Action;
use crate::component::Component;
use crate::edit::EditKind;
use crate::theme;
use crate::widgets::rate_fmt;

/// How many clients the top-talkers list shows.
const TOP_TALKERS: usize = 8;

/// Each client's share of the summed allocation, in snapshot order.
/// The percentage is derived here at render time and never stored;
/// an empty list or an all-zero allocation yields no shares (and no
/// NaN from the division).
fn allocation_shares(clients: &[ClientRecord]) -> Vec<(&ClientRecord, f64)> {
    let total: f64 = clients.iter().map(|c| c.allocated).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    clients
        .iter()
        .map(|c| (c, c.allocated / total * 100.0))
        .collect()
}

pub struct OverviewScreen {
    focused: bool,
    status: Arc<StatusSnapshot>,
    clients: Arc<Vec<ClientRecord>>,
}

impl OverviewScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            status: Arc::new(StatusSnapshot::default()),
            clients: Arc::new(Vec::new()),
        }
    }

    fn render_figures(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Network ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::horizontal([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(inner);

        let figure = |title: &'static str, value: String, color| {
            Paragraph::new(vec![
                Line::from(Span::styled(title, Style::default().fg(theme::DIM_WHITE))),
                Line::from(Span::styled(value, theme::title_style().fg(color))),
            ])
            .centered()
        };

        frame.render_widget(
            figure(
                "Clients",
                self.status.total_clients.to_string(),
                theme::ACCENT_BLUE,
            ),
            cols[0],
        );
        frame.render_widget(
            figure(
                "Upload",
                rate_fmt::fmt_kbps(self.status.network_stats.sent),
                theme::UPLOAD,
            ),
            cols[1],
        );
        frame.render_widget(
            figure(
                "Download",
                rate_fmt::fmt_kbps(self.status.network_stats.recv),
                theme::DOWNLOAD,
            ),
            cols[2],
        );
        frame.render_widget(
            figure(
                "Total cap",
                rate_fmt::fmt_mbps(self.status.total_bandwidth),
                theme::AMBER,
            ),
            cols[3],
        );
    }

    fn render_top_talkers(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Top Talkers ")
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

        if self.clients.is_empty() {
            frame.render_widget(
                Paragraph::new("  No clients connected")
                    .style(Style::default().fg(theme::BORDER_GRAY)),
                inner,
            );
            return;
        }

        let mut ranked: Vec<&ClientRecord> = self.clients.iter().collect();
        ranked.sort_by(|a, b| b.usage.total_cmp(&a.usage));

        let bar_width = 20u16;
        let lines: Vec<Line> = ranked
            .iter()
            .take(TOP_TALKERS)
            .map(|client| {
                let (filled, empty) =
                    rate_fmt::fmt_pct_bar(client.usage_bar_percent(), bar_width);
                let usage_color = theme::usage_color(client.usage_percent);
                Line::from(vec![
                    Span::styled(
                        format!("  {:<18.18}", client.display_name()),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                    Span::styled(filled, Style::default().fg(usage_color)),
                    Span::styled(empty, Style::default().fg(theme::BG_HIGHLIGHT)),
                    Span::styled(
                        format!(
                            "  {:>10}  {}",
                            rate_fmt::fmt_mbps(client.usage),
                            rate_fmt::fmt_percent(client.usage_percent),
                        ),
                        Style::default().fg(usage_color),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_allocation(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Allocation ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let shares = allocation_shares(&self.clients);
        if shares.is_empty() {
            frame.render_widget(
                Paragraph::new("  Nothing allocated")
                    .style(Style::default().fg(theme::BORDER_GRAY)),
                inner,
            );
            return;
        }

        let bar_width = 14u16;
        let lines: Vec<Line> = shares
            .iter()
            .map(|(client, share)| {
                let (filled, empty) = rate_fmt::fmt_pct_bar(*share, bar_width);
                Line::from(vec![
                    Span::styled(
                        format!("  {:<15.15}", client.ip),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                    Span::styled(filled, Style::default().fg(theme::ACCENT_BLUE)),
                    Span::styled(empty, Style::default().fg(theme::BG_HIGHLIGHT)),
                    Span::styled(
                        format!(
                            "  {:>10}  {}",
                            rate_fmt::fmt_mbps(client.allocated),
                            rate_fmt::fmt_percent(*share),
                        ),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for OverviewScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('b') => Ok(Some(Action::OpenEdit {
                kind: EditKind::BandwidthCap,
                seed: format!("{:.0}", self.status.total_bandwidth),
            })),
            KeyCode::Char('a') => Ok(Some(Action::OpenEdit {
                kind: EditKind::AlertThreshold,
                seed: String::new(),
            })),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StatusUpdated(status) => self.status = Arc::clone(status),
            Action::ClientsUpdated(clients) => self.clients = Arc::clone(clients),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(4), // headline figures
            Constraint::Min(1),    // top talkers / allocation
            Constraint::Length(1), // hints
        ])
        .split(area);

        self.render_figures(frame, layout[0]);

        let panels =
            Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(layout[1]);
        self.render_top_talkers(frame, panels[0]);
        self.render_allocation(frame, panels[1]);

        let hints = Line::from(vec![
            Span::styled("  b ", theme::key_hint_key()),
            Span::styled("bandwidth cap  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("alert threshold", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(ip: &str, allocated: f64) -> ClientRecord {
        ClientRecord {
            ip: ip.into(),
            friendly_name: None,
            icon: None,
            priority: 5,
            usage: 0.0,
            allocated,
            usage_percent: 0.0,
        }
    }

    #[test]
    fn shares_derive_from_the_allocation_sum() {
        let clients = vec![client("10.0.0.2", 30.0), client("10.0.0.3", 10.0)];
        let shares = allocation_shares(&clients);
        assert_eq!(shares.len(), 2);
        assert!((shares[0].1 - 75.0).abs() < f64::EPSILON);
        assert!((shares[1].1 - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_allocation_yields_no_shares() {
        assert!(allocation_shares(&[]).is_empty());
        // A zero sum must not divide into NaN slices.
        assert!(allocation_shares(&[client("10.0.0.2", 0.0)]).is_empty());
    }
}
