//! Traffic screen — upload/download history chart.

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};

use fairshare_core::HistorySeries;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::rate_fmt;

pub struct TrafficScreen {
    focused: bool,
    history: Arc<HistorySeries>,
}

/// Index the samples along X so both series share one axis; the
/// backend's time labels mark the ends.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn series_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

/// Y-axis upper bound with headroom; never collapses to zero on a
/// quiet link.
fn y_bound(history: &HistorySeries) -> f64 {
    let max = history.max_rate();
    if max < 1.0 { 1.0 } else { max * 1.2 }
}

impl TrafficScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            history: Arc::new(HistorySeries::default()),
        }
    }
}

impl Component for TrafficScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::HistoryUpdated(history) = action {
            self.history = Arc::clone(history);
        }
        Ok(None)
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Traffic History ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        if self.history.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new("  No traffic data yet")
                    .style(Style::default().fg(theme::BORDER_GRAY)),
                inner,
            );
            return;
        }

        let upload = series_points(&self.history.upload);
        let download = series_points(&self.history.download);
        let x_max = (self.history.len().saturating_sub(1)).max(1) as f64;
        let y_max = y_bound(&self.history);

        let datasets = vec![
            Dataset::default()
                .name("Down")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::DOWNLOAD))
                .data(&download),
            Dataset::default()
                .name("Up")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::UPLOAD))
                .data(&upload),
        ];

        let axis_style = Style::default().fg(theme::BORDER_GRAY);
        let x_labels = vec![
            Span::styled(
                self.history.time.first().cloned().unwrap_or_default(),
                axis_style,
            ),
            Span::styled(
                self.history.time.last().cloned().unwrap_or_default(),
                axis_style,
            ),
        ];
        let y_labels = vec![
            Span::styled("0", axis_style),
            Span::styled(rate_fmt::fmt_mbps_axis(y_max / 2.0), axis_style),
            Span::styled(rate_fmt::fmt_mbps_axis(y_max), axis_style),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(Axis::default().bounds([0.0, x_max]).labels(x_labels).style(axis_style))
            .y_axis(Axis::default().bounds([0.0, y_max]).labels(y_labels).style(axis_style));

        frame.render_widget(chart, area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_index_samples_in_order() {
        let points = series_points(&[5.0, 2.0, 8.0]);
        assert_eq!(points, vec![(0.0, 5.0), (1.0, 2.0), (2.0, 8.0)]);
    }

    #[test]
    fn y_bound_adds_headroom_and_has_a_floor() {
        let quiet = HistorySeries::new(vec!["a".into()], vec![0.0], vec![0.0]);
        assert!((y_bound(&quiet) - 1.0).abs() < f64::EPSILON);

        let busy = HistorySeries::new(
            vec!["a".into(), "b".into()],
            vec![10.0, 50.0],
            vec![20.0, 30.0],
        );
        assert!((y_bound(&busy) - 60.0).abs() < f64::EPSILON);
    }
}
