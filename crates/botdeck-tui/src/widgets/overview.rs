//! Bot overview panel: live status plus metrics history

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use botdeck_app::ConsoleSession;
use botdeck_core::MetricPoint;

use crate::theme::{palette, styles};

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a value series as a one-line bar string
fn spark(values: &[f64]) -> String {
    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return values.iter().map(|_| SPARK_CHARS[0]).collect();
    }
    values
        .iter()
        .map(|v| {
            let bucket = ((v / max) * (SPARK_CHARS.len() - 1) as f64).round() as usize;
            SPARK_CHARS[bucket.min(SPARK_CHARS.len() - 1)]
        })
        .collect()
}

/// Status, resource usage, and metric history for the open bot
pub struct OverviewPanel<'a> {
    session: &'a ConsoleSession,
}

impl<'a> OverviewPanel<'a> {
    pub fn new(session: &'a ConsoleSession) -> Self {
        Self { session }
    }

    fn metric_lines(metrics: &[MetricPoint], width: usize) -> Vec<Line<'static>> {
        if metrics.is_empty() {
            return vec![Line::from(Span::styled(
                " no metrics yet",
                Style::default().fg(palette::TEXT_MUTED),
            ))];
        }
        let take = width.saturating_sub(12).max(8);
        let start = metrics.len().saturating_sub(take);
        let window = &metrics[start..];
        let cpu: Vec<f64> = window.iter().map(|m| m.cpu_percent).collect();
        let mem: Vec<f64> = window.iter().map(|m| m.memory_mb).collect();
        let last = &window[window.len() - 1];
        vec![
            Line::from(vec![
                Span::styled(" cpu ", styles::hint_text()),
                Span::styled(spark(&cpu), Style::default().fg(palette::STATUS_BLUE)),
                Span::styled(
                    format!(" {:.1}%", last.cpu_percent),
                    Style::default().fg(palette::TEXT_SECONDARY),
                ),
            ]),
            Line::from(vec![
                Span::styled(" mem ", styles::hint_text()),
                Span::styled(spark(&mem), Style::default().fg(palette::STATUS_GREEN)),
                Span::styled(
                    format!(" {:.0} MB", last.memory_mb),
                    Style::default().fg(palette::TEXT_SECONDARY),
                ),
            ]),
        ]
    }
}

impl Widget for OverviewPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::panel_block("Overview", true);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let phase = self.session.lifecycle.phase();
        let (icon, label, style) = styles::phase_indicator(&phase);
        let mut lines = vec![Line::from(vec![
            Span::raw(" "),
            Span::styled(icon, style),
            Span::raw(" "),
            Span::styled(label, style.add_modifier(Modifier::BOLD)),
        ])];

        if let Some(status) = self.session.lifecycle.last_status() {
            let pid = status
                .pid
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".into());
            let cpu = status
                .cpu_percent
                .map(|c| format!("{c:.1}%"))
                .unwrap_or_else(|| "-".into());
            let mem = status
                .memory_mb
                .map(|m| format!("{m:.0} MB"))
                .unwrap_or_else(|| "-".into());
            lines.push(Line::from(Span::styled(
                format!(" pid {pid}   cpu {cpu}   mem {mem}"),
                Style::default().fg(palette::TEXT_SECONDARY),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                " waiting for first status poll",
                Style::default().fg(palette::TEXT_MUTED),
            )));
        }

        lines.push(Line::default());
        lines.extend(Self::metric_lines(
            &self.session.metrics,
            inner.width as usize,
        ));

        for (i, line) in lines.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use botdeck_core::{BotSummary, StatusPayload};

    fn session() -> ConsoleSession {
        let bot: BotSummary = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "greeter", "botType": "discord", "status": "stopped"
        }))
        .unwrap();
        ConsoleSession::new(1, &bot)
    }

    #[test]
    fn test_spark_scaling() {
        let bars = spark(&[0.0, 50.0, 100.0]);
        let chars: Vec<char> = bars.chars().collect();
        assert_eq!(chars.len(), 3);
        assert_eq!(chars[0], '▁');
        assert_eq!(chars[2], '█');
    }

    #[test]
    fn test_spark_all_zero() {
        assert_eq!(spark(&[0.0, 0.0]), "▁▁");
    }

    #[test]
    fn test_renders_phase_and_waiting_note() {
        let mut term = TestTerminal::new();
        let session = session();
        term.render_widget(OverviewPanel::new(&session), term.area());
        assert!(term.buffer_contains("stopped"));
        assert!(term.buffer_contains("waiting for first status poll"));
        assert!(term.buffer_contains("no metrics yet"));
    }

    #[test]
    fn test_renders_status_fields_after_poll() {
        let mut term = TestTerminal::new();
        let mut session = session();
        session.lifecycle.apply_poll(StatusPayload {
            running: true,
            status: Some("running".into()),
            pid: Some(4242),
            cpu_percent: Some(2.5),
            memory_mb: Some(96.0),
        });
        term.render_widget(OverviewPanel::new(&session), term.area());
        assert!(term.buffer_contains("running"));
        assert!(term.buffer_contains("4242"));
        assert!(term.buffer_contains("2.5%"));
        assert!(term.buffer_contains("96 MB"));
    }

    #[test]
    fn test_renders_metric_sparklines() {
        let mut term = TestTerminal::new();
        let mut session = session();
        session.metrics = serde_json::from_value(serde_json::json!([
            {"timestamp": "2026-01-01T00:00:00Z", "cpu_percent": 1.0, "memory_mb": 50.0},
            {"timestamp": "2026-01-01T00:01:00Z", "cpu_percent": 8.0, "memory_mb": 90.0}
        ]))
        .unwrap();
        term.render_widget(OverviewPanel::new(&session), term.area());
        assert!(term.buffer_contains("cpu"));
        assert!(term.buffer_contains("8.0%"));
        assert!(term.buffer_contains("90 MB"));
    }
}
