//! Dashboard bot list

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use botdeck_core::BotSummary;

use crate::theme::{palette, styles};

/// Bot list with status, pid, and resource columns
pub struct BotTable<'a> {
    bots: &'a [BotSummary],
    selected: usize,
    loading: bool,
}

impl<'a> BotTable<'a> {
    pub fn new(bots: &'a [BotSummary], selected: usize, loading: bool) -> Self {
        Self {
            bots,
            selected,
            loading,
        }
    }

    fn row_line(&self, bot: &BotSummary, selected: bool) -> Line<'static> {
        let name = format!(" {:<20}", truncate(&bot.name, 20));
        let kind = format!("{:<10}", bot.bot_type.label());
        let status = format!("{:<14}", bot.status);
        let pid = format!(
            "{:<8}",
            bot.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".into())
        );
        let cpu = format!(
            "{:<8}",
            bot.cpu_percent
                .map(|c| format!("{c:.1}%"))
                .unwrap_or_else(|| "-".into())
        );
        let mem = format!(
            "{:<10}",
            bot.memory_mb
                .map(|m| format!("{m:.0} MB"))
                .unwrap_or_else(|| "-".into())
        );

        if selected {
            Line::from(Span::styled(
                format!("{name}{kind}{status}{pid}{cpu}{mem}"),
                styles::selected_row(),
            ))
        } else {
            Line::from(vec![
                Span::styled(name, Style::default().fg(palette::TEXT_PRIMARY)),
                Span::styled(kind, Style::default().fg(palette::TEXT_SECONDARY)),
                Span::styled(status, styles::tag_style(&bot.status)),
                Span::styled(pid, Style::default().fg(palette::TEXT_SECONDARY)),
                Span::styled(cpu, Style::default().fg(palette::TEXT_SECONDARY)),
                Span::styled(mem, Style::default().fg(palette::TEXT_SECONDARY)),
            ])
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

impl Widget for BotTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.loading { "Bots (…)" } else { "Bots" };
        let block = styles::panel_block(title, true);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let header = Line::from(Span::styled(
            format!(
                " {:<20}{:<10}{:<14}{:<8}{:<8}{:<10}",
                "NAME", "TYPE", "STATUS", "PID", "CPU", "MEMORY"
            ),
            styles::hint_text(),
        ));
        buf.set_line(inner.x, inner.y, &header, inner.width);

        if self.bots.is_empty() {
            let empty = Line::from(Span::styled(
                " no bots registered",
                Style::default().fg(palette::TEXT_MUTED),
            ));
            if inner.height > 1 {
                buf.set_line(inner.x, inner.y + 1, &empty, inner.width);
            }
            return;
        }

        let visible = inner.height.saturating_sub(1) as usize;
        let offset = self.selected.saturating_sub(visible.saturating_sub(1));
        for (i, bot) in self.bots.iter().skip(offset).take(visible).enumerate() {
            let line = self.row_line(bot, offset + i == self.selected);
            buf.set_line(inner.x, inner.y + 1 + i as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    fn bots() -> Vec<BotSummary> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "greeter", "botType": "discord", "status": "running", "pid": 42,
             "cpuPercent": 1.5, "memoryMb": 80.0},
            {"id": 2, "name": "digest", "botType": "telegram", "status": "installing"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_renders_columns() {
        let mut term = TestTerminal::new();
        let bots = bots();
        term.render_widget(BotTable::new(&bots, 0, false), term.area());
        assert!(term.buffer_contains("NAME"));
        assert!(term.buffer_contains("greeter"));
        assert!(term.buffer_contains("discord"));
        assert!(term.buffer_contains("running"));
        assert!(term.buffer_contains("42"));
        assert!(term.buffer_contains("installing"));
    }

    #[test]
    fn test_missing_metrics_render_dashes() {
        let mut term = TestTerminal::new();
        let bots = bots();
        term.render_widget(BotTable::new(&bots, 1, false), term.area());
        assert!(term.buffer_contains("-"));
    }

    #[test]
    fn test_empty_list() {
        let mut term = TestTerminal::new();
        term.render_widget(BotTable::new(&[], 0, false), term.area());
        assert!(term.buffer_contains("no bots registered"));
    }

    #[test]
    fn test_loading_marker() {
        let mut term = TestTerminal::new();
        let bots = bots();
        term.render_widget(BotTable::new(&bots, 0, true), term.area());
        assert!(term.buffer_contains("Bots (…)"));
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 20), "short");
        let long = "a-very-long-bot-name-that-overflows";
        let cut = truncate(long, 20);
        assert!(cut.chars().count() <= 20);
        assert!(cut.ends_with('…'));
    }
}
