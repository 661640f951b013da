//! Remote log tail pane

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use botdeck_app::logs::LogView;

use crate::theme::{palette, styles};

/// Shows the window of the log tail ending at the scroll position
pub struct LogPane<'a> {
    logs: &'a LogView,
}

impl<'a> LogPane<'a> {
    pub fn new(logs: &'a LogView) -> Self {
        Self { logs }
    }
}

impl Widget for LogPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.logs.auto_refresh {
            "Logs (auto)"
        } else {
            "Logs"
        };
        let block = styles::panel_block(title, true);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.logs.is_empty() {
            buf.set_line(
                inner.x,
                inner.y,
                &Line::from(Span::styled(
                    " no log lines — press a to toggle auto-refresh",
                    Style::default().fg(palette::TEXT_MUTED),
                )),
                inner.width,
            );
            return;
        }

        let visible = inner.height as usize;
        let end = self.logs.scroll.max(visible.min(self.logs.len()));
        let start = end.saturating_sub(visible);
        for (i, line) in self.logs.lines()[start..end.min(self.logs.len())]
            .iter()
            .enumerate()
        {
            let styled = Line::from(Span::styled(
                line.clone(),
                Style::default().fg(palette::TEXT_PRIMARY),
            ));
            buf.set_line(inner.x, inner.y + i as u16, &styled, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_empty_logs_hint() {
        let mut term = TestTerminal::new();
        let logs = LogView::new();
        term.render_widget(LogPane::new(&logs), term.area());
        assert!(term.buffer_contains("no log lines"));
    }

    #[test]
    fn test_follow_shows_tail() {
        let mut term = TestTerminal::with_size(60, 8);
        let mut logs = LogView::new();
        logs.set_lines((0..50).map(|i| format!("line {i}")).collect());
        term.render_widget(LogPane::new(&logs), term.area());
        assert!(term.buffer_contains("line 49"));
        assert!(!term.buffer_contains("line 0 "));
    }

    #[test]
    fn test_scrolled_up_shows_reading_position() {
        let mut term = TestTerminal::with_size(60, 8);
        let mut logs = LogView::new();
        logs.set_lines((0..50).map(|i| format!("line {i}")).collect());
        logs.scroll_up(30);
        term.render_widget(LogPane::new(&logs), term.area());
        assert!(term.buffer_contains("line 19"));
        assert!(!term.buffer_contains("line 49"));
    }

    #[test]
    fn test_auto_refresh_title() {
        let mut term = TestTerminal::new();
        let mut logs = LogView::new();
        logs.toggle_auto_refresh();
        term.render_widget(LogPane::new(&logs), term.area());
        assert!(term.buffer_contains("Logs (auto)"));
    }
}
