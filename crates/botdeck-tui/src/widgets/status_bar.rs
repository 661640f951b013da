//! Bottom status bar with the dismissible notice slot

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use botdeck_app::Notice;

use crate::theme::palette;

/// One-line bar: the current notice, or a contextual hint
pub struct StatusBar<'a> {
    notice: Option<&'a Notice>,
    hint: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(notice: Option<&'a Notice>, hint: &'a str) -> Self {
        Self { notice, hint }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let line = match self.notice {
            Some(notice) => {
                let style = if notice.is_error {
                    Style::default()
                        .fg(palette::STATUS_RED)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette::STATUS_GREEN)
                };
                Line::from(vec![
                    Span::styled(format!(" {}", notice.text), style),
                    Span::styled("  (esc to dismiss)", Style::default().fg(palette::TEXT_MUTED)),
                ])
            }
            None => Line::from(Span::styled(
                format!(" {}", self.hint),
                Style::default().fg(palette::TEXT_MUTED),
            )),
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
