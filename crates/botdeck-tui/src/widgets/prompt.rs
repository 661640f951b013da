//! Modal input prompt overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Widget},
};

use botdeck_app::PromptState;

use crate::theme::{palette, styles};
use crate::widgets::centered_rect;

/// Centered single-field input (or y/n confirmation)
pub struct PromptOverlay<'a> {
    prompt: &'a PromptState,
}

impl<'a> PromptOverlay<'a> {
    pub fn new(prompt: &'a PromptState) -> Self {
        Self { prompt }
    }
}

impl Widget for PromptOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay = centered_rect(area, area.width.min(64), 4);
        Clear.render(overlay, buf);

        let block =
            styles::panel_block(&self.prompt.kind.title(), true).style(Style::default().bg(palette::POPUP_BG));
        let inner = block.inner(overlay);
        block.render(overlay, buf);
        if inner.height == 0 {
            return;
        }

        if self.prompt.kind.is_confirm() {
            buf.set_line(
                inner.x,
                inner.y,
                &Line::from(Span::styled(" y / n", styles::key_hint())),
                inner.width,
            );
        } else {
            let line = Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    self.prompt.input.clone(),
                    Style::default().fg(palette::TEXT_PRIMARY),
                ),
                Span::styled("▏", Style::default().fg(palette::ACCENT)),
            ]);
            buf.set_line(inner.x, inner.y, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use botdeck_app::PromptKind;

    #[test]
    fn test_text_prompt_shows_title_and_input() {
        let mut term = TestTerminal::new();
        let mut prompt = PromptState::new(PromptKind::NewFile);
        prompt.input = "src/new.js".into();
        term.render_widget(PromptOverlay::new(&prompt), term.area());
        assert!(term.buffer_contains("New file path"));
        assert!(term.buffer_contains("src/new.js"));
    }

    #[test]
    fn test_confirm_prompt_shows_yn() {
        let mut term = TestTerminal::new();
        let prompt = PromptState::new(PromptKind::ConfirmDeleteFile {
            path: "old.txt".into(),
        });
        term.render_widget(PromptOverlay::new(&prompt), term.area());
        assert!(term.buffer_contains("Delete old.txt?"));
        assert!(term.buffer_contains("y / n"));
    }
}
