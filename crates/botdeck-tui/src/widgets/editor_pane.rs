//! Editor / media preview pane for the open file

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use botdeck_app::file_session::FileSession;

use crate::theme::{palette, styles};

/// Projects the open-file session: a text buffer with cursor, or a
/// media preview pointing at the scratch file.
pub struct EditorPane<'a> {
    files: &'a FileSession,
}

impl<'a> EditorPane<'a> {
    pub fn new(files: &'a FileSession) -> Self {
        Self { files }
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(open) = self.files.open_file() else {
            return;
        };

        let title = match self.files.editor() {
            Some(editor) if editor.is_dirty() => format!("{} *", open.path),
            _ => open.path.clone(),
        };
        let block = styles::panel_block(&title, true);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if let Some(editor) = self.files.editor() {
            let (cursor_row, cursor_col) = editor.cursor();
            let visible = inner.height as usize;
            let offset = cursor_row.saturating_sub(visible.saturating_sub(1));
            for (i, text) in editor.lines().iter().skip(offset).take(visible).enumerate() {
                let row = offset + i;
                let line = if row == cursor_row {
                    Line::from(vec![
                        Span::styled(
                            text.clone(),
                            Style::default()
                                .fg(palette::TEXT_PRIMARY)
                                .add_modifier(Modifier::UNDERLINED),
                        ),
                        Span::styled(
                            format!("  [{}:{}]", cursor_row + 1, cursor_col + 1),
                            styles::hint_text(),
                        ),
                    ])
                } else {
                    Line::from(Span::styled(
                        text.clone(),
                        Style::default().fg(palette::TEXT_PRIMARY),
                    ))
                };
                buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
            }
        } else if let Some(preview) = self.files.preview() {
            let lines = vec![
                Line::from(Span::styled(
                    format!(" {} preview", preview.kind().label()),
                    Style::default().fg(palette::ACCENT),
                )),
                Line::from(Span::styled(
                    format!(" decoded to {}", preview.path().display()),
                    Style::default().fg(palette::TEXT_SECONDARY),
                )),
                Line::default(),
                Line::from(Span::styled(
                    " open the path above in a viewer; esc closes and releases it",
                    styles::hint_text(),
                )),
            ];
            for (i, line) in lines.iter().enumerate() {
                if i as u16 >= inner.height {
                    break;
                }
                buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use botdeck_core::MediaKind;

    #[test]
    fn test_renders_text_buffer_with_title() {
        let mut term = TestTerminal::new();
        let mut files = FileSession::new();
        files.open_text("index.js", "const x = 1;\nconsole.log(x);");
        term.render_widget(EditorPane::new(&files), term.area());
        assert!(term.buffer_contains("index.js"));
        assert!(term.buffer_contains("const x = 1;"));
        assert!(term.buffer_contains("console.log(x);"));
        assert!(!term.buffer_contains("index.js *"));
    }

    #[test]
    fn test_dirty_marker_in_title() {
        let mut term = TestTerminal::new();
        let mut files = FileSession::new();
        files.open_text("index.js", "x");
        files.editor_mut().unwrap().insert_char('!');
        term.render_widget(EditorPane::new(&files), term.area());
        assert!(term.buffer_contains("index.js *"));
    }

    #[test]
    fn test_media_preview_shows_scratch_path() {
        let mut term = TestTerminal::new();
        let mut files = FileSession::new();
        files
            .open_media("logo.png", MediaKind::Image, b"\x89PNG")
            .unwrap();
        term.render_widget(EditorPane::new(&files), term.area());
        assert!(term.buffer_contains("image preview"));
        assert!(term.buffer_contains("decoded to"));
    }

    #[test]
    fn test_no_open_file_renders_nothing() {
        let mut term = TestTerminal::new();
        let files = FileSession::new();
        term.render_widget(EditorPane::new(&files), term.area());
        assert!(!term.buffer_contains("preview"));
    }
}
