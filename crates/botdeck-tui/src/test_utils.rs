//! Test helpers for widget rendering
//!
//! Widgets are exercised against an in-memory backend and asserted on
//! buffer content, never on escape sequences.

use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Terminal;

/// In-memory terminal for widget tests
pub struct TestTerminal {
    terminal: Terminal<TestBackend>,
    area: Rect,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(100, 30)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("test backend");
        Self {
            terminal,
            area: Rect::new(0, 0, width, height),
        }
    }

    /// Small terminal for layout edge cases
    pub fn compact() -> Self {
        Self::with_size(40, 10)
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("draw");
    }

    /// The whole buffer as one newline-joined string
    pub fn content(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    pub fn buffer_contains(&self, needle: &str) -> bool {
        self.content().contains(needle)
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}
