//! Line-based text buffer for the file editing pane

/// Editable buffer for the currently open text file
#[derive(Debug, Clone, Default)]
pub struct EditorBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    /// First visible line (the renderer keeps the cursor in view)
    pub scroll: usize,
    dirty: bool,
    read_only: bool,
}

impl EditorBuffer {
    pub fn from_content(content: &str) -> Self {
        let mut lines: Vec<String> = content.split('\n').map(String::from).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            ..Default::default()
        }
    }

    pub fn read_only(content: &str) -> Self {
        let mut buffer = Self::from_content(content);
        buffer.read_only = true;
        buffer
    }

    /// Reassemble the buffer for saving
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Called after a confirmed save; only the dirty flag changes
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn insert_char(&mut self, c: char) {
        if self.read_only {
            return;
        }
        let col = self.clamped_col();
        let idx = byte_index(&self.lines[self.cursor_row], col);
        self.lines[self.cursor_row].insert(idx, c);
        self.cursor_col = col + 1;
        self.dirty = true;
    }

    pub fn insert_newline(&mut self) {
        if self.read_only {
            return;
        }
        let col = self.clamped_col();
        let split = byte_index(&self.lines[self.cursor_row], col);
        let rest = self.lines[self.cursor_row].split_off(split);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.dirty = true;
    }

    pub fn backspace(&mut self) {
        if self.read_only {
            return;
        }
        let col = self.clamped_col();
        if col > 0 {
            let start = byte_index(&self.lines[self.cursor_row], col - 1);
            let end = byte_index(&self.lines[self.cursor_row], col);
            self.lines[self.cursor_row].replace_range(start..end, "");
            self.cursor_col = col - 1;
            self.dirty = true;
        } else if self.cursor_row > 0 {
            let current = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = char_len(&self.lines[self.cursor_row]);
            self.lines[self.cursor_row].push_str(&current);
            self.dirty = true;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.cursor_row = (self.cursor_row + 1).min(self.lines.len().saturating_sub(1));
    }

    pub fn move_left(&mut self) {
        let col = self.clamped_col();
        if col > 0 {
            self.cursor_col = col - 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = char_len(&self.lines[self.cursor_row]);
        }
    }

    pub fn move_right(&mut self) {
        let col = self.clamped_col();
        if col < char_len(&self.lines[self.cursor_row]) {
            self.cursor_col = col + 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    /// Column clamped to the current line's length (moving between lines
    /// of different lengths leaves the stored column past the end)
    fn clamped_col(&self) -> usize {
        self.cursor_col.min(char_len(&self.lines[self.cursor_row]))
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_index(s: &str, char_col: usize) -> usize {
    s.char_indices()
        .nth(char_col)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_content() {
        let buffer = EditorBuffer::from_content("a\nb\nc");
        assert_eq!(buffer.lines().len(), 3);
        assert_eq!(buffer.content(), "a\nb\nc");
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_insert_marks_dirty() {
        let mut buffer = EditorBuffer::from_content("hello");
        buffer.move_right();
        buffer.insert_char('!');
        assert!(buffer.is_dirty());
        assert_eq!(buffer.content(), "h!ello");
    }

    #[test]
    fn test_newline_splits_line() {
        let mut buffer = EditorBuffer::from_content("hello");
        for _ in 0..2 {
            buffer.move_right();
        }
        buffer.insert_newline();
        assert_eq!(buffer.content(), "he\nllo");
        assert_eq!(buffer.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buffer = EditorBuffer::from_content("he\nllo");
        buffer.move_down();
        buffer.backspace();
        assert_eq!(buffer.content(), "hello");
        assert_eq!(buffer.cursor(), (0, 2));
    }

    #[test]
    fn test_backspace_within_line() {
        let mut buffer = EditorBuffer::from_content("abc");
        buffer.move_right();
        buffer.move_right();
        buffer.backspace();
        assert_eq!(buffer.content(), "ac");
    }

    #[test]
    fn test_mark_saved_only_clears_dirty() {
        let mut buffer = EditorBuffer::from_content("x");
        buffer.insert_char('y');
        assert!(buffer.is_dirty());
        let content = buffer.content();
        buffer.mark_saved();
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.content(), content);
    }

    #[test]
    fn test_read_only_rejects_edits() {
        let mut buffer = EditorBuffer::read_only("locked");
        buffer.insert_char('x');
        buffer.backspace();
        buffer.insert_newline();
        assert_eq!(buffer.content(), "locked");
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buffer = EditorBuffer::from_content("héllo");
        buffer.move_right();
        buffer.move_right();
        buffer.backspace();
        assert_eq!(buffer.content(), "hllo");
    }

    #[test]
    fn test_cursor_clamps_across_lines() {
        let mut buffer = EditorBuffer::from_content("long line\nab");
        for _ in 0..9 {
            buffer.move_right();
        }
        buffer.move_down();
        buffer.insert_char('!');
        assert_eq!(buffer.content(), "long line\nab!");
    }
}
