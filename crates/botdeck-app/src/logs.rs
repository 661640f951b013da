//! Remote log tail state
//!
//! The backend returns the last N lines per poll; the buffer is replaced
//! wholesale, and the view keeps an independent scroll offset with a
//! follow mode that sticks to the tail as new lines arrive.

/// Log tail plus view state for one bot
#[derive(Debug, Clone)]
pub struct LogView {
    lines: Vec<String>,
    /// First visible line when not following the tail
    pub scroll: usize,
    /// Stick to the newest lines on refresh
    pub follow: bool,
    /// Whether the 2s refresh timer is running
    pub auto_refresh: bool,
}

impl Default for LogView {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            scroll: 0,
            follow: true,
            auto_refresh: false,
        }
    }
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replace the tail with a fresh poll result
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        if self.follow {
            self.scroll = self.lines.len();
        } else {
            self.scroll = self.scroll.min(self.lines.len());
        }
    }

    /// Toggle the auto-refresh timer; returns the new state
    pub fn toggle_auto_refresh(&mut self) -> bool {
        self.auto_refresh = !self.auto_refresh;
        self.auto_refresh
    }

    pub fn scroll_up(&mut self, by: usize) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(by);
    }

    pub fn scroll_down(&mut self, by: usize) {
        self.scroll = (self.scroll + by).min(self.lines.len());
        if self.scroll == self.lines.len() {
            self.follow = true;
        }
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.lines.len();
        self.follow = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_follow_sticks_to_tail() {
        let mut view = LogView::new();
        view.set_lines(lines(10));
        assert_eq!(view.scroll, 10);

        view.set_lines(lines(20));
        assert_eq!(view.scroll, 20, "follow mode tracks the newest lines");
    }

    #[test]
    fn test_scrolling_up_leaves_follow_mode() {
        let mut view = LogView::new();
        view.set_lines(lines(20));
        view.scroll_up(5);
        assert!(!view.follow);
        assert_eq!(view.scroll, 15);

        // A refresh keeps the reading position
        view.set_lines(lines(25));
        assert_eq!(view.scroll, 15);
    }

    #[test]
    fn test_scroll_to_bottom_resumes_follow() {
        let mut view = LogView::new();
        view.set_lines(lines(20));
        view.scroll_up(10);
        view.scroll_to_end();
        assert!(view.follow);

        view.set_lines(lines(30));
        assert_eq!(view.scroll, 30);
    }

    #[test]
    fn test_scroll_down_to_tail_resumes_follow() {
        let mut view = LogView::new();
        view.set_lines(lines(10));
        view.scroll_up(4);
        view.scroll_down(2);
        assert!(!view.follow);
        view.scroll_down(10);
        assert!(view.follow);
    }

    #[test]
    fn test_auto_refresh_toggle() {
        let mut view = LogView::new();
        assert!(!view.auto_refresh);
        assert!(view.toggle_auto_refresh());
        assert!(!view.toggle_auto_refresh());
    }

    #[test]
    fn test_shrinking_tail_clamps_scroll() {
        let mut view = LogView::new();
        view.set_lines(lines(30));
        view.scroll_up(5);
        view.set_lines(lines(10));
        assert!(view.scroll <= 10);
    }
}
