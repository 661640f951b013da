//! Terminal-agnostic key events
//!
//! The app crate never touches the terminal backend; the TUI layer
//! translates its raw key events into this enum before they enter the
//! update loop, which keeps every handler testable without a terminal.

/// A key press as seen by the update loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    Ctrl(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}
