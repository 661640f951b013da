//! Color palette

use ratatui::style::Color;

// --- Background layers ---
pub const CARD_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::DarkGray;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;

// --- Selection ---
pub const SELECTED_FG: Color = Color::Black;
pub const SELECTED_BG: Color = Color::Cyan;
