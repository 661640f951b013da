//! Widget library
//!
//! Every widget projects model state into the frame and nothing else:
//! no widget reads back what a previous frame drew, so rendering is
//! idempotent over `AppState`.

mod bot_table;
mod db_browser;
mod editor_pane;
mod file_tree;
mod form;
mod header;
mod log_view;
mod overview;
mod prompt;
mod status_bar;

pub use bot_table::BotTable;
pub use db_browser::DbBrowserPane;
pub use editor_pane::EditorPane;
pub use file_tree::FileTreePane;
pub use form::{CreateTableOverlay, RowFormOverlay};
pub use header::MainHeader;
pub use log_view::LogPane;
pub use overview::OverviewPanel;
pub use prompt::PromptOverlay;
pub use status_bar::StatusBar;

use ratatui::layout::Rect;

/// A centered overlay rect clamped to the parent area
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
