//! # botdeck-tui - Terminal UI
//!
//! Renders `botdeck_app::AppState` into ratatui frames and feeds
//! terminal events back into the update loop. Widgets are pure
//! projections of model state; the one place that touches the real
//! terminal is [`runner::run`].

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
mod test_utils;

pub use runner::run;
