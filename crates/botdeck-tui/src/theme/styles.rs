//! Shared widget styles

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use botdeck_core::BotPhase;

use super::palette;

/// Standard bordered panel
pub fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        palette::BORDER_ACTIVE
    } else {
        palette::BORDER_DIM
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(format!(" {title} "))
}

/// Status dot, label, and style for a lifecycle phase
pub fn phase_indicator(phase: &BotPhase) -> (&'static str, &'static str, Style) {
    match phase {
        BotPhase::Running => ("●", "running", Style::default().fg(palette::STATUS_GREEN)),
        BotPhase::Stopped => ("○", "stopped", Style::default().fg(palette::TEXT_MUTED)),
        BotPhase::Starting => ("◐", "starting", Style::default().fg(palette::STATUS_YELLOW)),
        BotPhase::Restarting => (
            "◐",
            "restarting",
            Style::default().fg(palette::STATUS_YELLOW),
        ),
        BotPhase::Installing => (
            "◍",
            "installing",
            Style::default().fg(palette::STATUS_BLUE),
        ),
        BotPhase::Error => ("✗", "error", Style::default().fg(palette::STATUS_RED)),
        BotPhase::ErrorStartup => (
            "✗",
            "startup failed",
            Style::default()
                .fg(palette::STATUS_RED)
                .add_modifier(Modifier::BOLD),
        ),
    }
}

/// Status style for a raw summary tag (dashboard rows)
pub fn tag_style(tag: &str) -> Style {
    match tag {
        "running" => Style::default().fg(palette::STATUS_GREEN),
        "starting" | "restarting" => Style::default().fg(palette::STATUS_YELLOW),
        "installing" => Style::default().fg(palette::STATUS_BLUE),
        "error" | "error_startup" => Style::default().fg(palette::STATUS_RED),
        _ => Style::default().fg(palette::TEXT_MUTED),
    }
}

pub fn selected_row() -> Style {
    Style::default()
        .fg(palette::SELECTED_FG)
        .bg(palette::SELECTED_BG)
}

pub fn key_hint() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

pub fn hint_text() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}
