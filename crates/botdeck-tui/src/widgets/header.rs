//! Header bar: app title, context, phase dot, and action hints

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use botdeck_app::{AppState, DetailTab, View};

use crate::theme::{palette, styles};

/// Main header showing app title, current context, and keybindings.
///
/// Action hints are derived from the lifecycle model's *shown* action
/// table, the same table the update loop gates dispatch on, so the
/// hints can never disagree with what a key would actually do.
pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn left_spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                "Botdeck",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(session) = self.state.session.as_ref() {
            let (icon, _, style) = styles::phase_indicator(&session.lifecycle.phase());
            spans.push(Span::raw(" "));
            spans.push(Span::styled("/", styles::hint_text()));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                session.bot_name.clone(),
                Style::default().fg(palette::TEXT_SECONDARY),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(icon, style));
        }
        spans
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        let mut hints: Vec<(&str, &str)> = Vec::new();
        match self.state.view {
            View::Dashboard => {
                hints.push(("enter", "Open"));
                hints.push(("r", "Refresh"));
                hints.push(("d", "Delete"));
                hints.push(("q", "Quit"));
            }
            View::Detail => {
                if let Some(session) = self.state.session.as_ref() {
                    let shown = session.lifecycle.shown_actions();
                    if shown.start {
                        hints.push(("s", "Start"));
                    }
                    if shown.stop {
                        hints.push(("x", "Stop"));
                    }
                    if shown.restart {
                        hints.push(("r", "Restart"));
                    }
                    if shown.is_empty() {
                        hints.push(("…", "busy"));
                    }
                }
                hints.push(("esc", "Back"));
            }
        }

        let mut spans = Vec::new();
        for (key, label) in hints {
            spans.push(Span::styled("[", styles::hint_text()));
            spans.push(Span::styled(key.to_string(), styles::key_hint()));
            spans.push(Span::styled(format!("] {label}  "), styles::hint_text()));
        }
        spans
    }

    fn tab_spans(&self) -> Vec<Span<'static>> {
        let Some(session) = self.state.session.as_ref() else {
            return Vec::new();
        };
        let mut spans = Vec::new();
        for (index, tab) in [
            DetailTab::Overview,
            DetailTab::Files,
            DetailTab::Database,
            DetailTab::Logs,
        ]
        .into_iter()
        .enumerate()
        {
            let style = if session.tab == tab {
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                styles::hint_text()
            };
            spans.push(Span::styled(
                format!("{}:{} ", index + 1, tab.title()),
                style,
            ));
        }
        spans
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::panel_block("", false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let left = Line::from(self.left_spans());
        let left_width = left.width() as u16;
        buf.set_line(inner.x, inner.y, &left, inner.width);

        let hints = Line::from(self.hint_spans());
        let hints_width = hints.width() as u16;
        let hints_x = inner.x + left_width + 2;
        if hints_x + hints_width <= inner.x + inner.width {
            buf.set_line(hints_x, inner.y, &hints, hints_width);
        }

        let tabs = Line::from(self.tab_spans());
        let tabs_width = tabs.width() as u16;
        if tabs_width > 0 && inner.width > tabs_width {
            let tabs_x = inner.x + inner.width - tabs_width;
            if tabs_x >= hints_x + hints_width {
                buf.set_line(tabs_x, inner.y, &tabs, tabs_width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use botdeck_app::config::Settings;
    use botdeck_core::BotSummary;

    fn state_with_session() -> AppState {
        let mut state = AppState::new(Settings::default());
        let bot: BotSummary = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "greeter", "botType": "discord", "status": "stopped"
        }))
        .unwrap();
        state.bots = vec![bot.clone()];
        state.open_session(&bot);
        state
    }

    #[test]
    fn test_header_renders_title() {
        let mut term = TestTerminal::new();
        let state = AppState::new(Settings::default());
        term.render_widget(MainHeader::new(&state), term.area());
        assert!(term.buffer_contains("Botdeck"));
    }

    #[test]
    fn test_dashboard_hints() {
        let mut term = TestTerminal::new();
        let state = AppState::new(Settings::default());
        term.render_widget(MainHeader::new(&state), term.area());
        assert!(term.buffer_contains("[enter] Open"));
        assert!(term.buffer_contains("[q] Quit"));
    }

    #[test]
    fn test_detail_header_shows_bot_and_tabs() {
        let mut term = TestTerminal::new();
        let state = state_with_session();
        term.render_widget(MainHeader::new(&state), term.area());
        assert!(term.buffer_contains("greeter"));
        assert!(term.buffer_contains("1:Overview"));
        assert!(term.buffer_contains("4:Logs"));
    }

    #[test]
    fn test_stopped_bot_offers_start_only() {
        let mut term = TestTerminal::new();
        let state = state_with_session();
        term.render_widget(MainHeader::new(&state), term.area());
        assert!(term.buffer_contains("[s] Start"));
        assert!(!term.buffer_contains("[x] Stop"));
        assert!(!term.buffer_contains("[r] Restart"));
    }

    #[test]
    fn test_busy_bot_offers_nothing() {
        let mut term = TestTerminal::new();
        let mut state = state_with_session();
        let session = state.session.as_mut().unwrap();
        session.lifecycle.apply_poll(botdeck_core::StatusPayload {
            running: false,
            status: Some("installing".into()),
            ..Default::default()
        });
        term.render_widget(MainHeader::new(&state), term.area());
        assert!(!term.buffer_contains("[s] Start"));
        assert!(!term.buffer_contains("[x] Stop"));
        assert!(term.buffer_contains("busy"));
    }

    #[test]
    fn test_compact_header_does_not_panic() {
        let mut term = TestTerminal::compact();
        let state = state_with_session();
        term.render_widget(MainHeader::new(&state), term.area());
        assert!(term.buffer_contains("Botdeck"));
    }
}
