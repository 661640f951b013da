//! Top-level frame projection
//!
//! `view` draws the whole UI from `AppState` alone, every loop
//! iteration. It is idempotent: the same state always produces the same
//! frame, and nothing here reads terminal contents back.

use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use botdeck_app::{AppState, DetailTab, View};

use crate::widgets::{
    BotTable, CreateTableOverlay, DbBrowserPane, EditorPane, FileTreePane, LogPane, MainHeader,
    OverviewPanel, PromptOverlay, RowFormOverlay, StatusBar,
};

/// Render the full application state into a frame
pub fn view(frame: &mut Frame, state: &AppState) {
    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(MainHeader::new(state), header_area);

    match state.view {
        View::Dashboard => {
            frame.render_widget(
                BotTable::new(&state.bots, state.selected, state.bots_loading),
                body_area,
            );
        }
        View::Detail => {
            if let Some(session) = state.session.as_ref() {
                match session.tab {
                    DetailTab::Overview => {
                        frame.render_widget(OverviewPanel::new(session), body_area);
                    }
                    DetailTab::Files => {
                        if session.files.open_file().is_some() {
                            let [tree_area, editor_area] = Layout::horizontal([
                                Constraint::Percentage(35),
                                Constraint::Percentage(65),
                            ])
                            .areas(body_area);
                            frame.render_widget(
                                FileTreePane::new(&session.tree, session.tree_loading),
                                tree_area,
                            );
                            frame.render_widget(EditorPane::new(&session.files), editor_area);
                        } else {
                            frame.render_widget(
                                FileTreePane::new(&session.tree, session.tree_loading),
                                body_area,
                            );
                        }
                    }
                    DetailTab::Database => {
                        frame.render_widget(DbBrowserPane::new(&session.db), body_area);
                    }
                    DetailTab::Logs => {
                        frame.render_widget(LogPane::new(&session.logs), body_area);
                    }
                }

                if let Some(form) = session.db.form.as_ref() {
                    frame.render_widget(RowFormOverlay::new(form), body_area);
                }
                if let Some(form) = session.db.create_table.as_ref() {
                    frame.render_widget(CreateTableOverlay::new(form), body_area);
                }
            }
        }
    }

    frame.render_widget(
        StatusBar::new(state.notice.as_ref(), hint_for(state)),
        status_area,
    );

    if let Some(prompt) = state.prompt.as_ref() {
        frame.render_widget(PromptOverlay::new(prompt), body_area);
    }
}

fn hint_for(state: &AppState) -> &'static str {
    match state.view {
        View::Dashboard => "j/k move · enter open · s start · x stop · R restart · d delete",
        View::Detail => match state.session.as_ref().map(|s| s.tab) {
            Some(DetailTab::Files) => {
                "enter open/toggle · n new · N mkdir · m rename · D delete · u upload · g download"
            }
            Some(DetailTab::Database) => {
                "enter drill in · c new row · D delete row · T new table · : query"
            }
            Some(DetailTab::Logs) => "a auto-refresh · j/k scroll · G tail",
            _ => "1-4 switch tabs · esc back",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botdeck_app::config::Settings;
    use botdeck_core::BotSummary;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| view(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn bot() -> BotSummary {
        serde_json::from_value(serde_json::json!({
            "id": 1, "name": "greeter", "botType": "discord", "status": "running"
        }))
        .unwrap()
    }

    #[test]
    fn test_dashboard_view() {
        let mut state = AppState::new(Settings::default());
        state.bots = vec![bot()];
        let frame = draw(&state);
        assert!(frame.contains("Botdeck"));
        assert!(frame.contains("greeter"));
        assert!(frame.contains("enter open"));
    }

    #[test]
    fn test_detail_view_tabs_render() {
        let mut state = AppState::new(Settings::default());
        state.bots = vec![bot()];
        state.open_session(&bot());
        let frame = draw(&state);
        assert!(frame.contains("Overview"));

        state.session.as_mut().unwrap().tab = DetailTab::Logs;
        let frame = draw(&state);
        assert!(frame.contains("Logs"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut state = AppState::new(Settings::default());
        state.bots = vec![bot()];
        state.open_session(&bot());
        assert_eq!(draw(&state), draw(&state));
    }

    #[test]
    fn test_prompt_overlay_drawn_on_top() {
        let mut state = AppState::new(Settings::default());
        state.bots = vec![bot()];
        state.prompt = Some(botdeck_app::PromptState::new(
            botdeck_app::PromptKind::NewFile,
        ));
        let frame = draw(&state);
        assert!(frame.contains("New file path"));
    }
}
