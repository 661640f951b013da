//! SQLite browser pane: databases → tables → rows

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use botdeck_app::session::{DatabaseBrowser, DbLevel};
use serde_json::Value;

use crate::theme::{palette, styles};

/// Projects the browser's drill-down level into a list or rows grid
pub struct DbBrowserPane<'a> {
    db: &'a DatabaseBrowser,
}

impl<'a> DbBrowserPane<'a> {
    pub fn new(db: &'a DatabaseBrowser) -> Self {
        Self { db }
    }

    fn title(&self) -> String {
        let base = match (&self.db.selected_db, &self.db.selected_table) {
            (Some(db), Some(table)) => format!("Database {db} · {table}"),
            (Some(db), None) => format!("Database {db}"),
            _ => "Databases".to_string(),
        };
        if self.db.loading {
            format!("{base} (…)")
        } else {
            base
        }
    }

    fn render_list(items: &[String], cursor: usize, inner: Rect, buf: &mut Buffer, empty: &str) {
        if items.is_empty() {
            buf.set_line(
                inner.x,
                inner.y,
                &Line::from(Span::styled(
                    format!(" {empty}"),
                    Style::default().fg(palette::TEXT_MUTED),
                )),
                inner.width,
            );
            return;
        }
        let visible = inner.height as usize;
        let offset = cursor.saturating_sub(visible.saturating_sub(1));
        for (i, item) in items.iter().skip(offset).take(visible).enumerate() {
            let line = if offset + i == cursor {
                Line::from(Span::styled(format!(" {item}"), styles::selected_row()))
            } else {
                Line::from(Span::styled(
                    format!(" {item}"),
                    Style::default().fg(palette::TEXT_PRIMARY),
                ))
            };
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }

    fn cell_text(value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => "∅".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    fn render_rows(&self, inner: Rect, buf: &mut Buffer) {
        let names: Vec<&str> = self.db.columns.iter().map(|c| c.name.as_str()).collect();
        let width = 16usize;

        let header: String = names
            .iter()
            .map(|n| format!("{:<width$}", truncate(n, width - 1)))
            .collect();
        buf.set_line(
            inner.x,
            inner.y,
            &Line::from(Span::styled(format!(" {header}"), styles::hint_text())),
            inner.width,
        );

        if self.db.rows.is_empty() {
            if inner.height > 1 {
                buf.set_line(
                    inner.x,
                    inner.y + 1,
                    &Line::from(Span::styled(
                        " no rows — press c to create one",
                        Style::default().fg(palette::TEXT_MUTED),
                    )),
                    inner.width,
                );
            }
            return;
        }

        let visible = inner.height.saturating_sub(1) as usize;
        let offset = self.db.row_cursor.saturating_sub(visible.saturating_sub(1));
        for (i, row) in self.db.rows.iter().skip(offset).take(visible).enumerate() {
            let text: String = names
                .iter()
                .map(|n| format!("{:<width$}", truncate(&Self::cell_text(row.get(*n)), width - 1)))
                .collect();
            let line = if offset + i == self.db.row_cursor {
                Line::from(Span::styled(format!(" {text}"), styles::selected_row()))
            } else {
                Line::from(Span::styled(
                    format!(" {text}"),
                    Style::default().fg(palette::TEXT_PRIMARY),
                ))
            };
            buf.set_line(inner.x, inner.y + 1 + i as u16, &line, inner.width);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

impl Widget for DbBrowserPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = self.title();
        let block = styles::panel_block(&title, true);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut body = inner;
        if let Some(result) = &self.db.query_result {
            let summary = match result.rows_affected {
                Some(n) => format!(" query ok · {n} rows affected"),
                None => format!(" query ok · {} rows returned", result.rows.len()),
            };
            buf.set_line(
                body.x,
                body.y,
                &Line::from(Span::styled(
                    summary,
                    Style::default().fg(palette::STATUS_GREEN),
                )),
                body.width,
            );
            body.y += 1;
            body.height = body.height.saturating_sub(1);
        }

        match self.db.level {
            DbLevel::Databases => Self::render_list(
                &self.db.databases,
                self.db.db_cursor,
                body,
                buf,
                "no databases found",
            ),
            DbLevel::Tables => Self::render_list(
                &self.db.tables,
                self.db.table_cursor,
                body,
                buf,
                "no tables — press T to create one",
            ),
            DbLevel::Rows => self.render_rows(body, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use botdeck_core::{TableColumn, TableRow};

    fn rows_browser() -> DatabaseBrowser {
        let mut db = DatabaseBrowser::default();
        db.set_databases(vec!["main.db".into()]);
        db.enter_selected_db();
        db.set_tables("main.db".into(), vec!["posts".into()]);
        db.enter_selected_table();
        let columns: Vec<TableColumn> = serde_json::from_value(serde_json::json!([
            {"name": "id", "type": "INTEGER", "pk": 1},
            {"name": "title", "type": "TEXT"}
        ]))
        .unwrap();
        let rows: Vec<TableRow> = vec![
            serde_json::json!({"id": 1, "title": "hello"})
                .as_object()
                .cloned()
                .unwrap(),
            serde_json::json!({"id": 2, "title": null})
                .as_object()
                .cloned()
                .unwrap(),
        ];
        db.set_table_data("posts".into(), columns, rows);
        db
    }

    #[test]
    fn test_database_list_level() {
        let mut term = TestTerminal::new();
        let mut db = DatabaseBrowser::default();
        db.set_databases(vec!["main.db".into(), "cache.db".into()]);
        term.render_widget(DbBrowserPane::new(&db), term.area());
        assert!(term.buffer_contains("Databases"));
        assert!(term.buffer_contains("main.db"));
        assert!(term.buffer_contains("cache.db"));
    }

    #[test]
    fn test_rows_level_grid() {
        let mut term = TestTerminal::new();
        let db = rows_browser();
        term.render_widget(DbBrowserPane::new(&db), term.area());
        assert!(term.buffer_contains("Database main.db · posts"));
        assert!(term.buffer_contains("id"));
        assert!(term.buffer_contains("title"));
        assert!(term.buffer_contains("hello"));
        assert!(term.buffer_contains("∅"), "null cells render as ∅");
    }

    #[test]
    fn test_empty_table_hint() {
        let mut term = TestTerminal::new();
        let mut db = rows_browser();
        db.rows.clear();
        db.row_cursor = 0;
        term.render_widget(DbBrowserPane::new(&db), term.area());
        assert!(term.buffer_contains("no rows"));
    }

    #[test]
    fn test_query_result_summary() {
        let mut term = TestTerminal::new();
        let mut db = rows_browser();
        let payload: botdeck_api::ExecutePayload =
            serde_json::from_value(serde_json::json!({"rows": [], "rows_affected": 3})).unwrap();
        db.query_result = Some(payload);
        term.render_widget(DbBrowserPane::new(&db), term.area());
        assert!(term.buffer_contains("3 rows affected"));
    }
}
