//! Row and create-table form overlays

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

use botdeck_app::schema_form::{CreateTableForm, FieldWidget, FormMode, RowForm};

use crate::theme::{palette, styles};
use crate::widgets::centered_rect;

fn widget_tag(widget: FieldWidget) -> &'static str {
    match widget {
        FieldWidget::Number => "#",
        FieldWidget::TextArea => "¶",
        FieldWidget::Text => "a",
    }
}

/// Row create/edit form generated from the table structure
pub struct RowFormOverlay<'a> {
    form: &'a RowForm,
}

impl<'a> RowFormOverlay<'a> {
    pub fn new(form: &'a RowForm) -> Self {
        Self { form }
    }
}

impl Widget for RowFormOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (self.form.fields.len() as u16 + 3).min(area.height);
        let overlay = centered_rect(area, area.width.min(70), height);
        Clear.render(overlay, buf);

        let title = match self.form.mode {
            FormMode::Create => "New row",
            FormMode::Edit => "Edit row",
        };
        let block = styles::panel_block(title, true).style(Style::default().bg(palette::POPUP_BG));
        let inner = block.inner(overlay);
        block.render(overlay, buf);

        for (i, (field, input)) in self
            .form
            .fields
            .iter()
            .zip(self.form.inputs.iter())
            .enumerate()
        {
            if i as u16 >= inner.height.saturating_sub(1) {
                break;
            }
            let focused = i == self.form.focus;
            let marker = if focused { ">" } else { " " };
            let required = if field.required { "*" } else { " " };
            let name_style = if field.disabled {
                Style::default().fg(palette::TEXT_MUTED)
            } else if focused {
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette::TEXT_SECONDARY)
            };
            let value_style = if field.disabled {
                Style::default().fg(palette::TEXT_MUTED)
            } else {
                Style::default().fg(palette::TEXT_PRIMARY)
            };
            let line = Line::from(vec![
                Span::styled(format!("{marker} "), styles::key_hint()),
                Span::styled(
                    format!("{required}{} {:<14}", widget_tag(field.widget), field.name),
                    name_style,
                ),
                Span::styled(input.clone(), value_style),
                if focused && !field.disabled {
                    Span::styled("▏", Style::default().fg(palette::ACCENT))
                } else {
                    Span::raw("")
                },
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }

        if inner.height > 0 {
            let hint = Line::from(Span::styled(
                " tab next · enter submit · esc cancel",
                styles::hint_text(),
            ));
            buf.set_line(
                inner.x,
                inner.y + inner.height.saturating_sub(1),
                &hint,
                inner.width,
            );
        }
    }
}

/// Create-table form with the single-pk column list
pub struct CreateTableOverlay<'a> {
    form: &'a CreateTableForm,
}

impl<'a> CreateTableOverlay<'a> {
    pub fn new(form: &'a CreateTableForm) -> Self {
        Self { form }
    }
}

impl Widget for CreateTableOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (self.form.columns.len() as u16 + 4).min(area.height);
        let overlay = centered_rect(area, area.width.min(70), height);
        Clear.render(overlay, buf);

        let title = format!("Create table {}", self.form.table_name);
        let block = styles::panel_block(&title, true).style(Style::default().bg(palette::POPUP_BG));
        let inner = block.inner(overlay);
        block.render(overlay, buf);
        if inner.height == 0 {
            return;
        }

        if self.form.columns.is_empty() {
            buf.set_line(
                inner.x,
                inner.y,
                &Line::from(Span::styled(
                    " no columns yet — press a to add one",
                    Style::default().fg(palette::TEXT_MUTED),
                )),
                inner.width,
            );
        }

        for (i, column) in self.form.columns.iter().enumerate() {
            if i as u16 >= inner.height.saturating_sub(1) {
                break;
            }
            let marker = if i == self.form.cursor { ">" } else { " " };
            let pk = if column.pk { "[pk]" } else { "    " };
            let notnull = if column.notnull { "[notnull]" } else { "" };
            let line = Line::from(vec![
                Span::styled(format!("{marker} "), styles::key_hint()),
                Span::styled(
                    format!("{:<16}{:<10}", column.name, column.col_type),
                    Style::default().fg(palette::TEXT_PRIMARY),
                ),
                Span::styled(
                    format!("{pk} {notnull}"),
                    Style::default().fg(palette::STATUS_YELLOW),
                ),
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }

        let hint = Line::from(Span::styled(
            " a add · space pk · n notnull · enter create · esc cancel",
            styles::hint_text(),
        ));
        buf.set_line(
            inner.x,
            inner.y + inner.height.saturating_sub(1),
            &hint,
            inner.width,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use botdeck_app::schema_form::ColumnDraft;
    use botdeck_core::TableColumn;

    fn columns() -> Vec<TableColumn> {
        serde_json::from_value(serde_json::json!([
            {"name": "id", "type": "INTEGER", "notnull": 1, "pk": 1},
            {"name": "title", "type": "TEXT", "notnull": 1, "pk": 0}
        ]))
        .unwrap()
    }

    #[test]
    fn test_create_form_omits_pk_field() {
        let mut term = TestTerminal::new();
        let form = RowForm::new(&columns(), FormMode::Create, None, None);
        term.render_widget(RowFormOverlay::new(&form), term.area());
        assert!(term.buffer_contains("New row"));
        assert!(term.buffer_contains("title"));
        assert!(!term.buffer_contains("id"));
    }

    #[test]
    fn test_edit_form_shows_disabled_pk() {
        let mut term = TestTerminal::new();
        let row = serde_json::json!({"id": 3, "title": "hi"})
            .as_object()
            .cloned()
            .unwrap();
        let form = RowForm::new(
            &columns(),
            FormMode::Edit,
            Some(&row),
            Some(serde_json::json!(3)),
        );
        term.render_widget(RowFormOverlay::new(&form), term.area());
        assert!(term.buffer_contains("Edit row"));
        assert!(term.buffer_contains("id"));
        assert!(term.buffer_contains("3"));
        assert!(term.buffer_contains("hi"));
    }

    #[test]
    fn test_required_marker() {
        let mut term = TestTerminal::new();
        let form = RowForm::new(&columns(), FormMode::Create, None, None);
        term.render_widget(RowFormOverlay::new(&form), term.area());
        assert!(term.buffer_contains("*"));
    }

    #[test]
    fn test_create_table_overlay_lists_columns() {
        let mut term = TestTerminal::new();
        let mut form = CreateTableForm::new();
        form.table_name = "posts".into();
        form.add_column(ColumnDraft {
            name: "id".into(),
            col_type: "INTEGER".into(),
            notnull: true,
            pk: true,
        });
        term.render_widget(CreateTableOverlay::new(&form), term.area());
        assert!(term.buffer_contains("Create table posts"));
        assert!(term.buffer_contains("INTEGER"));
        assert!(term.buffer_contains("[pk]"));
        assert!(term.buffer_contains("[notnull]"));
    }

    #[test]
    fn test_create_table_overlay_empty_hint() {
        let mut term = TestTerminal::new();
        let mut form = CreateTableForm::new();
        form.table_name = "posts".into();
        term.render_widget(CreateTableOverlay::new(&form), term.area());
        assert!(term.buffer_contains("no columns yet"));
    }
}
