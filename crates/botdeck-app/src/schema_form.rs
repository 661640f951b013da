//! Typed form generation from table structure metadata
//!
//! Turns a table's column list into input field specs and coerces the
//! user's entries back into a typed row payload. Widget selection is a
//! substring heuristic over the free-text SQL type token: `INT*` and
//! `REAL*` prefixes map to numeric inputs, `TEXT` to a multiline area,
//! and anything unrecognized (including parameterized types such as
//! `VARCHAR(80)` or `NUMERIC`) falls back to the generic single-line
//! text widget. This is a documented approximation, not a SQL type
//! parser.

use serde_json::Value;

use botdeck_api::ColumnDef;
use botdeck_core::prelude::*;
use botdeck_core::{TableColumn, TableRow};

/// Input widget rendered for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidget {
    Number,
    Text,
    TextArea,
}

/// Whether the form creates a new row or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// One input field derived from a column
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub widget: FieldWidget,
    pub required: bool,
    pub disabled: bool,
    pub default_value: String,
}

/// Heuristic widget selection over the raw type token
pub fn widget_for_type(col_type: &str) -> FieldWidget {
    let token = col_type.trim().to_ascii_uppercase();
    if token.starts_with("INT") || token.starts_with("REAL") {
        FieldWidget::Number
    } else if token.starts_with("TEXT") {
        FieldWidget::TextArea
    } else {
        FieldWidget::Text
    }
}

fn is_integer_type(col_type: &str) -> bool {
    col_type.trim().to_ascii_uppercase().starts_with("INT")
}

/// Render a stored scalar for editing
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strip the quoting SQLite keeps around textual column defaults
fn display_default(dflt: &str) -> String {
    let trimmed = dflt.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build the field list for a row form.
///
/// Create mode omits an integer primary key entirely (assumed
/// auto-increment). Edit mode shows every column but renders primary-key
/// fields disabled; they are never submitted for mutation.
pub fn build_fields(
    columns: &[TableColumn],
    mode: FormMode,
    values: Option<&TableRow>,
) -> Vec<FieldSpec> {
    columns
        .iter()
        .filter(|column| {
            !(mode == FormMode::Create && column.pk && is_integer_type(&column.col_type))
        })
        .map(|column| {
            let default_value = match (mode, values) {
                (FormMode::Edit, Some(row)) => row
                    .get(&column.name)
                    .map(display_value)
                    .unwrap_or_default(),
                _ => column
                    .dflt_value
                    .as_deref()
                    .map(display_default)
                    .unwrap_or_default(),
            };
            FieldSpec {
                name: column.name.clone(),
                widget: widget_for_type(&column.col_type),
                required: column.notnull && !column.pk && column.dflt_value.is_none(),
                disabled: column.pk,
                default_value,
            }
        })
        .collect()
}

/// Coerce submitted inputs into a row payload.
///
/// Fields whose trimmed value is empty are dropped so the backend can
/// apply column defaults, unless they are required, in which case the
/// submission is rejected client-side before any request is built.
/// Primary-key fields are never included, in either mode.
pub fn coerce_submission(
    fields: &[FieldSpec],
    inputs: &[String],
    columns: &[TableColumn],
) -> Result<TableRow> {
    let mut row = TableRow::new();
    for (field, input) in fields.iter().zip(inputs.iter()) {
        let is_pk = columns
            .iter()
            .find(|c| c.name == field.name)
            .map(|c| c.pk)
            .unwrap_or(false);
        if field.disabled || is_pk {
            continue;
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            if field.required {
                return Err(Error::validation(format!("{} is required", field.name)));
            }
            continue;
        }
        let value = match field.widget {
            FieldWidget::Number => parse_number(&field.name, trimmed)?,
            FieldWidget::Text | FieldWidget::TextArea => Value::String(input.clone()),
        };
        row.insert(field.name.clone(), value);
    }
    Ok(row)
}

fn parse_number(name: &str, input: &str) -> Result<Value> {
    if let Ok(int) = input.parse::<i64>() {
        return Ok(Value::from(int));
    }
    if let Ok(float) = input.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Ok(Value::Number(number));
        }
    }
    Err(Error::validation(format!("{name} must be a number")))
}

// ─────────────────────────────────────────────────────────────────────
// Row form state (drives the TUI form overlay)
// ─────────────────────────────────────────────────────────────────────

/// Live state of a row create/edit form
#[derive(Debug, Clone)]
pub struct RowForm {
    pub mode: FormMode,
    pub fields: Vec<FieldSpec>,
    pub inputs: Vec<String>,
    pub focus: usize,
    /// Value identifying the edited row (edit mode only)
    pub row_id: Option<Value>,
}

impl RowForm {
    pub fn new(
        columns: &[TableColumn],
        mode: FormMode,
        values: Option<&TableRow>,
        row_id: Option<Value>,
    ) -> Self {
        let fields = build_fields(columns, mode, values);
        let inputs = fields.iter().map(|f| f.default_value.clone()).collect();
        let focus = fields.iter().position(|f| !f.disabled).unwrap_or(0);
        Self {
            mode,
            fields,
            inputs,
            focus,
            row_id,
        }
    }

    pub fn focused_field(&self) -> Option<&FieldSpec> {
        self.fields.get(self.focus)
    }

    pub fn next_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        let mut next = self.focus;
        for _ in 0..self.fields.len() {
            next = (next + 1) % self.fields.len();
            if !self.fields[next].disabled {
                break;
            }
        }
        self.focus = next;
    }

    pub fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        let mut prev = self.focus;
        for _ in 0..self.fields.len() {
            prev = (prev + self.fields.len() - 1) % self.fields.len();
            if !self.fields[prev].disabled {
                break;
            }
        }
        self.focus = prev;
    }

    pub fn insert_char(&mut self, c: char) {
        if let (Some(field), Some(input)) =
            (self.fields.get(self.focus), self.inputs.get_mut(self.focus))
        {
            if !field.disabled {
                input.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let (Some(field), Some(input)) =
            (self.fields.get(self.focus), self.inputs.get_mut(self.focus))
        {
            if !field.disabled {
                input.pop();
            }
        }
    }

    /// Validate and coerce into the row payload to submit
    pub fn submit(&self, columns: &[TableColumn]) -> Result<TableRow> {
        coerce_submission(&self.fields, &self.inputs, columns)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Create-table form state
// ─────────────────────────────────────────────────────────────────────

/// One column being drafted in the create-table form
#[derive(Debug, Clone, Default)]
pub struct ColumnDraft {
    pub name: String,
    pub col_type: String,
    pub notnull: bool,
    pub pk: bool,
}

/// Parse a compact column spec: `name:TYPE[:pk][:notnull]`.
///
/// The type defaults to `TEXT` when omitted (`name` alone is valid).
pub fn parse_column_spec(spec: &str) -> Result<ColumnDraft> {
    let mut parts = spec.split(':').map(str::trim);
    let name = parts.next().unwrap_or_default();
    if name.is_empty() {
        return Err(Error::validation("column name is required"));
    }
    let mut draft = ColumnDraft {
        name: name.to_string(),
        col_type: "TEXT".to_string(),
        notnull: false,
        pk: false,
    };
    for (index, part) in parts.enumerate() {
        match part.to_ascii_lowercase().as_str() {
            "pk" => draft.pk = true,
            "notnull" => draft.notnull = true,
            "" => {}
            _ if index == 0 => draft.col_type = part.to_string(),
            other => {
                return Err(Error::validation(format!("unknown column flag: {other}")));
            }
        }
    }
    Ok(draft)
}

/// Create-table form enforcing the single-primary-key invariant
#[derive(Debug, Clone, Default)]
pub struct CreateTableForm {
    pub table_name: String,
    pub columns: Vec<ColumnDraft>,
    /// Column under the cursor in the form overlay
    pub cursor: usize,
}

impl CreateTableForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, draft: ColumnDraft) {
        // The backend accepts at most one primary key per table
        if draft.pk {
            for column in &mut self.columns {
                column.pk = false;
            }
        }
        self.columns.push(draft);
        self.cursor = self.columns.len() - 1;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.columns.is_empty() {
            self.cursor = 0;
            return;
        }
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.columns.len() - 1);
    }

    pub fn toggle_notnull(&mut self, index: usize) {
        if let Some(column) = self.columns.get_mut(index) {
            column.notnull = !column.notnull;
        }
    }

    /// Flip the pk checkbox on `index`. Marking a second column resets
    /// the first, non-negotiably, before any request is built.
    pub fn toggle_pk(&mut self, index: usize) {
        if index >= self.columns.len() {
            return;
        }
        let turning_on = !self.columns[index].pk;
        for column in &mut self.columns {
            column.pk = false;
        }
        self.columns[index].pk = turning_on;
    }

    pub fn pk_count(&self) -> usize {
        self.columns.iter().filter(|c| c.pk).count()
    }

    /// Validate and produce the DDL request body
    pub fn build(&self) -> Result<(String, Vec<ColumnDef>)> {
        let name = self.table_name.trim();
        if name.is_empty() {
            return Err(Error::validation("table name is required"));
        }
        if self.columns.is_empty() {
            return Err(Error::validation("at least one column is required"));
        }
        let mut defs = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            if column.name.trim().is_empty() {
                return Err(Error::validation("column name is required"));
            }
            defs.push(ColumnDef {
                name: column.name.trim().to_string(),
                col_type: if column.col_type.trim().is_empty() {
                    "TEXT".to_string()
                } else {
                    column.col_type.trim().to_string()
                },
                notnull: column.notnull,
                pk: column.pk,
            });
        }
        Ok((name.to_string(), defs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<TableColumn> {
        serde_json::from_value(json!([
            {"name": "id", "type": "INTEGER", "notnull": 1, "pk": 1},
            {"name": "title", "type": "TEXT", "notnull": 1, "pk": 0},
            {"name": "score", "type": "REAL", "notnull": 0, "pk": 0},
            {"name": "label", "type": "VARCHAR(80)", "notnull": 0, "pk": 0}
        ]))
        .unwrap()
    }

    #[test]
    fn test_widget_heuristic() {
        assert_eq!(widget_for_type("INTEGER"), FieldWidget::Number);
        assert_eq!(widget_for_type("int"), FieldWidget::Number);
        assert_eq!(widget_for_type("REAL"), FieldWidget::Number);
        assert_eq!(widget_for_type("TEXT"), FieldWidget::TextArea);
        // Parameterized and unrecognized types fall back to plain text
        assert_eq!(widget_for_type("VARCHAR(80)"), FieldWidget::Text);
        assert_eq!(widget_for_type("NUMERIC"), FieldWidget::Text);
        assert_eq!(widget_for_type("BLOB"), FieldWidget::Text);
        assert_eq!(widget_for_type(""), FieldWidget::Text);
    }

    #[test]
    fn test_create_mode_omits_integer_pk() {
        let fields = build_fields(&columns(), FormMode::Create, None);
        assert!(fields.iter().all(|f| f.name != "id"));
        assert_eq!(fields.len(), 3);

        let title = fields.iter().find(|f| f.name == "title").unwrap();
        assert!(title.required);
        assert_eq!(title.widget, FieldWidget::TextArea);
        assert!(!title.disabled);
    }

    #[test]
    fn test_edit_mode_disables_pk() {
        let row: TableRow = json!({"id": 3, "title": "hello", "score": 1.5})
            .as_object()
            .cloned()
            .unwrap();
        let fields = build_fields(&columns(), FormMode::Edit, Some(&row));
        assert_eq!(fields.len(), 4);

        let id = fields.iter().find(|f| f.name == "id").unwrap();
        assert!(id.disabled);
        assert_eq!(id.default_value, "3");

        let title = fields.iter().find(|f| f.name == "title").unwrap();
        assert!(!title.disabled);
        assert_eq!(title.default_value, "hello");
    }

    #[test]
    fn test_spec_two_column_table() {
        let cols: Vec<TableColumn> = serde_json::from_value(json!([
            {"name": "id", "type": "INTEGER", "notnull": 0, "pk": 1},
            {"name": "title", "type": "TEXT", "notnull": 1, "pk": 0}
        ]))
        .unwrap();

        let create = build_fields(&cols, FormMode::Create, None);
        assert_eq!(create.len(), 1);
        assert_eq!(create[0].name, "title");
        assert!(create[0].required);
        assert_eq!(create[0].widget, FieldWidget::TextArea);

        let edit = build_fields(&cols, FormMode::Edit, None);
        assert_eq!(edit.len(), 2);
        assert!(edit.iter().find(|f| f.name == "id").unwrap().disabled);
    }

    #[test]
    fn test_submission_never_contains_pk() {
        let cols = columns();
        for mode in [FormMode::Create, FormMode::Edit] {
            let fields = build_fields(&cols, mode, None);
            let inputs: Vec<String> = fields.iter().map(|_| "7".to_string()).collect();
            let row = coerce_submission(&fields, &inputs, &cols).unwrap();
            assert!(!row.contains_key("id"), "pk leaked in {mode:?}");
        }
    }

    #[test]
    fn test_submission_drops_empty_optional_fields() {
        let cols = columns();
        let fields = build_fields(&cols, FormMode::Create, None);
        let inputs: Vec<String> = fields
            .iter()
            .map(|f| {
                if f.name == "title" {
                    "hello".to_string()
                } else {
                    "  ".to_string()
                }
            })
            .collect();
        let row = coerce_submission(&fields, &inputs, &cols).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("title").unwrap(), &json!("hello"));
    }

    #[test]
    fn test_submission_rejects_empty_required_field() {
        let cols = columns();
        let fields = build_fields(&cols, FormMode::Create, None);
        let inputs: Vec<String> = fields.iter().map(|_| String::new()).collect();
        let err = coerce_submission(&fields, &inputs, &cols).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_submission_coerces_numbers() {
        let cols = columns();
        let fields = build_fields(&cols, FormMode::Create, None);
        let inputs: Vec<String> = fields
            .iter()
            .map(|f| match f.name.as_str() {
                "title" => "x".to_string(),
                "score" => "2.5".to_string(),
                _ => String::new(),
            })
            .collect();
        let row = coerce_submission(&fields, &inputs, &cols).unwrap();
        assert_eq!(row.get("score").unwrap(), &json!(2.5));
    }

    #[test]
    fn test_submission_rejects_non_numeric_input() {
        let cols = columns();
        let fields = build_fields(&cols, FormMode::Create, None);
        let inputs: Vec<String> = fields
            .iter()
            .map(|f| match f.name.as_str() {
                "title" => "x".to_string(),
                "score" => "not-a-number".to_string(),
                _ => String::new(),
            })
            .collect();
        let err = coerce_submission(&fields, &inputs, &cols).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_row_form_skips_disabled_focus() {
        let cols = columns();
        let mut form = RowForm::new(&cols, FormMode::Edit, None, Some(json!(1)));
        // Initial focus lands past the disabled pk field
        assert_eq!(form.focused_field().unwrap().name, "title");
        form.prev_field();
        assert_eq!(form.focused_field().unwrap().name, "label");
        form.next_field();
        assert_eq!(form.focused_field().unwrap().name, "title");
    }

    #[test]
    fn test_row_form_editing() {
        let cols = columns();
        let mut form = RowForm::new(&cols, FormMode::Create, None, None);
        form.insert_char('h');
        form.insert_char('i');
        form.backspace();
        assert_eq!(form.inputs[form.focus], "h");
    }

    #[test]
    fn test_default_values_prefill_create_form() {
        let cols: Vec<TableColumn> = serde_json::from_value(json!([
            {"name": "status", "type": "TEXT", "notnull": 1, "pk": 0, "dflt_value": "'new'"}
        ]))
        .unwrap();
        let fields = build_fields(&cols, FormMode::Create, None);
        assert_eq!(fields[0].default_value, "new");
        // A column default makes the field optional client-side
        assert!(!fields[0].required);
    }

    #[test]
    fn test_create_table_single_pk_invariant() {
        let mut form = CreateTableForm::new();
        form.table_name = "posts".to_string();
        form.add_column(ColumnDraft {
            name: "id".into(),
            col_type: "INTEGER".into(),
            notnull: true,
            pk: true,
        });
        form.add_column(ColumnDraft {
            name: "title".into(),
            col_type: "TEXT".into(),
            notnull: true,
            pk: false,
        });

        // Toggling a second pk resets the first
        form.toggle_pk(1);
        assert_eq!(form.pk_count(), 1);
        assert!(!form.columns[0].pk);
        assert!(form.columns[1].pk);

        // Toggling the same one off leaves zero
        form.toggle_pk(1);
        assert_eq!(form.pk_count(), 0);
    }

    #[test]
    fn test_create_table_adding_pk_column_resets_existing() {
        let mut form = CreateTableForm::new();
        form.add_column(ColumnDraft {
            name: "a".into(),
            pk: true,
            ..Default::default()
        });
        form.add_column(ColumnDraft {
            name: "b".into(),
            pk: true,
            ..Default::default()
        });
        assert_eq!(form.pk_count(), 1);
        assert!(form.columns[1].pk);
    }

    #[test]
    fn test_create_table_build_validation() {
        let mut form = CreateTableForm::new();
        assert!(matches!(
            form.build().unwrap_err(),
            Error::Validation { .. }
        ));

        form.table_name = "posts".to_string();
        assert!(form.build().is_err());

        form.add_column(ColumnDraft {
            name: "id".into(),
            col_type: "INTEGER".into(),
            notnull: true,
            pk: true,
        });
        let (name, defs) = form.build().unwrap();
        assert_eq!(name, "posts");
        assert_eq!(defs.len(), 1);
        assert!(defs[0].pk);
    }

    #[test]
    fn test_parse_column_spec() {
        let draft = parse_column_spec("id:INTEGER:pk").unwrap();
        assert_eq!(draft.name, "id");
        assert_eq!(draft.col_type, "INTEGER");
        assert!(draft.pk);
        assert!(!draft.notnull);

        let draft = parse_column_spec("title:TEXT:notnull").unwrap();
        assert!(draft.notnull);
        assert!(!draft.pk);

        let draft = parse_column_spec("note").unwrap();
        assert_eq!(draft.col_type, "TEXT");

        assert!(parse_column_spec("").is_err());
        assert!(parse_column_spec("x:TEXT:bogus").is_err());
    }

    #[test]
    fn test_create_table_defaults_empty_type_to_text() {
        let mut form = CreateTableForm::new();
        form.table_name = "t".to_string();
        form.add_column(ColumnDraft {
            name: "c".into(),
            ..Default::default()
        });
        let (_, defs) = form.build().unwrap();
        assert_eq!(defs[0].col_type, "TEXT");
    }
}
