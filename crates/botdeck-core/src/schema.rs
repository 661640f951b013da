//! SQLite schema introspection types
//!
//! The backend exposes table structure as loosely typed PRAGMA output:
//! `notnull`/`pk` arrive as 0/1 integers from some supervisor versions and
//! as booleans from others, so both encodings are accepted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Column name assumed to identify rows when no column carries a pk flag.
///
/// Documented fallback behavior: tables without an explicit primary key
/// are addressed through a literal `id` column.
pub const FALLBACK_PRIMARY_KEY: &str = "id";

/// One column from a table structure query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    /// Free-text SQL type token (e.g. `INTEGER`, `TEXT`, `VARCHAR(80)`).
    /// Not parsed, only inspected heuristically for widget selection.
    #[serde(rename = "type", default)]
    pub col_type: String,
    #[serde(default, deserialize_with = "bool_from_int_or_bool")]
    pub notnull: bool,
    #[serde(default, deserialize_with = "bool_from_int_or_bool")]
    pub pk: bool,
    #[serde(default)]
    pub dflt_value: Option<String>,
}

/// A row as exchanged with the backend: column name → scalar or null
pub type TableRow = serde_json::Map<String, Value>;

/// Name of the column identifying rows in this table.
///
/// First pk-flagged column wins; [`FALLBACK_PRIMARY_KEY`] when none is
/// flagged.
pub fn primary_key_of(columns: &[TableColumn]) -> &str {
    columns
        .iter()
        .find(|c| c.pk)
        .map(|c| c.name.as_str())
        .unwrap_or(FALLBACK_PRIMARY_KEY)
}

fn bool_from_int_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected bool or integer, got {other}"
        ))),
    }
}
