//! Request and response payloads for the supervisor REST surface

use base64::Engine;
use serde::{Deserialize, Serialize};

use botdeck_core::prelude::*;
use botdeck_core::{MediaKind, MetricPoint, TableColumn, TableRow};

/// `{success, error}` envelope returned by every mutating endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ActionOutcome {
    /// Fold a domain failure into [`Error::Backend`], keeping the
    /// backend-provided message for the user.
    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::backend(
                self.error.unwrap_or_else(|| "request failed".to_string()),
            ))
        }
    }
}

/// Payload of a file read.
///
/// Text reads return the raw content; binary reads (`binary=true`) return
/// base64 content plus a mime type and coarse media flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileContent {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub is_image: bool,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub is_audio: bool,
}

impl FileContent {
    /// Media kind according to the backend's flags
    pub fn media_kind(&self) -> MediaKind {
        if self.is_image {
            MediaKind::Image
        } else if self.is_video {
            MediaKind::Video
        } else if self.is_audio {
            MediaKind::Audio
        } else {
            MediaKind::Text
        }
    }

    /// Decode a binary read's base64 content
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.content.trim())
            .map_err(|e| Error::transport(format!("invalid base64 file payload: {e}")))
    }
}

/// Payload of `GET /api/bots/{id}/sqlite/databases`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabasesPayload {
    #[serde(default)]
    pub databases: Vec<String>,
}

/// Payload of `GET .../databases/{name}/tables`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablesPayload {
    #[serde(default)]
    pub tables: Vec<String>,
}

/// Payload of `GET .../tables/{t}/structure`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructurePayload {
    #[serde(default)]
    pub columns: Vec<TableColumn>,
}

/// Payload of `GET .../tables/{t}/data`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowsPayload {
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
}

/// Payload of `GET /api/bots/{id}/logs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsPayload {
    #[serde(default)]
    pub logs: Vec<String>,
}

/// Payload of `GET /api/bots/{id}/metrics`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsPayload {
    #[serde(default)]
    pub metrics: Vec<MetricPoint>,
}

/// Result rows of an ad hoc `POST /sqlite/execute`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutePayload {
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub rows_affected: Option<u64>,
}

/// Editable bot settings for `PUT /api/bots/{id}`.
///
/// Only the fields the user changed are sent; absent fields are left
/// untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<f64>,
}

/// One column of a create-table DDL request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
    pub notnull: bool,
    pub pk: bool,
}
