//! HTTP gateway to the supervisor backend
//!
//! One [`Gateway`] per server, shared by clone. Every endpoint of the
//! backend's JSON REST surface gets a typed method here; nothing else in
//! the workspace talks HTTP.
//!
//! Error folding follows the three-way taxonomy: network failures and
//! undecodable bodies become [`Error::Transport`], non-2xx responses
//! become [`Error::Status`], and 2xx `{success: false, error}` envelopes
//! become [`Error::Backend`] carrying the backend's message.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use botdeck_core::prelude::*;
use botdeck_core::{BotSummary, FileNode, MetricPoint, StatusPayload, TableColumn, TableRow};

use crate::payload::{
    ActionOutcome, BotSettings, ColumnDef, DatabasesPayload, ExecutePayload, FileContent,
    LogsPayload, MetricsPayload, RowsPayload, StructurePayload, TablesPayload,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the supervisor's REST surface
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base: String,
}

impl Gateway {
    /// Create a gateway for the given base URL (e.g. `http://localhost:3000`)
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, base }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    // ─────────────────────────────────────────────────────────────
    // Request plumbing
    // ─────────────────────────────────────────────────────────────

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(status.as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| Error::transport(format!("undecodable response body: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        trace!("GET {path}");
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::decode(response).await
    }

    /// POST/PUT/DELETE returning the `{success, error}` envelope
    async fn send_action(
        &self,
        method: reqwest::Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<()> {
        debug!("{method} {path}");
        let mut request = self.client.request(method, self.url(path)).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let outcome: ActionOutcome = Self::decode(response).await?;
        outcome.into_result()
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::decode(response).await
    }

    // ─────────────────────────────────────────────────────────────
    // Bots
    // ─────────────────────────────────────────────────────────────

    pub async fn list_bots(&self) -> Result<Vec<BotSummary>> {
        self.get_json("/api/bots", &[]).await
    }

    pub async fn get_bot(&self, id: i64) -> Result<BotSummary> {
        self.get_json(&format!("/api/bots/{id}"), &[]).await
    }

    pub async fn update_bot(&self, id: i64, settings: &BotSettings) -> Result<()> {
        let body = serde_json::to_value(settings)?;
        self.send_action(
            reqwest::Method::PUT,
            &format!("/api/bots/{id}"),
            &[],
            Some(&body),
        )
        .await
    }

    pub async fn delete_bot(&self, id: i64) -> Result<()> {
        self.send_action(reqwest::Method::DELETE, &format!("/api/bots/{id}"), &[], None)
            .await
    }

    pub async fn status(&self, id: i64) -> Result<StatusPayload> {
        self.get_json(&format!("/api/bots/{id}/status"), &[]).await
    }

    pub async fn start(&self, id: i64) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/start"),
            &[],
            None,
        )
        .await
    }

    pub async fn stop(&self, id: i64) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/stop"),
            &[],
            None,
        )
        .await
    }

    pub async fn restart(&self, id: i64) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/restart"),
            &[],
            None,
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────
    // Workspace files
    // ─────────────────────────────────────────────────────────────

    pub async fn file_tree(&self, id: i64) -> Result<Vec<FileNode>> {
        self.get_json(&format!("/api/bots/{id}/files"), &[]).await
    }

    /// Read a file. Binary reads return base64 content plus media flags.
    pub async fn read_file(&self, id: i64, path: &str, binary: bool) -> Result<FileContent> {
        let query: &[(&str, &str)] = if binary {
            &[("path", path), ("binary", "true")]
        } else {
            &[("path", path)]
        };
        self.get_json(&format!("/api/bots/{id}/file"), query).await
    }

    pub async fn write_file(&self, id: i64, path: &str, content: &str) -> Result<()> {
        self.send_action(
            reqwest::Method::PUT,
            &format!("/api/bots/{id}/file"),
            &[("path", path)],
            Some(&json!({ "content": content })),
        )
        .await
    }

    pub async fn create_file(&self, id: i64, path: &str) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/file"),
            &[("path", path)],
            None,
        )
        .await
    }

    pub async fn delete_file(&self, id: i64, path: &str) -> Result<()> {
        self.send_action(
            reqwest::Method::DELETE,
            &format!("/api/bots/{id}/file"),
            &[("path", path)],
            None,
        )
        .await
    }

    pub async fn rename_file(&self, id: i64, old_path: &str, new_path: &str) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/file/rename"),
            &[],
            Some(&json!({ "old_path": old_path, "new_path": new_path })),
        )
        .await
    }

    pub async fn create_directory(&self, id: i64, path: &str) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/file/directory"),
            &[],
            Some(&json!({ "path": path })),
        )
        .await
    }

    /// Upload a local file into the bot workspace (multipart)
    pub async fn upload_file(
        &self,
        id: i64,
        directory: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("path", directory.to_string())
            .part("file", part);
        let response = self
            .client
            .post(self.url(&format!("/api/bots/{id}/file/upload")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let outcome: ActionOutcome = Self::decode(response).await?;
        outcome.into_result()
    }

    /// Download raw file bytes
    pub async fn download_file(&self, id: i64, path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.url(&format!("/api/bots/{id}/file/download")))
            .query(&[("path", path)])
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(status.as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    // ─────────────────────────────────────────────────────────────
    // SQLite databases
    // ─────────────────────────────────────────────────────────────

    pub async fn databases(&self, id: i64) -> Result<Vec<String>> {
        let payload: DatabasesPayload = self
            .get_json(&format!("/api/bots/{id}/sqlite/databases"), &[])
            .await?;
        Ok(payload.databases)
    }

    pub async fn tables(&self, id: i64, db_name: &str) -> Result<Vec<String>> {
        let payload: TablesPayload = self
            .get_json(
                &format!("/api/bots/{id}/sqlite/databases/{db_name}/tables"),
                &[],
            )
            .await?;
        Ok(payload.tables)
    }

    pub async fn table_structure(
        &self,
        id: i64,
        db_name: &str,
        table: &str,
    ) -> Result<Vec<TableColumn>> {
        let payload: StructurePayload = self
            .get_json(
                &format!("/api/bots/{id}/sqlite/tables/{table}/structure"),
                &[("db_name", db_name)],
            )
            .await?;
        Ok(payload.columns)
    }

    pub async fn table_rows(&self, id: i64, db_name: &str, table: &str) -> Result<RowsPayload> {
        self.get_json(
            &format!("/api/bots/{id}/sqlite/tables/{table}/data"),
            &[("db_name", db_name)],
        )
        .await
    }

    pub async fn insert_row(
        &self,
        id: i64,
        db_name: &str,
        table: &str,
        row: &TableRow,
    ) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/sqlite/tables/{table}/rows"),
            &[],
            Some(&json!({ "db_name": db_name, "row": row })),
        )
        .await
    }

    pub async fn update_row(
        &self,
        id: i64,
        db_name: &str,
        table: &str,
        row_id: &Value,
        row: &TableRow,
    ) -> Result<()> {
        self.send_action(
            reqwest::Method::PUT,
            &format!("/api/bots/{id}/sqlite/tables/{table}/rows/{}", row_key(row_id)),
            &[],
            Some(&json!({ "db_name": db_name, "row": row })),
        )
        .await
    }

    pub async fn delete_row(
        &self,
        id: i64,
        db_name: &str,
        table: &str,
        row_id: &Value,
    ) -> Result<()> {
        self.send_action(
            reqwest::Method::DELETE,
            &format!("/api/bots/{id}/sqlite/tables/{table}/rows/{}", row_key(row_id)),
            &[("db_name", db_name)],
            None,
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────
    // SQLite DDL
    // ─────────────────────────────────────────────────────────────

    pub async fn create_table(
        &self,
        id: i64,
        db_name: &str,
        table: &str,
        columns: &[ColumnDef],
    ) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/sqlite/tables"),
            &[],
            Some(&json!({ "db_name": db_name, "name": table, "columns": columns })),
        )
        .await
    }

    pub async fn add_column(
        &self,
        id: i64,
        db_name: &str,
        table: &str,
        column: &ColumnDef,
    ) -> Result<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/api/bots/{id}/sqlite/columns"),
            &[],
            Some(&json!({ "db_name": db_name, "table": table, "column": column })),
        )
        .await
    }

    pub async fn rename_column(
        &self,
        id: i64,
        db_name: &str,
        table: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<()> {
        self.send_action(
            reqwest::Method::PUT,
            &format!("/api/bots/{id}/sqlite/columns"),
            &[],
            Some(&json!({
                "db_name": db_name,
                "table": table,
                "old_name": old_name,
                "new_name": new_name
            })),
        )
        .await
    }

    pub async fn delete_column(
        &self,
        id: i64,
        db_name: &str,
        table: &str,
        column: &str,
    ) -> Result<()> {
        self.send_action(
            reqwest::Method::DELETE,
            &format!("/api/bots/{id}/sqlite/columns"),
            &[("db_name", db_name), ("table", table), ("column", column)],
            None,
        )
        .await
    }

    /// Run an ad hoc query against one of the bot's databases
    pub async fn execute(&self, id: i64, db_name: &str, query: &str) -> Result<ExecutePayload> {
        self.post_json(
            &format!("/api/bots/{id}/sqlite/execute"),
            &json!({ "query": query, "db_name": db_name }),
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────
    // Logs & metrics
    // ─────────────────────────────────────────────────────────────

    pub async fn logs(&self, id: i64, lines: u32) -> Result<Vec<String>> {
        let lines = lines.to_string();
        let payload: LogsPayload = self
            .get_json(&format!("/api/bots/{id}/logs"), &[("lines", lines.as_str())])
            .await?;
        Ok(payload.logs)
    }

    pub async fn metrics(&self, id: i64, hours: u32) -> Result<Vec<MetricPoint>> {
        let hours = hours.to_string();
        let payload: MetricsPayload = self
            .get_json(
                &format!("/api/bots/{id}/metrics"),
                &[("hours", hours.as_str())],
            )
            .await?;
        Ok(payload.metrics)
    }
}

/// Render a row id for use in a path segment. String ids are used
/// verbatim, numbers formatted; anything else stringified.
fn row_key(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
