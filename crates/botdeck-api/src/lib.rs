//! # botdeck-api - Supervisor HTTP Gateway
//!
//! Single abstraction over the backend's JSON REST surface (bots, status,
//! files, databases, logs, metrics). Everything above this crate consumes
//! typed payloads and the three-way error taxonomy; nothing above it
//! builds URLs or touches HTTP.

pub mod client;
pub mod payload;

pub use client::Gateway;
pub use payload::{
    ActionOutcome, BotSettings, ColumnDef, DatabasesPayload, ExecutePayload, FileContent,
    LogsPayload, MetricsPayload, RowsPayload, StructurePayload, TablesPayload,
};
