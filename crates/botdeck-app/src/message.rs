//! Message types for the application (TEA pattern)
//!
//! Completion messages for session-scoped fetches carry the session
//! generation they were dispatched under; polled reads additionally
//! carry their [`crate::polling::SeqGuard`] sequence. The update
//! function drops anything stamped for a torn-down session or
//! superseded dispatch before mutating state.

use std::path::PathBuf;

use botdeck_api::{ExecutePayload, FileContent, RowsPayload};
use botdeck_core::{BotSummary, FileNode, MetricPoint, Result, StatusPayload, TableColumn};
use serde_json::Value;

use crate::input_key::InputKey;

/// Lifecycle command the user can issue against a bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Stop,
    Restart,
}

impl BotCommand {
    pub fn label(&self) -> &'static str {
        match self {
            BotCommand::Start => "start",
            BotCommand::Stop => "stop",
            BotCommand::Restart => "restart",
        }
    }
}

/// A workspace file mutation in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    Create(String),
    Delete(String),
    Rename { from: String, to: String },
    Mkdir(String),
    Upload { local_path: String, directory: String },
}

impl FileOp {
    pub fn label(&self) -> &'static str {
        match self {
            FileOp::Create(_) => "create",
            FileOp::Delete(_) => "delete",
            FileOp::Rename { .. } => "rename",
            FileOp::Mkdir(_) => "create directory",
            FileOp::Upload { .. } => "upload",
        }
    }
}

/// All possible messages/actions in the application
#[derive(Debug)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Force quit (Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────
    /// Bot list fetch completed
    BotsLoaded {
        seq: u64,
        result: Result<Vec<BotSummary>>,
    },

    /// A start/stop/restart request resolved
    CommandFinished {
        bot_id: i64,
        command: BotCommand,
        result: Result<()>,
    },

    /// Bot deletion resolved
    BotDeleted { bot_id: i64, result: Result<()> },

    // ─────────────────────────────────────────────────────────
    // Detail session: status, metrics, logs
    // ─────────────────────────────────────────────────────────
    /// Status poll completed
    StatusPolled {
        generation: u64,
        seq: u64,
        result: Result<StatusPayload>,
    },

    /// Metrics poll completed
    MetricsLoaded {
        generation: u64,
        seq: u64,
        result: Result<Vec<MetricPoint>>,
    },

    /// Log tail poll completed
    LogsPolled {
        generation: u64,
        seq: u64,
        result: Result<Vec<String>>,
    },

    // ─────────────────────────────────────────────────────────
    // Workspace files
    // ─────────────────────────────────────────────────────────
    /// File tree fetch completed
    TreeLoaded {
        generation: u64,
        result: Result<Vec<FileNode>>,
    },

    /// File content fetch completed
    FileLoaded {
        generation: u64,
        path: String,
        result: Result<FileContent>,
    },

    /// Save request resolved
    FileSaved {
        generation: u64,
        path: String,
        result: Result<()>,
    },

    /// A create/delete/rename/mkdir/upload request resolved
    FileOpFinished {
        generation: u64,
        op: FileOp,
        result: Result<()>,
    },

    /// Download resolved with the local destination path
    FileDownloaded {
        generation: u64,
        path: String,
        result: Result<PathBuf>,
    },

    // ─────────────────────────────────────────────────────────
    // SQLite browser
    // ─────────────────────────────────────────────────────────
    /// Database list fetch completed
    DatabasesLoaded {
        generation: u64,
        result: Result<Vec<String>>,
    },

    /// Table list fetch completed
    TablesLoaded {
        generation: u64,
        db_name: String,
        result: Result<Vec<String>>,
    },

    /// Structure + rows fetch completed
    TableLoaded {
        generation: u64,
        table: String,
        result: Result<(Vec<TableColumn>, RowsPayload)>,
    },

    /// Row insert/update/delete resolved
    RowMutationFinished { generation: u64, result: Result<()> },

    /// DDL request resolved
    DdlFinished { generation: u64, result: Result<()> },

    /// Ad hoc query resolved
    QueryExecuted {
        generation: u64,
        result: Result<ExecutePayload>,
    },
}

/// Value identifying a row for update/delete requests
pub type RowId = Value;
