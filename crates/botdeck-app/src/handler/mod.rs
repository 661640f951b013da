//! Handler module - TEA update function and key handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and completion-message dispatch
//! - `keys`: Key event handlers per view/overlay
//!
//! `update` is pure over `AppState`: it performs no IO and returns the
//! side effects to run as [`UpdateAction`]s, which `actions.rs` executes
//! against the gateway and the poll scheduler.

pub(crate) mod keys;
pub(crate) mod update;


use serde_json::Value;

use botdeck_api::ColumnDef;
use botdeck_core::{MediaKind, TableRow};

use crate::message::{BotCommand, FileOp, Message};
use crate::polling::PollKey;

/// Actions the event loop should perform after update
#[derive(Debug)]
pub enum UpdateAction {
    // ─────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────
    /// Fetch the bot list now
    LoadBots,

    /// One-shot short-delay list re-poll after an installing status was
    /// observed, to converge without a push channel
    ScheduleConvergeRepoll,

    /// Issue a start/stop/restart against a bot
    RunCommand { bot_id: i64, command: BotCommand },

    /// Delete a bot
    DeleteBot { bot_id: i64 },

    // ─────────────────────────────────────────────────────────
    // Session polling
    // ─────────────────────────────────────────────────────────
    /// Begin the recurring status poll for an open detail view
    StartStatusPolling { generation: u64, bot_id: i64 },

    /// Begin the recurring metrics poll while the overview is visible
    StartMetricsPolling { generation: u64, bot_id: i64 },

    /// Begin the recurring log tail poll (auto-refresh on)
    StartLogsPolling { generation: u64, bot_id: i64 },

    /// Fetch the log tail once (entering the logs tab)
    LoadLogs { generation: u64, bot_id: i64 },

    /// Cancel specific recurring polls (leaving a section)
    CancelPolls { keys: Vec<PollKey> },

    // ─────────────────────────────────────────────────────────
    // Workspace files
    // ─────────────────────────────────────────────────────────
    LoadTree {
        generation: u64,
        bot_id: i64,
    },

    OpenFile {
        generation: u64,
        bot_id: i64,
        path: String,
        kind: MediaKind,
    },

    SaveFile {
        generation: u64,
        bot_id: i64,
        path: String,
        content: String,
    },

    PerformFileOp {
        generation: u64,
        bot_id: i64,
        op: FileOp,
    },

    DownloadFile {
        generation: u64,
        bot_id: i64,
        path: String,
    },

    // ─────────────────────────────────────────────────────────
    // SQLite browser
    // ─────────────────────────────────────────────────────────
    LoadDatabases {
        generation: u64,
        bot_id: i64,
    },

    LoadTables {
        generation: u64,
        bot_id: i64,
        db_name: String,
    },

    /// Fetch structure and rows for a table
    LoadTable {
        generation: u64,
        bot_id: i64,
        db_name: String,
        table: String,
    },

    InsertRow {
        generation: u64,
        bot_id: i64,
        db_name: String,
        table: String,
        row: TableRow,
    },

    UpdateRow {
        generation: u64,
        bot_id: i64,
        db_name: String,
        table: String,
        row_id: Value,
        row: TableRow,
    },

    DeleteRow {
        generation: u64,
        bot_id: i64,
        db_name: String,
        table: String,
        row_id: Value,
    },

    CreateTable {
        generation: u64,
        bot_id: i64,
        db_name: String,
        table: String,
        columns: Vec<ColumnDef>,
    },

    AddColumn {
        generation: u64,
        bot_id: i64,
        db_name: String,
        table: String,
        column: ColumnDef,
    },

    RenameColumn {
        generation: u64,
        bot_id: i64,
        db_name: String,
        table: String,
        old_name: String,
        new_name: String,
    },

    DeleteColumn {
        generation: u64,
        bot_id: i64,
        db_name: String,
        table: String,
        column: String,
    },

    ExecuteQuery {
        generation: u64,
        bot_id: i64,
        db_name: String,
        query: String,
    },
}

// Re-export main entry point
pub use update::update;

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Actions for the event loop to perform, in order
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            actions: Vec::new(),
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            actions: vec![action],
        }
    }

    pub fn actions(actions: Vec<UpdateAction>) -> Self {
        Self {
            message: None,
            actions,
        }
    }
}
