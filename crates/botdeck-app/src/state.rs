//! Application state (Model in TEA pattern)

use std::sync::Arc;

use botdeck_core::prelude::*;
use botdeck_core::BotSummary;

use crate::config::Settings;
use crate::polling::SeqGuard;
use crate::session::ConsoleSession;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Bot list with per-bot status and actions
    #[default]
    Dashboard,
    /// One bot's console (tabs live on the session)
    Detail,
}

/// A dismissible one-line notice above the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

/// Modal input overlays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// New workspace file path
    NewFile,
    /// New workspace directory path
    NewDirectory,
    /// New path for a rename
    RenameFile { from: String },
    /// Local file to upload into the selected directory
    UploadFile { directory: String },
    /// Name for a new table
    NewTableName,
    /// Column spec (`name:TYPE[:pk][:notnull]`) for the create-table form
    AddDraftColumn,
    /// Column spec to append to the current table
    AddColumn,
    /// `old:new` column rename
    RenameColumn,
    /// Column name to drop
    DeleteColumn,
    /// Ad hoc SQL against the selected database
    Query,
    /// Yes/no confirmations (empty input)
    ConfirmDeleteBot { bot_id: i64, name: String },
    ConfirmDeleteFile { path: String },
    ConfirmDeleteRow,
}

impl PromptKind {
    /// Confirmation prompts take y/n instead of text
    pub fn is_confirm(&self) -> bool {
        matches!(
            self,
            PromptKind::ConfirmDeleteBot { .. }
                | PromptKind::ConfirmDeleteFile { .. }
                | PromptKind::ConfirmDeleteRow
        )
    }

    pub fn title(&self) -> String {
        match self {
            PromptKind::NewFile => "New file path".to_string(),
            PromptKind::NewDirectory => "New directory path".to_string(),
            PromptKind::RenameFile { from } => format!("Rename {from} to"),
            PromptKind::UploadFile { directory } => {
                let target = if directory.is_empty() { "/" } else { directory };
                format!("Upload local file into {target}")
            }
            PromptKind::NewTableName => "New table name".to_string(),
            PromptKind::AddDraftColumn | PromptKind::AddColumn => {
                "Column (name:TYPE[:pk][:notnull])".to_string()
            }
            PromptKind::RenameColumn => "Rename column (old:new)".to_string(),
            PromptKind::DeleteColumn => "Delete column named".to_string(),
            PromptKind::Query => "SQL query".to_string(),
            PromptKind::ConfirmDeleteBot { name, .. } => format!("Delete bot {name}? (y/n)"),
            PromptKind::ConfirmDeleteFile { path } => format!("Delete {path}? (y/n)"),
            PromptKind::ConfirmDeleteRow => "Delete selected row? (y/n)".to_string(),
        }
    }
}

/// An open prompt and its input buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
}

impl PromptState {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }
}

/// The full application model
pub struct AppState {
    pub settings: Settings,
    pub view: View,
    /// Read-mostly bot cache, replaced wholesale on every list poll
    pub bots: Vec<BotSummary>,
    pub bots_loading: bool,
    /// Dashboard cursor
    pub selected: usize,
    /// The active bot console, if a detail view is open
    pub session: Option<ConsoleSession>,
    /// Stale-response guard shared with the dispatch side
    pub seq: Arc<SeqGuard>,
    pub notice: Option<Notice>,
    pub prompt: Option<PromptState>,
    should_quit: bool,
    next_generation: u64,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            view: View::default(),
            bots: Vec::new(),
            bots_loading: false,
            selected: 0,
            session: None,
            seq: Arc::new(SeqGuard::new()),
            notice: None,
            prompt: None,
            should_quit: false,
            next_generation: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Bot under the dashboard cursor
    pub fn selected_bot(&self) -> Option<&BotSummary> {
        self.bots.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.bots.is_empty() {
            self.selected = 0;
            return;
        }
        self.selected = self
            .selected
            .saturating_add_signed(delta)
            .min(self.bots.len() - 1);
    }

    /// Open a console session for `bot`, superseding any existing one.
    /// Returns the new session's generation for the dispatch side.
    pub fn open_session(&mut self, bot: &BotSummary) -> u64 {
        self.next_generation += 1;
        self.session = Some(ConsoleSession::new(self.next_generation, bot));
        self.view = View::Detail;
        self.next_generation
    }

    /// Leave the detail view. The caller is responsible for running the
    /// returned session's teardown against the scheduler.
    pub fn close_session(&mut self) -> Option<ConsoleSession> {
        self.view = View::Dashboard;
        self.session.take()
    }

    /// The live session, only if `generation` still matches: the
    /// "is this model still live" check run before any completion
    /// message may mutate session state.
    pub fn session_for(&mut self, generation: u64) -> Option<&mut ConsoleSession> {
        self.session
            .as_mut()
            .filter(|s| s.generation == generation)
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn notify_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: false,
        });
    }

    /// Route an error per the taxonomy: transport failures degrade to
    /// the cached view with a dismissible notice; domain and validation
    /// failures surface their message directly.
    pub fn notify_failure(&mut self, context: &str, err: &Error) {
        if err.is_transport() {
            warn!("{context}: {err}");
            self.notify_error(format!("{context}: {err} (showing last known state)"));
        } else {
            self.notify_error(err.to_string());
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
