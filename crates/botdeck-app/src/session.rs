//! Per-bot console session
//!
//! Everything the detail view holds for one bot lives in a
//! [`ConsoleSession`], constructed when the user opens the bot and torn
//! down explicitly on navigation: teardown cancels the session's poll
//! timers and closes the file session, releasing any media preview.
//! There is no free-floating module state.
//!
//! Each session carries a generation number; completion messages from
//! fetches dispatched under an older generation are discarded before
//! they can touch a newer session's models.

use botdeck_api::ExecutePayload;
use botdeck_core::{primary_key_of, BotSummary, MetricPoint, TableColumn, TableRow};
use serde_json::Value;

use crate::file_session::FileSession;
use crate::lifecycle_model::LifecycleModel;
use crate::logs::LogView;
use crate::message::BotCommand;
use crate::polling::{PollKey, PollScheduler};
use crate::schema_form::{CreateTableForm, RowForm};
use crate::workspace::WorkspaceTree;

/// Tabs of the bot detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Overview,
    Files,
    Database,
    Logs,
}

impl DetailTab {
    pub fn title(&self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Files => "Files",
            DetailTab::Database => "Database",
            DetailTab::Logs => "Logs",
        }
    }
}

/// Drill-down level of the database browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DbLevel {
    #[default]
    Databases,
    Tables,
    Rows,
}

/// SQLite browser state for one bot
#[derive(Debug, Default)]
pub struct DatabaseBrowser {
    pub level: DbLevel,
    pub databases: Vec<String>,
    pub db_cursor: usize,
    pub selected_db: Option<String>,
    pub tables: Vec<String>,
    pub table_cursor: usize,
    pub selected_table: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub row_cursor: usize,
    /// Active row create/edit form overlay
    pub form: Option<RowForm>,
    /// Active create-table form overlay
    pub create_table: Option<CreateTableForm>,
    /// Result of the last ad hoc query
    pub query_result: Option<ExecutePayload>,
    pub loading: bool,
}

impl DatabaseBrowser {
    pub fn set_databases(&mut self, databases: Vec<String>) {
        self.databases = databases;
        self.db_cursor = self.db_cursor.min(self.databases.len().saturating_sub(1));
        self.level = DbLevel::Databases;
        self.loading = false;
    }

    /// Drill into the database under the cursor
    pub fn enter_selected_db(&mut self) -> Option<String> {
        let name = self.databases.get(self.db_cursor)?.clone();
        self.selected_db = Some(name.clone());
        self.loading = true;
        Some(name)
    }

    pub fn set_tables(&mut self, db_name: String, tables: Vec<String>) {
        // Late answer for a database the user already left
        if self.selected_db.as_deref() != Some(db_name.as_str()) {
            return;
        }
        self.tables = tables;
        self.table_cursor = 0;
        self.level = DbLevel::Tables;
        self.loading = false;
    }

    pub fn enter_selected_table(&mut self) -> Option<String> {
        let name = self.tables.get(self.table_cursor)?.clone();
        self.selected_table = Some(name.clone());
        self.loading = true;
        Some(name)
    }

    /// Replace structure and rows wholesale (never patched in place)
    pub fn set_table_data(&mut self, table: String, columns: Vec<TableColumn>, rows: Vec<TableRow>) {
        if self.selected_table.as_deref() != Some(table.as_str()) {
            return;
        }
        self.columns = columns;
        self.rows = rows;
        self.row_cursor = self.row_cursor.min(self.rows.len().saturating_sub(1));
        self.level = DbLevel::Rows;
        self.loading = false;
    }

    /// Step one level back; returns false when already at the top
    pub fn back(&mut self) -> bool {
        match self.level {
            DbLevel::Rows => {
                self.level = DbLevel::Tables;
                self.selected_table = None;
                self.columns.clear();
                self.rows.clear();
                self.query_result = None;
                true
            }
            DbLevel::Tables => {
                self.level = DbLevel::Databases;
                self.selected_db = None;
                self.tables.clear();
                true
            }
            DbLevel::Databases => false,
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.level {
            DbLevel::Databases => (&mut self.db_cursor, self.databases.len()),
            DbLevel::Tables => (&mut self.table_cursor, self.tables.len()),
            DbLevel::Rows => (&mut self.row_cursor, self.rows.len()),
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor
            .saturating_add_signed(delta)
            .min(len.saturating_sub(1));
    }

    pub fn selected_row(&self) -> Option<&TableRow> {
        self.rows.get(self.row_cursor)
    }

    /// Identifying value of the selected row, via the pk column or the
    /// documented `"id"` fallback
    pub fn selected_row_id(&self) -> Option<Value> {
        let key = primary_key_of(&self.columns);
        self.selected_row()?.get(key).cloned()
    }
}

/// All state owned by one bot detail view
#[derive(Debug)]
pub struct ConsoleSession {
    pub generation: u64,
    pub bot_id: i64,
    pub bot_name: String,
    pub tab: DetailTab,
    pub lifecycle: LifecycleModel,
    pub tree: WorkspaceTree,
    pub files: FileSession,
    pub logs: LogView,
    pub metrics: Vec<MetricPoint>,
    pub db: DatabaseBrowser,
    pub tree_loading: bool,
    /// Command awaiting its response; blocks duplicate dispatch
    pub command_in_flight: Option<BotCommand>,
}

impl ConsoleSession {
    pub fn new(generation: u64, bot: &BotSummary) -> Self {
        Self {
            generation,
            bot_id: bot.id,
            bot_name: bot.name.clone(),
            tab: DetailTab::default(),
            lifecycle: LifecycleModel::new(),
            tree: WorkspaceTree::new(),
            files: FileSession::new(),
            logs: LogView::new(),
            metrics: Vec::new(),
            db: DatabaseBrowser::default(),
            tree_loading: false,
            command_in_flight: None,
        }
    }

    /// Every recurring poll key this session may have scheduled
    pub fn poll_keys(&self) -> [PollKey; 3] {
        [
            PollKey::Status(self.bot_id),
            PollKey::Logs(self.bot_id),
            PollKey::Metrics(self.bot_id),
        ]
    }

    /// Explicit teardown on navigation: cancel this session's timers and
    /// close the file session (releasing any media preview). In-flight
    /// fetches are not aborted; their completions die on the generation
    /// check.
    pub fn teardown(&mut self, scheduler: &PollScheduler) {
        for key in self.poll_keys() {
            scheduler.cancel(key);
        }
        self.files.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botdeck_core::{BotType, MediaKind};
    use serde_json::json;

    fn bot() -> BotSummary {
        serde_json::from_value(json!({
            "id": 7, "name": "greeter", "botType": "discord", "status": "stopped"
        }))
        .unwrap()
    }

    #[test]
    fn test_session_initial_state() {
        let session = ConsoleSession::new(1, &bot());
        assert_eq!(session.bot_id, 7);
        assert_eq!(session.bot_name, "greeter");
        assert_eq!(session.tab, DetailTab::Overview);
        assert!(session.command_in_flight.is_none());
        assert_eq!(bot().bot_type, BotType::Discord);
    }

    #[tokio::test]
    async fn test_teardown_cancels_timers_and_closes_files() {
        let scheduler = PollScheduler::new();
        let mut session = ConsoleSession::new(1, &bot());

        for key in session.poll_keys() {
            scheduler.schedule(key, std::time::Duration::from_secs(5), || async {});
        }
        session
            .files
            .open_media("a.png", MediaKind::Image, b"data")
            .unwrap();
        assert_eq!(session.files.live_previews(), 1);

        session.teardown(&scheduler);

        for key in session.poll_keys() {
            assert!(!scheduler.is_scheduled(key), "{key:?} must be cancelled");
        }
        assert_eq!(session.files.live_previews(), 0);
    }

    #[test]
    fn test_db_browser_drill_down_and_back() {
        let mut db = DatabaseBrowser::default();
        db.set_databases(vec!["main.db".into(), "cache.db".into()]);

        let name = db.enter_selected_db().unwrap();
        assert_eq!(name, "main.db");
        db.set_tables("main.db".into(), vec!["posts".into()]);
        assert_eq!(db.level, DbLevel::Tables);

        let table = db.enter_selected_table().unwrap();
        assert_eq!(table, "posts");
        let columns: Vec<TableColumn> = serde_json::from_value(json!([
            {"name": "id", "type": "INTEGER", "pk": 1},
            {"name": "title", "type": "TEXT", "notnull": 1}
        ]))
        .unwrap();
        let rows = vec![json!({"id": 1, "title": "hi"}).as_object().cloned().unwrap()];
        db.set_table_data("posts".into(), columns, rows);
        assert_eq!(db.level, DbLevel::Rows);
        assert_eq!(db.selected_row_id(), Some(json!(1)));

        assert!(db.back());
        assert_eq!(db.level, DbLevel::Tables);
        assert!(db.back());
        assert_eq!(db.level, DbLevel::Databases);
        assert!(!db.back());
    }

    #[test]
    fn test_db_browser_ignores_late_answers_for_left_contexts() {
        let mut db = DatabaseBrowser::default();
        db.set_databases(vec!["main.db".into(), "cache.db".into()]);
        db.enter_selected_db();

        // The user moved on to cache.db before main.db's tables arrived
        db.db_cursor = 1;
        db.enter_selected_db();
        db.set_tables("main.db".into(), vec!["stale".into()]);

        assert!(db.tables.is_empty(), "stale table list must not apply");
    }

    #[test]
    fn test_db_browser_row_id_fallback() {
        let mut db = DatabaseBrowser::default();
        db.selected_table = Some("notes".into());
        let columns: Vec<TableColumn> =
            serde_json::from_value(json!([{"name": "id", "type": "INTEGER"}, {"name": "body", "type": "TEXT"}]))
                .unwrap();
        let rows = vec![json!({"id": 42, "body": "x"}).as_object().cloned().unwrap()];
        db.set_table_data("notes".into(), columns, rows);

        // No pk flag anywhere: the literal "id" column identifies rows
        assert_eq!(db.selected_row_id(), Some(json!(42)));
    }

    #[test]
    fn test_db_cursor_clamps() {
        let mut db = DatabaseBrowser::default();
        db.set_databases(vec!["a".into(), "b".into()]);
        db.move_cursor(5);
        assert_eq!(db.db_cursor, 1);
        db.move_cursor(-5);
        assert_eq!(db.db_cursor, 0);
    }
}
