//! Main update function: applies one message to the model
//!
//! Every completion message passes two liveness gates before it may
//! mutate state: the session generation (is the view it was dispatched
//! for still open?) and, for polled reads, the sequence guard (is it
//! still the latest dispatch for its key?). Anything failing a gate is
//! dropped on the floor: a torn-down view or superseded poll must
//! leave no trace.

use botdeck_core::prelude::*;
use botdeck_core::MediaKind;

use crate::message::{FileOp, Message};
use crate::polling::PollKey;
use crate::state::AppState;

use super::{keys, UpdateAction, UpdateResult};

/// Process a message through the TEA update function
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => keys::handle_key(state, key),

        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────
        // Dashboard
        // ─────────────────────────────────────────────────────
        Message::BotsLoaded { seq, result } => {
            if !state.seq.is_latest(PollKey::Bots, seq) {
                trace!(seq, "dropping superseded bot list response");
                return UpdateResult::none();
            }
            state.bots_loading = false;
            match result {
                Ok(bots) => {
                    let installing = bots.iter().any(|b| b.is_installing());
                    state.bots = bots;
                    if !state.bots.is_empty() {
                        state.selected = state.selected.min(state.bots.len() - 1);
                    }
                    if installing {
                        return UpdateResult::action(UpdateAction::ScheduleConvergeRepoll);
                    }
                    UpdateResult::none()
                }
                Err(err) => {
                    state.notify_failure("bot list", &err);
                    UpdateResult::none()
                }
            }
        }

        Message::CommandFinished {
            bot_id,
            command,
            result,
        } => {
            if let Some(session) = state.session.as_mut() {
                if session.bot_id == bot_id {
                    session.command_in_flight = None;
                }
            }
            match result {
                Ok(()) => {
                    state.notify_info(format!("{} requested", command.label()));
                    // The next authoritative poll reflects the outcome;
                    // the dashboard cache is refreshed right away.
                    UpdateResult::action(UpdateAction::LoadBots)
                }
                Err(err) => {
                    state.notify_failure(command.label(), &err);
                    UpdateResult::none()
                }
            }
        }

        Message::BotDeleted { bot_id, result } => match result {
            Ok(()) => {
                let mut actions = Vec::new();
                if state
                    .session
                    .as_ref()
                    .map(|s| s.bot_id == bot_id)
                    .unwrap_or(false)
                {
                    if let Some(mut session) = state.close_session() {
                        session.files.close();
                        actions.push(UpdateAction::CancelPolls {
                            keys: session.poll_keys().to_vec(),
                        });
                    }
                }
                state.notify_info("bot deleted");
                actions.push(UpdateAction::LoadBots);
                UpdateResult::actions(actions)
            }
            Err(err) => {
                state.notify_failure("delete bot", &err);
                UpdateResult::none()
            }
        },

        // ─────────────────────────────────────────────────────
        // Session polls
        // ─────────────────────────────────────────────────────
        Message::StatusPolled {
            generation,
            seq,
            result,
        } => {
            let latest = state
                .session
                .as_ref()
                .map(|s| PollKey::Status(s.bot_id))
                .map(|key| state.seq.is_latest(key, seq))
                .unwrap_or(false);
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            if !latest {
                trace!(seq, "dropping superseded status response");
                return UpdateResult::none();
            }
            match result {
                Ok(payload) => {
                    session.lifecycle.apply_poll(payload);
                }
                Err(err) => {
                    // Last-known state stays on screen; no error state
                    session.lifecycle.poll_failed(&err);
                }
            }
            UpdateResult::none()
        }

        Message::MetricsLoaded {
            generation,
            seq,
            result,
        } => {
            let latest = state
                .session
                .as_ref()
                .map(|s| PollKey::Metrics(s.bot_id))
                .map(|key| state.seq.is_latest(key, seq))
                .unwrap_or(false);
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            if !latest {
                return UpdateResult::none();
            }
            match result {
                Ok(points) => session.metrics = points,
                Err(err) => warn!("metrics poll failed: {err}"),
            }
            UpdateResult::none()
        }

        Message::LogsPolled {
            generation,
            seq,
            result,
        } => {
            let latest = state
                .session
                .as_ref()
                .map(|s| PollKey::Logs(s.bot_id))
                .map(|key| state.seq.is_latest(key, seq))
                .unwrap_or(false);
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            if !latest {
                return UpdateResult::none();
            }
            match result {
                Ok(lines) => session.logs.set_lines(lines),
                Err(err) => warn!("log poll failed: {err}"),
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────
        // Workspace files
        // ─────────────────────────────────────────────────────
        Message::TreeLoaded { generation, result } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            session.tree_loading = false;
            match result {
                Ok(nodes) => session.tree.set_tree(nodes),
                Err(err) => state.notify_failure("file tree", &err),
            }
            UpdateResult::none()
        }

        Message::FileLoaded {
            generation,
            path,
            result,
        } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            match result {
                Ok(content) => {
                    let kind = MediaKind::from_path(&path);
                    if kind.is_binary() {
                        let opened = content
                            .decode()
                            .and_then(|bytes| session.files.open_media(&path, kind, &bytes));
                        if let Err(err) = opened {
                            state.notify_failure("open file", &err);
                        }
                    } else {
                        session.files.open_text(&path, &content.content);
                    }
                }
                Err(err) => state.notify_failure("open file", &err),
            }
            UpdateResult::none()
        }

        Message::FileSaved {
            generation,
            path,
            result,
        } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            match result {
                Ok(()) => {
                    session.files.mark_saved(&path);
                    state.notify_info(format!("saved {path}"));
                }
                Err(err) => state.notify_failure("save", &err),
            }
            UpdateResult::none()
        }

        Message::FileOpFinished {
            generation,
            op,
            result,
        } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            match result {
                Ok(()) => {
                    if let FileOp::Delete(ref path) = op {
                        // The open-file session is closed (releasing any
                        // preview) before the tree selection is cleared.
                        if session.files.is_open(path) {
                            session.files.close();
                        }
                        session.tree.clear_selection();
                    }
                    let bot_id = session.bot_id;
                    session.tree_loading = true;
                    state.notify_info(format!("{} done", op.label()));
                    UpdateResult::action(UpdateAction::LoadTree { generation, bot_id })
                }
                Err(err) => {
                    state.notify_failure(op.label(), &err);
                    UpdateResult::none()
                }
            }
        }

        Message::FileDownloaded {
            generation,
            path,
            result,
        } => {
            if state.session_for(generation).is_none() {
                return UpdateResult::none();
            }
            match result {
                Ok(dest) => state.notify_info(format!("{path} saved to {}", dest.display())),
                Err(err) => state.notify_failure("download", &err),
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────
        // SQLite browser
        // ─────────────────────────────────────────────────────
        Message::DatabasesLoaded { generation, result } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            session.db.loading = false;
            match result {
                Ok(databases) => session.db.set_databases(databases),
                Err(err) => state.notify_failure("databases", &err),
            }
            UpdateResult::none()
        }

        Message::TablesLoaded {
            generation,
            db_name,
            result,
        } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            session.db.loading = false;
            match result {
                Ok(tables) => session.db.set_tables(db_name, tables),
                Err(err) => state.notify_failure("tables", &err),
            }
            UpdateResult::none()
        }

        Message::TableLoaded {
            generation,
            table,
            result,
        } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            session.db.loading = false;
            match result {
                Ok((columns, rows)) => session.db.set_table_data(table, columns, rows.rows),
                Err(err) => state.notify_failure("table data", &err),
            }
            UpdateResult::none()
        }

        Message::RowMutationFinished { generation, result } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            match result {
                Ok(()) => {
                    session.db.form = None;
                    let reload = reload_current_table(session, generation);
                    state.notify_info("row saved");
                    reload
                }
                Err(err) => {
                    // The form stays open so the user can correct it
                    state.notify_failure("row", &err);
                    UpdateResult::none()
                }
            }
        }

        Message::DdlFinished { generation, result } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            match result {
                Ok(()) => {
                    session.db.create_table = None;
                    let bot_id = session.bot_id;
                    let reload = match (&session.db.selected_table, &session.db.selected_db) {
                        (Some(table), Some(db_name)) => {
                            UpdateResult::action(UpdateAction::LoadTable {
                                generation,
                                bot_id,
                                db_name: db_name.clone(),
                                table: table.clone(),
                            })
                        }
                        (None, Some(db_name)) => UpdateResult::action(UpdateAction::LoadTables {
                            generation,
                            bot_id,
                            db_name: db_name.clone(),
                        }),
                        _ => UpdateResult::none(),
                    };
                    state.notify_info("schema updated");
                    reload
                }
                Err(err) => {
                    state.notify_failure("schema change", &err);
                    UpdateResult::none()
                }
            }
        }

        Message::QueryExecuted { generation, result } => {
            let Some(session) = state.session_for(generation) else {
                return UpdateResult::none();
            };
            match result {
                Ok(payload) => session.db.query_result = Some(payload),
                Err(err) => state.notify_failure("query", &err),
            }
            UpdateResult::none()
        }
    }
}

/// Reload the table currently drilled into, if any
fn reload_current_table(
    session: &crate::session::ConsoleSession,
    generation: u64,
) -> UpdateResult {
    match (&session.db.selected_db, &session.db.selected_table) {
        (Some(db_name), Some(table)) => UpdateResult::action(UpdateAction::LoadTable {
            generation,
            bot_id: session.bot_id,
            db_name: db_name.clone(),
            table: table.clone(),
        }),
        _ => UpdateResult::none(),
    }
}
