//! Key event handlers per view and overlay
//!
//! Routing order: an open prompt swallows keys first, then an open row
//! or create-table form, then the active view. Every action the user
//! can trigger is gated by the model (shown action table, in-flight
//! command, selection kind), never by what happens to be rendered.

use botdeck_core::lifecycle::{ActionSet, BotPhase};
use botdeck_core::{MediaKind, NodeType};

use crate::input_key::InputKey;
use crate::message::{BotCommand, FileOp};
use crate::schema_form::{parse_column_spec, CreateTableForm, FormMode, RowForm};
use crate::session::{DbLevel, DetailTab};
use crate::state::{AppState, PromptKind, PromptState, View};

use super::{UpdateAction, UpdateResult};

/// Handle a key event according to the active context
pub fn handle_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    if key == InputKey::Ctrl('c') {
        state.request_quit();
        return UpdateResult::none();
    }
    if state.prompt.is_some() {
        return handle_prompt_key(state, key);
    }
    if let Some(session) = state.session.as_ref() {
        if session.db.form.is_some() {
            return handle_row_form_key(state, key);
        }
        if session.db.create_table.is_some() {
            return handle_create_table_key(state, key);
        }
    }
    match state.view {
        View::Dashboard => handle_dashboard_key(state, key),
        View::Detail => handle_detail_key(state, key),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────────

/// Action availability on the dashboard, derived from the cached
/// summary's status tag (detail views have the live poll instead)
fn summary_actions(status: &str) -> ActionSet {
    ActionSet::for_phase(BotPhase::from_tag(status))
}

fn handle_dashboard_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    match key {
        InputKey::Char('q') => {
            state.request_quit();
            UpdateResult::none()
        }
        InputKey::Up | InputKey::Char('k') => {
            state.move_selection(-1);
            UpdateResult::none()
        }
        InputKey::Down | InputKey::Char('j') => {
            state.move_selection(1);
            UpdateResult::none()
        }
        InputKey::Char('r') => {
            state.bots_loading = true;
            UpdateResult::action(UpdateAction::LoadBots)
        }
        InputKey::Enter => {
            let Some(bot) = state.selected_bot().cloned() else {
                return UpdateResult::none();
            };
            let generation = state.open_session(&bot);
            UpdateResult::actions(vec![
                UpdateAction::StartStatusPolling {
                    generation,
                    bot_id: bot.id,
                },
                UpdateAction::StartMetricsPolling {
                    generation,
                    bot_id: bot.id,
                },
            ])
        }
        InputKey::Char('s') => dashboard_command(state, BotCommand::Start),
        InputKey::Char('x') => dashboard_command(state, BotCommand::Stop),
        InputKey::Char('R') => dashboard_command(state, BotCommand::Restart),
        InputKey::Char('d') => {
            if let Some(bot) = state.selected_bot() {
                state.prompt = Some(PromptState::new(PromptKind::ConfirmDeleteBot {
                    bot_id: bot.id,
                    name: bot.name.clone(),
                }));
            }
            UpdateResult::none()
        }
        InputKey::Esc => {
            state.dismiss_notice();
            UpdateResult::none()
        }
        _ => UpdateResult::none(),
    }
}

fn dashboard_command(state: &mut AppState, command: BotCommand) -> UpdateResult {
    let Some(bot) = state.selected_bot() else {
        return UpdateResult::none();
    };
    let actions = summary_actions(&bot.status);
    let allowed = match command {
        BotCommand::Start => actions.start,
        BotCommand::Stop => actions.stop,
        BotCommand::Restart => actions.restart,
    };
    if !allowed {
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::RunCommand {
        bot_id: bot.id,
        command,
    })
}

// ─────────────────────────────────────────────────────────────────────
// Detail view
// ─────────────────────────────────────────────────────────────────────

fn handle_detail_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let (tab, editing) = match state.session.as_ref() {
        Some(session) => (
            session.tab,
            session.tab == DetailTab::Files && session.files.editor().is_some(),
        ),
        None => return UpdateResult::none(),
    };

    // Tab switching is shared across tabs, except while the editor owns
    // the keyboard
    if !editing {
        if let InputKey::Char(c @ '1'..='4') = key {
            return switch_tab(state, c);
        }
    }
    match tab {
        DetailTab::Overview => handle_overview_key(state, key),
        DetailTab::Files => handle_files_key(state, key),
        DetailTab::Database => handle_database_key(state, key),
        DetailTab::Logs => handle_logs_key(state, key),
    }
}

fn switch_tab(state: &mut AppState, digit: char) -> UpdateResult {
    let Some(session) = state.session.as_mut() else {
        return UpdateResult::none();
    };
    let target = match digit {
        '1' => DetailTab::Overview,
        '2' => DetailTab::Files,
        '3' => DetailTab::Database,
        _ => DetailTab::Logs,
    };
    if target == session.tab {
        return UpdateResult::none();
    }
    let generation = session.generation;
    let bot_id = session.bot_id;
    let mut actions = Vec::new();

    // Leaving a section cancels its timers
    match session.tab {
        DetailTab::Overview => actions.push(UpdateAction::CancelPolls {
            keys: vec![crate::polling::PollKey::Metrics(bot_id)],
        }),
        DetailTab::Logs => actions.push(UpdateAction::CancelPolls {
            keys: vec![crate::polling::PollKey::Logs(bot_id)],
        }),
        _ => {}
    }

    session.tab = target;
    match target {
        DetailTab::Overview => {
            actions.push(UpdateAction::StartMetricsPolling { generation, bot_id });
        }
        DetailTab::Files => {
            if !session.tree.is_loaded() && !session.tree_loading {
                session.tree_loading = true;
                actions.push(UpdateAction::LoadTree { generation, bot_id });
            }
        }
        DetailTab::Database => {
            if session.db.databases.is_empty() && !session.db.loading {
                session.db.loading = true;
                actions.push(UpdateAction::LoadDatabases { generation, bot_id });
            }
        }
        DetailTab::Logs => {
            actions.push(UpdateAction::LoadLogs { generation, bot_id });
            if session.logs.auto_refresh {
                actions.push(UpdateAction::StartLogsPolling { generation, bot_id });
            }
        }
    }
    UpdateResult::actions(actions)
}

/// Leave the detail view entirely: teardown order is file session first
/// (releasing any preview), then timers, then the dashboard refresh.
fn leave_detail(state: &mut AppState) -> UpdateResult {
    let Some(mut session) = state.close_session() else {
        return UpdateResult::none();
    };
    session.files.close();
    UpdateResult::actions(vec![
        UpdateAction::CancelPolls {
            keys: session.poll_keys().to_vec(),
        },
        UpdateAction::LoadBots,
    ])
}

fn handle_overview_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    match key {
        InputKey::Esc | InputKey::Char('q') => leave_detail(state),
        InputKey::Char('s') => session_command(state, BotCommand::Start),
        InputKey::Char('x') => session_command(state, BotCommand::Stop),
        InputKey::Char('r') | InputKey::Char('R') => session_command(state, BotCommand::Restart),
        _ => UpdateResult::none(),
    }
}

/// Commands in the detail view are gated by the *shown* action table
/// (the same table the renderer draws) plus the in-flight latch.
fn session_command(state: &mut AppState, command: BotCommand) -> UpdateResult {
    let Some(session) = state.session.as_mut() else {
        return UpdateResult::none();
    };
    if session.command_in_flight.is_some() {
        return UpdateResult::none();
    }
    let shown = session.lifecycle.shown_actions();
    let allowed = match command {
        BotCommand::Start => shown.start,
        BotCommand::Stop => shown.stop,
        BotCommand::Restart => shown.restart,
    };
    if !allowed {
        return UpdateResult::none();
    }
    session.command_in_flight = Some(command);
    UpdateResult::action(UpdateAction::RunCommand {
        bot_id: session.bot_id,
        command,
    })
}

// ─────────────────────────────────────────────────────────────────────
// Files tab
// ─────────────────────────────────────────────────────────────────────

fn handle_files_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(session) = state.session.as_mut() else {
        return UpdateResult::none();
    };
    let generation = session.generation;
    let bot_id = session.bot_id;

    // An open text file routes keys to the editor
    if session.files.editor().is_some() {
        return handle_editor_key(state, key);
    }
    // An open media preview only supports closing
    if session.files.preview().is_some() {
        if matches!(key, InputKey::Esc | InputKey::Char('q')) {
            session.files.close();
        }
        return UpdateResult::none();
    }

    match key {
        InputKey::Esc | InputKey::Char('q') => leave_detail(state),
        InputKey::Up | InputKey::Char('k') => {
            session.tree.move_selection(-1);
            UpdateResult::none()
        }
        InputKey::Down | InputKey::Char('j') => {
            session.tree.move_selection(1);
            UpdateResult::none()
        }
        InputKey::Enter => {
            let Some(selection) = session.tree.selection().cloned() else {
                return UpdateResult::none();
            };
            if selection.is_file() {
                UpdateResult::action(UpdateAction::OpenFile {
                    generation,
                    bot_id,
                    kind: MediaKind::from_path(&selection.path),
                    path: selection.path,
                })
            } else {
                session.tree.toggle(&selection.path);
                UpdateResult::none()
            }
        }
        InputKey::Char('r') => {
            session.tree_loading = true;
            UpdateResult::action(UpdateAction::LoadTree { generation, bot_id })
        }
        InputKey::Char('n') => {
            state.prompt = Some(PromptState::new(PromptKind::NewFile));
            UpdateResult::none()
        }
        InputKey::Char('N') => {
            state.prompt = Some(PromptState::new(PromptKind::NewDirectory));
            UpdateResult::none()
        }
        InputKey::Char('D') => {
            if let Some(selection) = session.tree.selection() {
                state.prompt = Some(PromptState::new(PromptKind::ConfirmDeleteFile {
                    path: selection.path.clone(),
                }));
            }
            UpdateResult::none()
        }
        InputKey::Char('m') => {
            if let Some(selection) = session.tree.selection() {
                state.prompt = Some(PromptState::new(PromptKind::RenameFile {
                    from: selection.path.clone(),
                }));
            }
            UpdateResult::none()
        }
        InputKey::Char('u') => {
            let directory = match session.tree.selection() {
                Some(selection) if selection.node_type == NodeType::Directory => {
                    selection.path.clone()
                }
                _ => String::new(),
            };
            state.prompt = Some(PromptState::new(PromptKind::UploadFile { directory }));
            UpdateResult::none()
        }
        InputKey::Char('g') => {
            let Some(selection) = session.tree.selection() else {
                return UpdateResult::none();
            };
            if !selection.is_file() {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::DownloadFile {
                generation,
                bot_id,
                path: selection.path.clone(),
            })
        }
        _ => UpdateResult::none(),
    }
}

fn handle_editor_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(session) = state.session.as_mut() else {
        return UpdateResult::none();
    };
    let generation = session.generation;
    let bot_id = session.bot_id;

    if key == InputKey::Ctrl('s') {
        let Some(path) = session.files.open_path().map(String::from) else {
            return UpdateResult::none();
        };
        let Some(editor) = session.files.editor() else {
            return UpdateResult::none();
        };
        return UpdateResult::action(UpdateAction::SaveFile {
            generation,
            bot_id,
            path,
            content: editor.content(),
        });
    }
    if key == InputKey::Esc {
        session.files.close();
        return UpdateResult::none();
    }

    let Some(editor) = session.files.editor_mut() else {
        return UpdateResult::none();
    };
    match key {
        InputKey::Char(c) => editor.insert_char(c),
        InputKey::Enter => editor.insert_newline(),
        InputKey::Backspace => editor.backspace(),
        InputKey::Up => editor.move_up(),
        InputKey::Down => editor.move_down(),
        InputKey::Left => editor.move_left(),
        InputKey::Right => editor.move_right(),
        InputKey::Tab => {
            for _ in 0..4 {
                editor.insert_char(' ');
            }
        }
        _ => {}
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────
// Database tab
// ─────────────────────────────────────────────────────────────────────

fn handle_database_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(session) = state.session.as_mut() else {
        return UpdateResult::none();
    };
    let generation = session.generation;
    let bot_id = session.bot_id;

    match key {
        InputKey::Esc | InputKey::Char('q') => {
            if session.db.back() {
                UpdateResult::none()
            } else {
                leave_detail(state)
            }
        }
        InputKey::Up | InputKey::Char('k') => {
            session.db.move_cursor(-1);
            UpdateResult::none()
        }
        InputKey::Down | InputKey::Char('j') => {
            session.db.move_cursor(1);
            UpdateResult::none()
        }
        InputKey::Enter => match session.db.level {
            DbLevel::Databases => {
                if let Some(db_name) = session.db.enter_selected_db() {
                    UpdateResult::action(UpdateAction::LoadTables {
                        generation,
                        bot_id,
                        db_name,
                    })
                } else {
                    UpdateResult::none()
                }
            }
            DbLevel::Tables => {
                let Some(table) = session.db.enter_selected_table() else {
                    return UpdateResult::none();
                };
                let Some(db_name) = session.db.selected_db.clone() else {
                    return UpdateResult::none();
                };
                UpdateResult::action(UpdateAction::LoadTable {
                    generation,
                    bot_id,
                    db_name,
                    table,
                })
            }
            DbLevel::Rows => {
                // Edit the selected row
                let row_id = session.db.selected_row_id();
                if let (Some(row), Some(row_id)) = (session.db.selected_row().cloned(), row_id) {
                    session.db.form = Some(RowForm::new(
                        &session.db.columns,
                        FormMode::Edit,
                        Some(&row),
                        Some(row_id),
                    ));
                }
                UpdateResult::none()
            }
        },
        InputKey::Char('c') if session.db.level == DbLevel::Rows => {
            session.db.form = Some(RowForm::new(
                &session.db.columns,
                FormMode::Create,
                None,
                None,
            ));
            UpdateResult::none()
        }
        InputKey::Char('D') if session.db.level == DbLevel::Rows => {
            if session.db.selected_row_id().is_some() {
                state.prompt = Some(PromptState::new(PromptKind::ConfirmDeleteRow));
            }
            UpdateResult::none()
        }
        InputKey::Char('T') if session.db.level == DbLevel::Tables => {
            state.prompt = Some(PromptState::new(PromptKind::NewTableName));
            UpdateResult::none()
        }
        InputKey::Char('+') if session.db.level == DbLevel::Rows => {
            state.prompt = Some(PromptState::new(PromptKind::AddColumn));
            UpdateResult::none()
        }
        InputKey::Char('M') if session.db.level == DbLevel::Rows => {
            state.prompt = Some(PromptState::new(PromptKind::RenameColumn));
            UpdateResult::none()
        }
        InputKey::Char('X') if session.db.level == DbLevel::Rows => {
            state.prompt = Some(PromptState::new(PromptKind::DeleteColumn));
            UpdateResult::none()
        }
        InputKey::Char(':') if session.db.selected_db.is_some() => {
            state.prompt = Some(PromptState::new(PromptKind::Query));
            UpdateResult::none()
        }
        InputKey::Char('r') => match session.db.level {
            DbLevel::Databases => {
                session.db.loading = true;
                UpdateResult::action(UpdateAction::LoadDatabases { generation, bot_id })
            }
            DbLevel::Tables => match session.db.selected_db.clone() {
                Some(db_name) => UpdateResult::action(UpdateAction::LoadTables {
                    generation,
                    bot_id,
                    db_name,
                }),
                None => UpdateResult::none(),
            },
            DbLevel::Rows => {
                match (
                    session.db.selected_db.clone(),
                    session.db.selected_table.clone(),
                ) {
                    (Some(db_name), Some(table)) => {
                        UpdateResult::action(UpdateAction::LoadTable {
                            generation,
                            bot_id,
                            db_name,
                            table,
                        })
                    }
                    _ => UpdateResult::none(),
                }
            }
        },
        _ => UpdateResult::none(),
    }
}

fn handle_row_form_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(session) = state.session.as_mut() else {
        return UpdateResult::none();
    };
    let generation = session.generation;
    let bot_id = session.bot_id;

    let (submit, mode, row_id) = {
        let Some(form) = session.db.form.as_mut() else {
            return UpdateResult::none();
        };
        match key {
            InputKey::Esc => {
                session.db.form = None;
                return UpdateResult::none();
            }
            InputKey::Tab | InputKey::Down => {
                form.next_field();
                return UpdateResult::none();
            }
            InputKey::BackTab | InputKey::Up => {
                form.prev_field();
                return UpdateResult::none();
            }
            InputKey::Char(c) => {
                form.insert_char(c);
                return UpdateResult::none();
            }
            InputKey::Backspace => {
                form.backspace();
                return UpdateResult::none();
            }
            InputKey::Enter => (
                form.submit(&session.db.columns),
                form.mode,
                form.row_id.clone(),
            ),
            _ => return UpdateResult::none(),
        }
    };

    match submit {
        // Validation failures block the request entirely
        Err(err) => {
            state.notify_failure("row form", &err);
            UpdateResult::none()
        }
        Ok(row) => {
            let (Some(db_name), Some(table)) = (
                session.db.selected_db.clone(),
                session.db.selected_table.clone(),
            ) else {
                return UpdateResult::none();
            };
            match (mode, row_id) {
                (FormMode::Edit, Some(row_id)) => UpdateResult::action(UpdateAction::UpdateRow {
                    generation,
                    bot_id,
                    db_name,
                    table,
                    row_id,
                    row,
                }),
                _ => UpdateResult::action(UpdateAction::InsertRow {
                    generation,
                    bot_id,
                    db_name,
                    table,
                    row,
                }),
            }
        }
    }
}

fn handle_create_table_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(session) = state.session.as_mut() else {
        return UpdateResult::none();
    };
    let generation = session.generation;
    let bot_id = session.bot_id;

    let built = {
        let Some(form) = session.db.create_table.as_mut() else {
            return UpdateResult::none();
        };
        match key {
            InputKey::Esc => {
                session.db.create_table = None;
                return UpdateResult::none();
            }
            InputKey::Char('a') => {
                state.prompt = Some(PromptState::new(PromptKind::AddDraftColumn));
                return UpdateResult::none();
            }
            InputKey::Up | InputKey::Char('k') => {
                form.move_cursor(-1);
                return UpdateResult::none();
            }
            InputKey::Down | InputKey::Char('j') => {
                form.move_cursor(1);
                return UpdateResult::none();
            }
            InputKey::Char(' ') => {
                let cursor = form.cursor;
                form.toggle_pk(cursor);
                return UpdateResult::none();
            }
            InputKey::Char('n') => {
                let cursor = form.cursor;
                form.toggle_notnull(cursor);
                return UpdateResult::none();
            }
            InputKey::Enter => form.build(),
            _ => return UpdateResult::none(),
        }
    };

    match built {
        Err(err) => {
            state.notify_failure("create table", &err);
            UpdateResult::none()
        }
        Ok((table, columns)) => {
            let Some(db_name) = session.db.selected_db.clone() else {
                return UpdateResult::none();
            };
            UpdateResult::action(UpdateAction::CreateTable {
                generation,
                bot_id,
                db_name,
                table,
                columns,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Logs tab
// ─────────────────────────────────────────────────────────────────────

fn handle_logs_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(session) = state.session.as_mut() else {
        return UpdateResult::none();
    };
    let generation = session.generation;
    let bot_id = session.bot_id;

    match key {
        InputKey::Esc | InputKey::Char('q') => leave_detail(state),
        InputKey::Char('a') => {
            if session.logs.toggle_auto_refresh() {
                UpdateResult::action(UpdateAction::StartLogsPolling { generation, bot_id })
            } else {
                UpdateResult::action(UpdateAction::CancelPolls {
                    keys: vec![crate::polling::PollKey::Logs(bot_id)],
                })
            }
        }
        InputKey::Char('r') => UpdateResult::action(UpdateAction::LoadLogs { generation, bot_id }),
        InputKey::Up | InputKey::Char('k') => {
            session.logs.scroll_up(1);
            UpdateResult::none()
        }
        InputKey::Down | InputKey::Char('j') => {
            session.logs.scroll_down(1);
            UpdateResult::none()
        }
        InputKey::PageUp => {
            session.logs.scroll_up(20);
            UpdateResult::none()
        }
        InputKey::PageDown => {
            session.logs.scroll_down(20);
            UpdateResult::none()
        }
        InputKey::End | InputKey::Char('G') => {
            session.logs.scroll_to_end();
            UpdateResult::none()
        }
        _ => UpdateResult::none(),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Prompts
// ─────────────────────────────────────────────────────────────────────

fn handle_prompt_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(mut prompt) = state.prompt.take() else {
        return UpdateResult::none();
    };

    if prompt.kind.is_confirm() {
        return match key {
            InputKey::Char('y') | InputKey::Char('Y') | InputKey::Enter => {
                resolve_confirm(state, prompt.kind)
            }
            InputKey::Char('n') | InputKey::Char('N') | InputKey::Esc => UpdateResult::none(),
            _ => {
                state.prompt = Some(prompt);
                UpdateResult::none()
            }
        };
    }

    match key {
        InputKey::Esc => UpdateResult::none(),
        InputKey::Char(c) => {
            prompt.input.push(c);
            state.prompt = Some(prompt);
            UpdateResult::none()
        }
        InputKey::Backspace => {
            prompt.input.pop();
            state.prompt = Some(prompt);
            UpdateResult::none()
        }
        InputKey::Enter => resolve_prompt(state, prompt),
        _ => {
            state.prompt = Some(prompt);
            UpdateResult::none()
        }
    }
}

fn resolve_confirm(state: &mut AppState, kind: PromptKind) -> UpdateResult {
    match kind {
        PromptKind::ConfirmDeleteBot { bot_id, .. } => {
            UpdateResult::action(UpdateAction::DeleteBot { bot_id })
        }
        PromptKind::ConfirmDeleteFile { path } => {
            let Some(session) = state.session.as_ref() else {
                return UpdateResult::none();
            };
            UpdateResult::action(UpdateAction::PerformFileOp {
                generation: session.generation,
                bot_id: session.bot_id,
                op: FileOp::Delete(path),
            })
        }
        PromptKind::ConfirmDeleteRow => {
            let Some(session) = state.session.as_ref() else {
                return UpdateResult::none();
            };
            let (Some(db_name), Some(table), Some(row_id)) = (
                session.db.selected_db.clone(),
                session.db.selected_table.clone(),
                session.db.selected_row_id(),
            ) else {
                return UpdateResult::none();
            };
            UpdateResult::action(UpdateAction::DeleteRow {
                generation: session.generation,
                bot_id: session.bot_id,
                db_name,
                table,
                row_id,
            })
        }
        _ => UpdateResult::none(),
    }
}

fn resolve_prompt(state: &mut AppState, prompt: PromptState) -> UpdateResult {
    let input = prompt.input.trim().to_string();
    let Some(session) = state.session.as_ref() else {
        return UpdateResult::none();
    };
    let generation = session.generation;
    let bot_id = session.bot_id;

    match prompt.kind {
        PromptKind::NewFile | PromptKind::NewDirectory | PromptKind::RenameFile { .. }
            if input.is_empty() =>
        {
            state.notify_failure(
                "input",
                &botdeck_core::Error::validation("a path is required"),
            );
            UpdateResult::none()
        }
        PromptKind::NewFile => UpdateResult::action(UpdateAction::PerformFileOp {
            generation,
            bot_id,
            op: FileOp::Create(input),
        }),
        PromptKind::NewDirectory => UpdateResult::action(UpdateAction::PerformFileOp {
            generation,
            bot_id,
            op: FileOp::Mkdir(input),
        }),
        PromptKind::RenameFile { from } => UpdateResult::action(UpdateAction::PerformFileOp {
            generation,
            bot_id,
            op: FileOp::Rename { from, to: input },
        }),
        PromptKind::UploadFile { directory } => {
            if input.is_empty() {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::PerformFileOp {
                generation,
                bot_id,
                op: FileOp::Upload {
                    local_path: input,
                    directory,
                },
            })
        }
        PromptKind::NewTableName => {
            if input.is_empty() {
                return UpdateResult::none();
            }
            let Some(session) = state.session.as_mut() else {
                return UpdateResult::none();
            };
            let mut form = CreateTableForm::new();
            form.table_name = input;
            session.db.create_table = Some(form);
            UpdateResult::none()
        }
        PromptKind::AddDraftColumn => {
            let Some(session) = state.session.as_mut() else {
                return UpdateResult::none();
            };
            match parse_column_spec(&input) {
                Ok(draft) => {
                    if let Some(form) = session.db.create_table.as_mut() {
                        form.add_column(draft);
                    }
                    UpdateResult::none()
                }
                Err(err) => {
                    state.notify_failure("column", &err);
                    UpdateResult::none()
                }
            }
        }
        PromptKind::AddColumn => {
            let (Some(db_name), Some(table)) = (
                session.db.selected_db.clone(),
                session.db.selected_table.clone(),
            ) else {
                return UpdateResult::none();
            };
            match parse_column_spec(&input) {
                Ok(draft) => UpdateResult::action(UpdateAction::AddColumn {
                    generation,
                    bot_id,
                    db_name,
                    table,
                    column: botdeck_api::ColumnDef {
                        name: draft.name,
                        col_type: draft.col_type,
                        notnull: draft.notnull,
                        pk: draft.pk,
                    },
                }),
                Err(err) => {
                    state.notify_failure("column", &err);
                    UpdateResult::none()
                }
            }
        }
        PromptKind::RenameColumn => {
            let (Some(db_name), Some(table)) = (
                session.db.selected_db.clone(),
                session.db.selected_table.clone(),
            ) else {
                return UpdateResult::none();
            };
            let Some((old_name, new_name)) = input.split_once(':') else {
                state.notify_failure(
                    "rename",
                    &botdeck_core::Error::validation("expected old:new"),
                );
                return UpdateResult::none();
            };
            UpdateResult::action(UpdateAction::RenameColumn {
                generation,
                bot_id,
                db_name,
                table,
                old_name: old_name.trim().to_string(),
                new_name: new_name.trim().to_string(),
            })
        }
        PromptKind::DeleteColumn => {
            let (Some(db_name), Some(table)) = (
                session.db.selected_db.clone(),
                session.db.selected_table.clone(),
            ) else {
                return UpdateResult::none();
            };
            if input.is_empty() {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::DeleteColumn {
                generation,
                bot_id,
                db_name,
                table,
                column: input,
            })
        }
        PromptKind::Query => {
            let Some(db_name) = session.db.selected_db.clone() else {
                return UpdateResult::none();
            };
            if input.is_empty() {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::ExecuteQuery {
                generation,
                bot_id,
                db_name,
                query: input,
            })
        }
        // Confirm prompts are resolved by handle_prompt_key directly
        PromptKind::ConfirmDeleteBot { .. }
        | PromptKind::ConfirmDeleteFile { .. }
        | PromptKind::ConfirmDeleteRow => UpdateResult::none(),
    }
}
