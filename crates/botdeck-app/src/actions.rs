//! Executes the side effects returned by `handler::update`
//!
//! The update function is pure; everything that talks to the gateway or
//! the poll scheduler happens here. Each dispatched fetch is stamped
//! with a fresh sequence from the shared [`SeqGuard`] at dispatch time
//! and with the generation it was issued under, so the update side can
//! discard superseded or torn-down completions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use botdeck_api::Gateway;
use botdeck_core::prelude::*;

use crate::config::Settings;
use crate::handler::UpdateAction;
use crate::message::{BotCommand, FileOp, Message};
use crate::polling::{PollKey, PollScheduler, SeqGuard};

/// Everything the dispatch side needs, cheap to clone per task
#[derive(Clone)]
pub struct ActionContext {
    pub gateway: Gateway,
    pub msg_tx: mpsc::Sender<Message>,
    pub scheduler: PollScheduler,
    pub seq: Arc<SeqGuard>,
    pub settings: Settings,
}

impl ActionContext {
    fn send(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }
}

/// Perform one action from the update loop
pub fn handle_action(action: UpdateAction, ctx: &ActionContext) {
    match action {
        // ─────────────────────────────────────────────────────
        // Dashboard
        // ─────────────────────────────────────────────────────
        UpdateAction::LoadBots => {
            let (gateway, tx, seq) = (ctx.gateway.clone(), ctx.send(), ctx.seq.clone());
            tokio::spawn(async move {
                let seq = seq.issue(PollKey::Bots);
                let result = gateway.list_bots().await;
                let _ = tx.send(Message::BotsLoaded { seq, result }).await;
            });
        }

        UpdateAction::ScheduleConvergeRepoll => {
            let (gateway, tx, seq) = (ctx.gateway.clone(), ctx.send(), ctx.seq.clone());
            let delay = ctx.settings.poll.converge();
            ctx.scheduler.schedule_once(PollKey::Bots, delay, async move {
                let seq = seq.issue(PollKey::Bots);
                let result = gateway.list_bots().await;
                let _ = tx.send(Message::BotsLoaded { seq, result }).await;
            });
        }

        UpdateAction::RunCommand { bot_id, command } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = match command {
                    BotCommand::Start => gateway.start(bot_id).await,
                    BotCommand::Stop => gateway.stop(bot_id).await,
                    BotCommand::Restart => gateway.restart(bot_id).await,
                };
                let _ = tx
                    .send(Message::CommandFinished {
                        bot_id,
                        command,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::DeleteBot { bot_id } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.delete_bot(bot_id).await;
                let _ = tx.send(Message::BotDeleted { bot_id, result }).await;
            });
        }

        // ─────────────────────────────────────────────────────
        // Session polling
        // ─────────────────────────────────────────────────────
        UpdateAction::StartStatusPolling { generation, bot_id } => {
            let (gateway, tx, seq) = (ctx.gateway.clone(), ctx.send(), ctx.seq.clone());
            let key = PollKey::Status(bot_id);
            ctx.scheduler
                .schedule(key, ctx.settings.poll.status(), move || {
                    let (gateway, tx, seq) = (gateway.clone(), tx.clone(), seq.clone());
                    async move {
                        let seq = seq.issue(key);
                        let result = gateway.status(bot_id).await;
                        let _ = tx
                            .send(Message::StatusPolled {
                                generation,
                                seq,
                                result,
                            })
                            .await;
                    }
                });
        }

        UpdateAction::StartMetricsPolling { generation, bot_id } => {
            let (gateway, tx, seq) = (ctx.gateway.clone(), ctx.send(), ctx.seq.clone());
            let hours = ctx.settings.metrics_hours;
            let key = PollKey::Metrics(bot_id);
            ctx.scheduler
                .schedule(key, ctx.settings.poll.metrics(), move || {
                    let (gateway, tx, seq) = (gateway.clone(), tx.clone(), seq.clone());
                    async move {
                        let seq = seq.issue(key);
                        let result = gateway.metrics(bot_id, hours).await;
                        let _ = tx
                            .send(Message::MetricsLoaded {
                                generation,
                                seq,
                                result,
                            })
                            .await;
                    }
                });
        }

        UpdateAction::StartLogsPolling { generation, bot_id } => {
            let (gateway, tx, seq) = (ctx.gateway.clone(), ctx.send(), ctx.seq.clone());
            let lines = ctx.settings.log_lines;
            let key = PollKey::Logs(bot_id);
            ctx.scheduler
                .schedule(key, ctx.settings.poll.logs(), move || {
                    let (gateway, tx, seq) = (gateway.clone(), tx.clone(), seq.clone());
                    async move {
                        let seq = seq.issue(key);
                        let result = gateway.logs(bot_id, lines).await;
                        let _ = tx
                            .send(Message::LogsPolled {
                                generation,
                                seq,
                                result,
                            })
                            .await;
                    }
                });
        }

        UpdateAction::LoadLogs { generation, bot_id } => {
            let (gateway, tx, seq) = (ctx.gateway.clone(), ctx.send(), ctx.seq.clone());
            let lines = ctx.settings.log_lines;
            tokio::spawn(async move {
                let seq = seq.issue(PollKey::Logs(bot_id));
                let result = gateway.logs(bot_id, lines).await;
                let _ = tx
                    .send(Message::LogsPolled {
                        generation,
                        seq,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::CancelPolls { keys } => {
            for key in keys {
                ctx.scheduler.cancel(key);
            }
        }

        // ─────────────────────────────────────────────────────
        // Workspace files
        // ─────────────────────────────────────────────────────
        UpdateAction::LoadTree { generation, bot_id } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.file_tree(bot_id).await;
                let _ = tx.send(Message::TreeLoaded { generation, result }).await;
            });
        }

        UpdateAction::OpenFile {
            generation,
            bot_id,
            path,
            kind,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.read_file(bot_id, &path, kind.is_binary()).await;
                let _ = tx
                    .send(Message::FileLoaded {
                        generation,
                        path,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::SaveFile {
            generation,
            bot_id,
            path,
            content,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.write_file(bot_id, &path, &content).await;
                let _ = tx
                    .send(Message::FileSaved {
                        generation,
                        path,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::PerformFileOp {
            generation,
            bot_id,
            op,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = perform_file_op(&gateway, bot_id, &op).await;
                let _ = tx
                    .send(Message::FileOpFinished {
                        generation,
                        op,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::DownloadFile {
            generation,
            bot_id,
            path,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = download_to_cwd(&gateway, bot_id, &path).await;
                let _ = tx
                    .send(Message::FileDownloaded {
                        generation,
                        path,
                        result,
                    })
                    .await;
            });
        }

        // ─────────────────────────────────────────────────────
        // SQLite browser
        // ─────────────────────────────────────────────────────
        UpdateAction::LoadDatabases { generation, bot_id } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.databases(bot_id).await;
                let _ = tx
                    .send(Message::DatabasesLoaded { generation, result })
                    .await;
            });
        }

        UpdateAction::LoadTables {
            generation,
            bot_id,
            db_name,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.tables(bot_id, &db_name).await;
                let _ = tx
                    .send(Message::TablesLoaded {
                        generation,
                        db_name,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::LoadTable {
            generation,
            bot_id,
            db_name,
            table,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = load_table(&gateway, bot_id, &db_name, &table).await;
                let _ = tx
                    .send(Message::TableLoaded {
                        generation,
                        table,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::InsertRow {
            generation,
            bot_id,
            db_name,
            table,
            row,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.insert_row(bot_id, &db_name, &table, &row).await;
                let _ = tx
                    .send(Message::RowMutationFinished { generation, result })
                    .await;
            });
        }

        UpdateAction::UpdateRow {
            generation,
            bot_id,
            db_name,
            table,
            row_id,
            row,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway
                    .update_row(bot_id, &db_name, &table, &row_id, &row)
                    .await;
                let _ = tx
                    .send(Message::RowMutationFinished { generation, result })
                    .await;
            });
        }

        UpdateAction::DeleteRow {
            generation,
            bot_id,
            db_name,
            table,
            row_id,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.delete_row(bot_id, &db_name, &table, &row_id).await;
                let _ = tx
                    .send(Message::RowMutationFinished { generation, result })
                    .await;
            });
        }

        UpdateAction::CreateTable {
            generation,
            bot_id,
            db_name,
            table,
            columns,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway
                    .create_table(bot_id, &db_name, &table, &columns)
                    .await;
                let _ = tx.send(Message::DdlFinished { generation, result }).await;
            });
        }

        UpdateAction::AddColumn {
            generation,
            bot_id,
            db_name,
            table,
            column,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.add_column(bot_id, &db_name, &table, &column).await;
                let _ = tx.send(Message::DdlFinished { generation, result }).await;
            });
        }

        UpdateAction::RenameColumn {
            generation,
            bot_id,
            db_name,
            table,
            old_name,
            new_name,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway
                    .rename_column(bot_id, &db_name, &table, &old_name, &new_name)
                    .await;
                let _ = tx.send(Message::DdlFinished { generation, result }).await;
            });
        }

        UpdateAction::DeleteColumn {
            generation,
            bot_id,
            db_name,
            table,
            column,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway
                    .delete_column(bot_id, &db_name, &table, &column)
                    .await;
                let _ = tx.send(Message::DdlFinished { generation, result }).await;
            });
        }

        UpdateAction::ExecuteQuery {
            generation,
            bot_id,
            db_name,
            query,
        } => {
            let (gateway, tx) = (ctx.gateway.clone(), ctx.send());
            tokio::spawn(async move {
                let result = gateway.execute(bot_id, &db_name, &query).await;
                let _ = tx.send(Message::QueryExecuted { generation, result }).await;
            });
        }
    }
}

async fn perform_file_op(gateway: &Gateway, bot_id: i64, op: &FileOp) -> Result<()> {
    match op {
        FileOp::Create(path) => gateway.create_file(bot_id, path).await,
        FileOp::Delete(path) => gateway.delete_file(bot_id, path).await,
        FileOp::Rename { from, to } => gateway.rename_file(bot_id, from, to).await,
        FileOp::Mkdir(path) => gateway.create_directory(bot_id, path).await,
        FileOp::Upload {
            local_path,
            directory,
        } => {
            let filename = Path::new(local_path)
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| Error::validation(format!("not a file path: {local_path}")))?;
            let bytes = tokio::fs::read(local_path).await?;
            gateway
                .upload_file(bot_id, directory, filename, bytes)
                .await
        }
    }
}

/// Fetch structure then rows; the structure drives form generation, so
/// both arrive (or fail) together.
async fn load_table(
    gateway: &Gateway,
    bot_id: i64,
    db_name: &str,
    table: &str,
) -> Result<(Vec<botdeck_core::TableColumn>, botdeck_api::RowsPayload)> {
    let columns = gateway.table_structure(bot_id, db_name, table).await?;
    let rows = gateway.table_rows(bot_id, db_name, table).await?;
    Ok((columns, rows))
}

async fn download_to_cwd(gateway: &Gateway, bot_id: i64, path: &str) -> Result<PathBuf> {
    let bytes = gateway.download_file(bot_id, path).await?;
    let filename = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("download");
    let dest = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(filename);
    tokio::fs::write(&dest, bytes).await?;
    info!("downloaded {path} to {}", dest.display());
    Ok(dest)
}
