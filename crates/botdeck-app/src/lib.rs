//! # botdeck-app - Application State and Reconciliation Engine
//!
//! The client-side core of botdeck: a TEA-style loop that keeps a
//! locally held view of a remote bot's lifecycle, workspace files, and
//! database schema consistent with an asynchronously polled backend.
//!
//! - [`state::AppState`] - the model; owns the bot cache and the active
//!   [`session::ConsoleSession`]
//! - [`message::Message`] - everything that can happen, including fetch
//!   completions stamped with generation + sequence
//! - [`handler::update`] - pure update function returning
//!   [`handler::UpdateAction`]s
//! - [`actions::handle_action`] - executes actions against the gateway
//!   and the [`polling::PollScheduler`]
//!
//! The models themselves ([`lifecycle_model`], [`workspace`],
//! [`file_session`], [`schema_form`], [`logs`]) are plain synchronous
//! state machines, testable without a runtime.

pub mod actions;
pub mod config;
pub mod editor;
pub mod file_session;
pub mod handler;
pub mod input_key;
pub mod lifecycle_model;
pub mod logs;
pub mod message;
pub mod polling;
pub mod schema_form;
pub mod session;
pub mod state;
pub mod workspace;

pub use actions::{handle_action, ActionContext};
pub use config::{load_settings, Settings};
pub use handler::{update, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{BotCommand, FileOp, Message};
pub use polling::{PollKey, PollScheduler, SeqGuard};
pub use session::{ConsoleSession, DbLevel, DetailTab};
pub use state::{AppState, Notice, PromptKind, PromptState, View};
