//! # botdeck-core - Core Domain Types
//!
//! Foundation crate for botdeck. Provides domain types, error handling,
//! lifecycle reconciliation, and schema introspection types.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Bots (`bot`)
//! - [`BotSummary`] - A bot as listed by the backend, cached wholesale
//! - [`StatusPayload`] - Raw `{running, status}` poll snapshot
//! - [`MetricPoint`] - One cpu/memory sample for the dashboard charts
//!
//! ### Lifecycle (`lifecycle`)
//! - [`BotPhase`] - Finite lifecycle phase (Stopped, Running, Installing, ...)
//! - [`reconcile()`] - Pure derivation of a phase from a poll snapshot
//! - [`ActionSet`] - Start/stop/restart availability as a function of phase
//!
//! ### Schema (`schema`)
//! - [`TableColumn`] / [`TableRow`] - Structure introspection and row payloads
//! - [`primary_key_of()`] - pk column lookup with the documented `"id"` fallback
//!
//! ### Files (`files`)
//! - [`FileNode`] - Workspace tree node keyed by stable path
//! - [`MediaKind`] - Extension-based text/image/video/audio classification
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use botdeck_core::prelude::*;
//! ```

pub mod bot;
pub mod error;
pub mod files;
pub mod lifecycle;
pub mod logging;
pub mod schema;

/// Prelude for common imports used throughout all botdeck crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use bot::{BotSummary, BotType, MetricPoint, StatusPayload};
pub use error::{Error, Result, ResultExt};
pub use files::{FileNode, MediaKind, NodeType};
pub use lifecycle::{reconcile, ActionSet, BotPhase};
pub use schema::{primary_key_of, TableColumn, TableRow, FALLBACK_PRIMARY_KEY};
