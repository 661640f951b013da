//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    #[error("Failed to restore terminal: {0}")]
    TerminalRestore(String),

    // ─────────────────────────────────────────────────────────────
    // Backend Gateway Errors
    // ─────────────────────────────────────────────────────────────
    /// Network-level failure: server unreachable, connection reset,
    /// or a body that was not valid JSON.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The server answered with a non-2xx HTTP status.
    #[error("Server returned HTTP {code}")]
    Status { code: u16 },

    /// A 2xx response carrying `{success: false, error}`: a domain
    /// failure with a backend-provided message.
    #[error("{message}")]
    Backend { message: String },

    // ─────────────────────────────────────────────────────────────
    // Client-side Validation Errors
    // ─────────────────────────────────────────────────────────────
    /// Rejected before any request was built (e.g. empty required field).
    #[error("Validation error: {message}")]
    Validation { message: String },

    // ─────────────────────────────────────────────────────────────
    // Media Preview Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Media preview error: {message}")]
    Preview { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(code: u16) -> Self {
        Self::Status { code }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn preview(message: impl Into<String>) -> Self {
        Self::Preview {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error.
    ///
    /// Recoverable errors degrade to the last-known view and are logged;
    /// they never tear the page down.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. }
                | Error::Status { .. }
                | Error::Backend { .. }
                | Error::Validation { .. }
                | Error::Preview { .. }
                | Error::ChannelSend { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::TerminalInit(_) | Error::ConfigInvalid { .. } | Error::ConfigNotFound { .. }
        )
    }

    /// True for transport-level failures that should surface only as a
    /// dismissible notice, keeping the cached view on screen.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Status { .. })
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
