//! Bot lifecycle phases and the status reconciliation rule
//!
//! A bot's phase is derived, never stored independently of the latest
//! status poll: every poll recomputes it from `{running, status}`. Action
//! availability (start/stop/restart) is a total function of the phase;
//! nothing in the UI toggles a button independently of it.

use serde::{Deserialize, Serialize};

use crate::bot::StatusPayload;

/// Finite lifecycle phase of a remote bot process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotPhase {
    /// Process is not running
    #[default]
    Stopped,
    /// Start requested, process not yet up
    Starting,
    /// Process is up and healthy
    Running,
    /// Restart in progress
    Restarting,
    /// Dependency installation is outstanding
    Installing,
    /// Process crashed or the supervisor reported a failure
    Error,
    /// Process failed during startup; terminal until a new start attempt
    #[serde(alias = "errorStartup")]
    ErrorStartup,
}

impl BotPhase {
    /// Parse a raw supervisor status tag. Unknown tags fall back to
    /// `Stopped`, matching the derivation rule's default.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "stopped" => BotPhase::Stopped,
            "starting" => BotPhase::Starting,
            "running" => BotPhase::Running,
            "restarting" => BotPhase::Restarting,
            "installing" => BotPhase::Installing,
            "error" => BotPhase::Error,
            "error_startup" | "errorStartup" => BotPhase::ErrorStartup,
            _ => BotPhase::Stopped,
        }
    }

    /// Transitional or error tags that win over `running: true`
    fn overrides_running(tag: &str) -> bool {
        matches!(
            tag,
            "starting" | "restarting" | "installing" | "error" | "error_startup" | "errorStartup"
        )
    }

    /// A busy phase accepts no user action; it expires only via a later
    /// poll reflecting the supervisor's authoritative status. The client
    /// has no independent notion of "stuck".
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            BotPhase::Starting | BotPhase::Restarting | BotPhase::Installing
        )
    }

    /// Whether a new start attempt is the only way out of this phase
    pub fn is_error(&self) -> bool {
        matches!(self, BotPhase::Error | BotPhase::ErrorStartup)
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            BotPhase::Stopped => "stopped",
            BotPhase::Starting => "starting",
            BotPhase::Running => "running",
            BotPhase::Restarting => "restarting",
            BotPhase::Installing => "installing",
            BotPhase::Error => "error",
            BotPhase::ErrorStartup => "startup failed",
        }
    }
}

impl std::fmt::Display for BotPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derive the phase from a freshly polled status snapshot.
///
/// Rule: when `running` is true and the status tag is not one of the
/// transitional/error tags, the process is authoritatively `Running`;
/// otherwise the tag is used verbatim, defaulting to `Stopped` when
/// absent or unrecognized. Pure and deterministic.
pub fn reconcile(poll: &StatusPayload) -> BotPhase {
    match poll.status.as_deref() {
        Some(tag) if poll.running && !BotPhase::overrides_running(tag) => BotPhase::Running,
        Some(tag) => BotPhase::from_tag(tag),
        None if poll.running => BotPhase::Running,
        None => BotPhase::Stopped,
    }
}

/// Which lifecycle actions are offered to the user.
///
/// Always derived via [`ActionSet::for_phase`]; rendered action rows
/// compare against this table, never against the semantic phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet {
    pub start: bool,
    pub stop: bool,
    pub restart: bool,
}

impl ActionSet {
    /// Total, deterministic mapping from phase to offered actions
    pub fn for_phase(phase: BotPhase) -> Self {
        Self {
            start: matches!(
                phase,
                BotPhase::Stopped | BotPhase::Error | BotPhase::ErrorStartup
            ),
            stop: phase == BotPhase::Running,
            restart: phase == BotPhase::Running,
        }
    }

    /// No action is currently offered
    pub fn is_empty(&self) -> bool {
        !self.start && !self.stop && !self.restart
    }
}
