//! Last-known lifecycle state of the bot under inspection
//!
//! Holds the authoritative last-polled snapshot and decides when the
//! action row actually needs re-rendering. Equality is checked against
//! the table of *currently shown* buttons, not against the previous
//! semantic phase: visibility toggles are writes the renderer should not
//! redundantly repeat on fast re-polls.

use botdeck_core::prelude::*;
use botdeck_core::{reconcile, ActionSet, BotPhase, StatusPayload};

/// Outcome of applying one status poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleUpdate {
    /// Semantic phase changed since the previous poll
    pub phase_changed: bool,
    /// The shown action table changed and was replaced
    pub actions_changed: bool,
}

/// Reconciled lifecycle state plus the currently rendered action table
#[derive(Debug, Clone)]
pub struct LifecycleModel {
    phase: BotPhase,
    shown: ActionSet,
    /// Raw snapshot of the last successful poll (pid/cpu/mem display)
    last_status: Option<StatusPayload>,
}

impl Default for LifecycleModel {
    fn default() -> Self {
        let phase = BotPhase::default();
        Self {
            phase,
            shown: ActionSet::for_phase(phase),
            last_status: None,
        }
    }
}

impl LifecycleModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BotPhase {
        self.phase
    }

    /// The action table as currently rendered
    pub fn shown_actions(&self) -> ActionSet {
        self.shown
    }

    pub fn last_status(&self) -> Option<&StatusPayload> {
        self.last_status.as_ref()
    }

    /// Apply a successful status poll.
    ///
    /// Recomputes the phase from the snapshot and swaps the shown action
    /// table only when it differs from what is on screen.
    pub fn apply_poll(&mut self, poll: StatusPayload) -> LifecycleUpdate {
        let next = reconcile(&poll);
        let phase_changed = next != self.phase;
        if phase_changed {
            debug!(from = %self.phase, to = %next, "lifecycle transition");
        }
        self.phase = next;
        self.last_status = Some(poll);

        let derived = ActionSet::for_phase(next);
        let actions_changed = derived != self.shown;
        if actions_changed {
            self.shown = derived;
        }
        LifecycleUpdate {
            phase_changed,
            actions_changed,
        }
    }

    /// A failed poll leaves the last-known state untouched; it is logged
    /// by the caller and surfaced only as a dismissible notice.
    pub fn poll_failed(&self, err: &Error) {
        warn!(phase = %self.phase, "status poll failed: {err}");
    }
}
