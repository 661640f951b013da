//! Recurring poll timers and the stale-response guard
//!
//! All "live" data in the console is poll-driven; there is no push
//! channel. Two pieces keep that honest:
//!
//! - [`PollScheduler`] owns at most one timer task per [`PollKey`] and
//!   replaces (never stacks) on re-schedule. Leaving a view cancels its
//!   keys, so no timers accumulate across navigation.
//! - [`SeqGuard`] hands out a monotonically increasing sequence per key
//!   at dispatch time. A completion is applied only when it is the latest
//!   issued for its key, so a slow early response can never overwrite a
//!   newer one. Cancellation does not abort in-flight fetches; their
//!   completions simply fail the guard.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use botdeck_core::prelude::*;

/// Identity of a recurring poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollKey {
    /// Bot list (dashboard; also the one-shot converge re-poll)
    Bots,
    /// Detail status for one bot
    Status(i64),
    /// Log tail for one bot (auto-refresh)
    Logs(i64),
    /// Dashboard metrics samples
    Metrics(i64),
}

/// Manages recurring timers, one per key
#[derive(Clone, Default)]
pub struct PollScheduler {
    timers: Arc<Mutex<HashMap<PollKey, JoinHandle<()>>>>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn timers(&self) -> std::sync::MutexGuard<'_, HashMap<PollKey, JoinHandle<()>>> {
        self.timers.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a recurring timer under `key`, replacing any existing timer
    /// with the same key. The first tick fires immediately.
    pub fn schedule<F, Fut>(&self, key: PollKey, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick().await;
            }
        });
        if let Some(previous) = self.timers().insert(key, handle) {
            trace!(?key, "replacing existing poll timer");
            previous.abort();
        }
    }

    /// Run `tick` once after `delay`, replacing any timer under `key`.
    ///
    /// Used for the short converge re-poll when an `installing` status is
    /// observed in a list view.
    pub fn schedule_once<Fut>(&self, key: PollKey, delay: Duration, tick: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tick.await;
        });
        if let Some(previous) = self.timers().insert(key, handle) {
            previous.abort();
        }
    }

    /// Cancel the timer under `key`, if any. In-flight fetches already
    /// dispatched by the timer are not aborted; their completions are
    /// dropped by the sequence/liveness checks instead.
    pub fn cancel(&self, key: PollKey) {
        if let Some(handle) = self.timers().remove(&key) {
            handle.abort();
        }
    }

    /// Cancel every timer (application shutdown)
    pub fn cancel_all(&self) {
        for (_, handle) in self.timers().drain() {
            handle.abort();
        }
    }

    /// Whether a live timer exists under `key`
    pub fn is_scheduled(&self, key: PollKey) -> bool {
        self.timers()
            .get(&key)
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

/// Per-key monotonically increasing request sequence.
///
/// `issue` is called at dispatch time; the completion message carries the
/// sequence and the update handler admits it only while it is still the
/// latest issued for its key.
#[derive(Default)]
pub struct SeqGuard {
    issued: Mutex<HashMap<PollKey, u64>>,
}

impl SeqGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn issued(&self) -> std::sync::MutexGuard<'_, HashMap<PollKey, u64>> {
        self.issued.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Stamp a new dispatch under `key`
    pub fn issue(&self, key: PollKey) -> u64 {
        let mut issued = self.issued();
        let seq = issued.entry(key).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Whether `seq` is still the latest issued under `key`
    pub fn is_latest(&self, key: PollKey, seq: u64) -> bool {
        self.issued().get(&key).copied().unwrap_or(0) == seq
    }
}
