//! Settings type definitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Poll cadences, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Bot status while a detail view is open
    pub status_secs: u64,
    /// Metrics samples while the overview section is visible
    pub metrics_secs: u64,
    /// Log tail while auto-refresh is toggled on
    pub logs_secs: u64,
    /// One-shot list re-poll after observing an installing status
    pub converge_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            status_secs: 5,
            metrics_secs: 30,
            logs_secs: 2,
            converge_secs: 2,
        }
    }
}

impl PollSettings {
    pub fn status(&self) -> Duration {
        Duration::from_secs(self.status_secs)
    }

    pub fn metrics(&self) -> Duration {
        Duration::from_secs(self.metrics_secs)
    }

    pub fn logs(&self) -> Duration {
        Duration::from_secs(self.logs_secs)
    }

    pub fn converge(&self) -> Duration {
        Duration::from_secs(self.converge_secs)
    }
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Supervisor base URL
    pub server: String,
    /// Poll cadences
    pub poll: PollSettings,
    /// Lines requested per log poll
    pub log_lines: u32,
    /// Metrics window requested from the backend
    pub metrics_hours: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: "http://localhost:3000".to_string(),
            poll: PollSettings::default(),
            log_lines: 200,
            metrics_hours: 1,
        }
    }
}
