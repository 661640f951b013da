//! Bot domain types as served by the backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Messaging platform a bot runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotType {
    Discord,
    Telegram,
}

impl BotType {
    /// Short label for list rendering
    pub fn label(&self) -> &'static str {
        match self {
            BotType::Discord => "discord",
            BotType::Telegram => "telegram",
        }
    }
}

/// A bot as listed by `GET /api/bots`.
///
/// Owned by the backend. The client holds a read-mostly cache keyed by id
/// and replaces entries wholesale on every poll; summaries are never
/// patched field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSummary {
    pub id: i64,
    pub name: String,
    pub bot_type: BotType,
    /// Raw status tag as last reported by the supervisor
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    #[serde(default)]
    pub memory_mb: Option<f64>,
    #[serde(default)]
    pub start_file: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub last_started_at: Option<String>,
    #[serde(default)]
    pub last_crashed_at: Option<String>,
    #[serde(default)]
    pub git_repo_url: Option<String>,
    #[serde(default)]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub cpu_limit: Option<f64>,
    #[serde(default)]
    pub memory_limit: Option<f64>,
}

impl BotSummary {
    /// Whether the supervisor reported this bot's dependency install as
    /// still outstanding. List views seeing this schedule a short one-shot
    /// re-poll to converge without a push channel.
    pub fn is_installing(&self) -> bool {
        self.status == "installing"
    }
}

/// Payload of `GET /api/bots/{id}/status` (snake_case wire format)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    #[serde(default)]
    pub memory_mb: Option<f64>,
}

/// One sample from `GET /api/bots/{id}/metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub timestamp: String,
    #[serde(default)]
    pub cpu_percent: f64,
    #[serde(default)]
    pub memory_mb: f64,
}

impl MetricPoint {
    /// Parse the sample timestamp (backend emits RFC 3339). Samples with
    /// an unparseable stamp still chart, they just lose their axis label.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_summary_camel_case_wire_format() {
        let json = r#"{
            "id": 7,
            "name": "greeter",
            "botType": "discord",
            "status": "running",
            "pid": 4242,
            "cpuPercent": 1.5,
            "memoryMb": 82.0,
            "startFile": "index.js",
            "gitRepoUrl": "https://example.com/greeter.git",
            "gitBranch": "main",
            "cpuLimit": 50.0,
            "memoryLimit": 256.0
        }"#;
        let bot: BotSummary = serde_json::from_str(json).unwrap();
        assert_eq!(bot.id, 7);
        assert_eq!(bot.bot_type, BotType::Discord);
        assert_eq!(bot.status, "running");
        assert_eq!(bot.pid, Some(4242));
        assert_eq!(bot.git_branch.as_deref(), Some("main"));
    }

    #[test]
    fn test_bot_summary_optional_fields_absent() {
        let json = r#"{"id": 1, "name": "t", "botType": "telegram"}"#;
        let bot: BotSummary = serde_json::from_str(json).unwrap();
        assert_eq!(bot.status, "");
        assert!(bot.pid.is_none());
        assert!(bot.cpu_limit.is_none());
        assert!(!bot.is_installing());
    }

    #[test]
    fn test_is_installing() {
        let json = r#"{"id": 1, "name": "t", "botType": "telegram", "status": "installing"}"#;
        let bot: BotSummary = serde_json::from_str(json).unwrap();
        assert!(bot.is_installing());
    }

    #[test]
    fn test_status_payload_snake_case() {
        let json = r#"{"running": true, "status": "running", "pid": 9, "cpu_percent": 0.4, "memory_mb": 33.2}"#;
        let status: StatusPayload = serde_json::from_str(json).unwrap();
        assert!(status.running);
        assert_eq!(status.status.as_deref(), Some("running"));
        assert_eq!(status.memory_mb, Some(33.2));
    }

    #[test]
    fn test_status_payload_defaults() {
        let status: StatusPayload = serde_json::from_str("{}").unwrap();
        assert!(!status.running);
        assert!(status.status.is_none());
    }
}
