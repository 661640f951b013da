//! Settings parser for ~/.config/botdeck/config.toml

mod types;

pub use types::{PollSettings, Settings};

use std::path::PathBuf;

use botdeck_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const BOTDECK_DIR: &str = "botdeck";

/// Environment variable overriding the configured server URL
pub const SERVER_ENV: &str = "BOTDECK_SERVER";

/// Path of the user config file
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(BOTDECK_DIR).join(CONFIG_FILENAME)
}

/// Load settings with the documented precedence:
/// CLI `--server` flag > `BOTDECK_SERVER` env > config file > defaults.
///
/// A missing config file is not an error; a present but unparseable one
/// is, since silently ignoring a typo'd config would be worse than
/// failing fast at startup.
pub fn load_settings(cli_server: Option<&str>) -> Result<Settings> {
    let mut settings = match std::fs::read_to_string(config_path()) {
        Ok(raw) => toml::from_str::<Settings>(&raw).map_err(|e| Error::ConfigInvalid {
            message: format!("{}: {e}", config_path().display()),
        })?,
        Err(_) => Settings::default(),
    };

    if let Ok(env_server) = std::env::var(SERVER_ENV) {
        if !env_server.trim().is_empty() {
            settings.server = env_server;
        }
    }
    if let Some(server) = cli_server {
        settings.server = server.to_string();
    }
    info!(server = %settings.server, "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server, "http://localhost:3000");
        assert_eq!(settings.poll.status_secs, 5);
        assert_eq!(settings.poll.metrics_secs, 30);
        assert_eq!(settings.poll.logs_secs, 2);
        assert_eq!(settings.poll.converge_secs, 2);
        assert_eq!(settings.log_lines, 200);
        assert_eq!(settings.metrics_hours, 1);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            server = "http://bots.internal:8080"

            [poll]
            status_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(settings.server, "http://bots.internal:8080");
        assert_eq!(settings.poll.status_secs, 10);
        assert_eq!(settings.poll.logs_secs, 2, "unset fields keep defaults");
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
