//! Configuration settings for study-overlay.
//!
//! Settings are loaded from `~/.study-overlay/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Session timer settings.
    pub timer: TimerConfig,
    /// Task list settings.
    pub tasks: TasksConfig,
    /// Chat feed settings.
    pub chat: ChatConfig,
}

/// Session timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Work phase duration in minutes.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Break phase duration in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Task list settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Persist the task list across restarts.
    #[serde(default = "default_true")]
    pub persist: bool,
    /// Token that marks a chat message as a task command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

/// Chat feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Twitch channel to read (without `#`). Empty means test mode only.
    #[serde(default)]
    pub channel: String,
    /// Anonymous nick used for the read-only connection.
    #[serde(default = "default_nick")]
    pub nick: String,
    /// IRC host.
    #[serde(default = "default_host")]
    pub host: String,
    /// IRC port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Delay before reconnecting after the connection drops.
    #[serde(default = "default_reconnect_seconds")]
    pub reconnect_seconds: u64,
    /// Number of chat messages kept on screen.
    #[serde(default = "default_history")]
    pub history: usize,
    /// Username used for messages typed in test mode.
    #[serde(default = "default_test_username")]
    pub test_username: String,
}

// Default value functions for serde
const fn default_work_minutes() -> u32 {
    40
}

const fn default_break_minutes() -> u32 {
    15
}

const fn default_true() -> bool {
    true
}

fn default_command_prefix() -> String {
    "!todo".to_string()
}

fn default_nick() -> String {
    "justinfan12345".to_string()
}

fn default_host() -> String {
    "irc.chat.twitch.tv".to_string()
}

const fn default_port() -> u16 {
    6667
}

const fn default_reconnect_seconds() -> u64 {
    5
}

const fn default_history() -> usize {
    20
}

fn default_test_username() -> String {
    "TestUser".to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            persist: default_true(),
            command_prefix: default_command_prefix(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            channel: String::new(),
            nick: default_nick(),
            host: default_host(),
            port: default_port(),
            reconnect_seconds: default_reconnect_seconds(),
            history: default_history(),
            test_username: default_test_username(),
        }
    }
}

impl ChatConfig {
    /// Whether a live channel is configured.
    #[must_use]
    pub fn has_channel(&self) -> bool {
        !self.channel.trim().trim_start_matches('#').is_empty()
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, OverlayError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            OverlayError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            OverlayError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), OverlayError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| OverlayError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            OverlayError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, OverlayError> {
        serde_yaml::to_string(self)
            .map_err(|e| OverlayError::Config(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.timer.work_minutes, 40);
        assert_eq!(config.timer.break_minutes, 15);
        assert!(config.tasks.persist);
        assert_eq!(config.tasks.command_prefix, "!todo");
        assert_eq!(config.chat.channel, "");
        assert_eq!(config.chat.port, 6667);
        assert_eq!(config.chat.reconnect_seconds, 5);
        assert_eq!(config.chat.history, 20);
        assert!(!config.chat.has_channel());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.timer.work_minutes, 40);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.timer.work_minutes = 50;
        config.chat.channel = "rulacat".to_string();

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.timer.work_minutes, 50);
        assert_eq!(loaded.chat.channel, "rulacat");
        assert!(loaded.chat.has_channel());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r##"
chat:
  channel: "#somebody"
"##;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.chat.channel, "#somebody");
        assert_eq!(config.chat.nick, "justinfan12345");
        assert_eq!(config.timer.break_minutes, 15);
        assert_eq!(config.tasks.command_prefix, "!todo");
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer: [not, a, map]").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, OverlayError::Config(_)));
    }

    #[test]
    fn test_has_channel_ignores_hash_and_whitespace() {
        let mut chat = ChatConfig::default();
        chat.channel = " # ".to_string();
        assert!(!chat.has_channel());
        chat.channel = "#rulacat".to_string();
        assert!(chat.has_channel());
    }
}
