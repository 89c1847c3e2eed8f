//! Configuration management for gitsh
//!
//! This module handles loading, parsing, and managing configuration from:
//! - Configuration files (TOML format)
//! - Command-line arguments (applied by the `cli` module)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::repl::completion::ArgumentKind;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tab completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Git executable configuration
    #[serde(default)]
    pub git: GitConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tab completion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Leading character that marks an internal directive
    #[serde(default = "default_directive_marker")]
    pub directive_marker: char,

    /// Characters that split a reference word (e.g. `master:fea`)
    #[serde(default = "default_reference_punctuation")]
    pub reference_punctuation: Vec<char>,

    /// Characters escaped with a backslash in path candidates
    #[serde(default = "default_escape_chars")]
    pub escape_chars: Vec<char>,

    /// Commands whose arguments complete as references rather than paths
    #[serde(default = "default_reference_commands")]
    pub reference_commands: Vec<String>,
}

/// Git executable configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Program used to run git
    #[serde(default = "default_git_executable")]
    pub executable: String,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_directive_marker() -> char {
    ':'
}

fn default_reference_punctuation() -> Vec<char> {
    vec![':']
}

fn default_escape_chars() -> Vec<char> {
    vec![' ', '\t', '\\', '\'', '"']
}

fn default_reference_commands() -> Vec<String> {
    [
        "branch",
        "checkout",
        "cherry-pick",
        "fetch",
        "merge",
        "pull",
        "push",
        "rebase",
        "reset",
        "revert",
        "switch",
        "tag",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_git_executable() -> String {
    "git".to_string()
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gitsh_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            directive_marker: default_directive_marker(),
            reference_punctuation: default_reference_punctuation(),
            escape_chars: default_escape_chars(),
            reference_commands: default_reference_commands(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: default_git_executable(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// When `path` is `None` the default location is used. A missing file
    /// is not an error and yields the default configuration.
    ///
    /// # Arguments
    /// * `path` - Optional explicit path to the configuration file
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `~/.gitsh/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gitsh")
            .join("config.toml")
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.git.executable.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "git.executable".to_string(),
                value: self.git.executable.clone(),
            }
            .into());
        }

        let marker = self.completion.directive_marker;
        if marker.is_whitespace() || marker == '/' {
            return Err(ConfigError::InvalidValue {
                field: "completion.directive_marker".to_string(),
                value: marker.to_string(),
            }
            .into());
        }

        if let Some(c) = self
            .completion
            .reference_punctuation
            .iter()
            .find(|c| c.is_whitespace())
        {
            return Err(ConfigError::InvalidValue {
                field: "completion.reference_punctuation".to_string(),
                value: format!("{c:?}"),
            }
            .into());
        }

        Ok(())
    }
}

impl CompletionConfig {
    /// Command name to argument kind mapping used by the classifier
    pub fn argument_kinds(&self) -> BTreeMap<String, ArgumentKind> {
        self.reference_commands
            .iter()
            .map(|name| (name.clone(), ArgumentKind::Reference))
            .collect()
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.completion.directive_marker, ':');
        assert_eq!(config.completion.reference_punctuation, vec![':']);
        assert!(config.completion.escape_chars.contains(&' '));
        assert_eq!(config.git.executable, "git");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [completion]
            reference_commands = ["push", "log"]

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.completion.reference_commands, vec!["push", "log"]);
        assert_eq!(config.completion.directive_marker, ':');
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.git.executable, "git");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("[completion\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[git]\nexecutable = \"/usr/local/bin/git\"\n").unwrap();

        let config = Config::load_from_file(Some(&path)).unwrap();
        assert_eq!(config.git.executable, "/usr/local/bin/git");
    }

    #[test]
    fn test_validate_rejects_empty_executable() {
        let mut config = Config::default();
        config.git.executable = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_whitespace_punctuation() {
        let mut config = Config::default();
        config.completion.reference_punctuation.push(' ');
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_argument_kinds() {
        let kinds = CompletionConfig::default().argument_kinds();
        assert_eq!(kinds.get("checkout"), Some(&ArgumentKind::Reference));
        assert_eq!(kinds.get("add"), None);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(
            parsed.completion.reference_commands,
            config.completion.reference_commands
        );
    }
}
