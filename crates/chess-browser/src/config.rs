//! Configuration file loading for the chess browser.
//!
//! Settings live in an optional `chess-browser.toml`. Every field has a
//! default, so a missing file or an empty one behaves the same.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::report::LineEnding;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Where the game database lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Defaults to `data/chess.db`.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/chess.db")
}

/// Defaults for rendering query results.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Line ending for text reports (`"lf"` or `"crlf"`).
    #[serde(default)]
    pub line_ending: LineEnding,
    /// Include the movetext of each game in reports.
    #[serde(default)]
    pub show_moves: bool,
}

/// Main browser configuration structure.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct BrowserConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl BrowserConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::read(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reads the configuration from an explicit path.
    ///
    /// Unlike [`Self::load()`], a missing file is an error.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default configuration file path, `chess-browser.toml` in
    /// the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-browser.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[database]
path = "/var/lib/chess/games.db"

[output]
line_ending = "crlf"
show_moves = true
"#;

        let config: BrowserConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.database.path, PathBuf::from("/var/lib/chess/games.db"));
        assert_eq!(config.output.line_ending, LineEnding::Crlf);
        assert!(config.output.show_moves);
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: BrowserConfig = toml::from_str("").unwrap();

        assert_eq!(config.database.path, PathBuf::from("data/chess.db"));
        assert_eq!(config.output.line_ending, LineEnding::Lf);
        assert!(!config.output.show_moves);
        assert_eq!(config, BrowserConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: BrowserConfig = toml::from_str("[output]\nshow_moves = true\n").unwrap();

        assert!(config.output.show_moves);
        assert_eq!(config.output.line_ending, LineEnding::Lf);
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn test_invalid_line_ending_is_rejected() {
        let result: Result<BrowserConfig, _> = toml::from_str("[output]\nline_ending = \"cr\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"games.db\"").unwrap();

        let config = BrowserConfig::read(file.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("games.db"));
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let result = BrowserConfig::read(Path::new("/no/such/chess-browser.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_read_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database\npath = 3").unwrap();

        let result = BrowserConfig::read(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(
            BrowserConfig::config_path(),
            PathBuf::from("chess-browser.toml")
        );
    }
}
