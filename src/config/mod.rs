//! Configuration management for dynac
//!
//! This module handles loading, parsing, and saving configuration:
//! - Configuration files (TOML format)
//! - Command-line arguments (applied on top by the CLI layer)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values
//!
//! Besides ambient settings the file declares the autocomplete types that
//! make up the registry:
//!
//! ```toml
//! [[types]]
//! alias = "mentions"
//! label = "People"
//! options = [{ value = "alice", display = "Alice" }, { value = "bob" }]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::MatchMode;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Aggregation configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Declared autocomplete types
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format (plain, json, json-pretty, table)
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One option per line, prefixed by its alias
    Plain,

    /// Compact JSON format (single-line)
    Json,

    /// Pretty-printed JSON format (multi-line)
    JsonPretty,

    /// Table format (ASCII table layout)
    Table,
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

/// Aggregation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// What to do when one type's search fails
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Dispatch type searches concurrently instead of one after another
    #[serde(default)]
    pub parallel: bool,
}

/// Handling of a failing type search during aggregation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// The whole aggregation fails
    #[default]
    FailFast,

    /// The failing type is logged and left out of the results
    SkipFailed,
}

/// One `[[types]]` entry, served by a static option list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Unique alias
    pub alias: String,

    /// Display label
    pub label: String,

    /// Matching strategy
    #[serde(default)]
    pub match_mode: MatchMode,

    /// Match case-sensitively
    #[serde(default)]
    pub case_sensitive: bool,

    /// Maximum number of options returned per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Options served by this type
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

/// One option of a configured type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Text inserted on selection
    pub value: String,

    /// Text shown in the list (defaults to `value`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Secondary text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// Default value functions
fn default_format() -> OutputFormat {
    OutputFormat::Plain
}

fn default_color_output() -> bool {
    true
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dynac_history")
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

fn default_max_results() -> usize {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color_output: default_color_output(),
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

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::FailFast,
            parallel: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// When `path` is `None` the default location is used. A missing file at
    /// the default location yields the default configuration; a missing file
    /// that was asked for explicitly is an error.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dynac")
            .join("config.toml")
    }

    /// Save configuration to a file
    ///
    /// # Arguments
    /// * `path` - Path where to save the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    ///
    /// Checks every declared type: aliases non-empty, free of whitespace and
    /// unique, labels non-empty, `max_results` positive.
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for (index, ty) in self.types.iter().enumerate() {
            if ty.alias.is_empty() {
                return Err(ConfigError::MissingField(format!("types[{index}].alias")).into());
            }
            if ty.alias.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidValue {
                    field: format!("types[{index}].alias"),
                    value: ty.alias.clone(),
                }
                .into());
            }
            if ty.label.trim().is_empty() {
                return Err(ConfigError::MissingField(format!("types[{index}].label")).into());
            }
            if ty.max_results == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("types[{index}].max_results"),
                    value: "0".to_string(),
                }
                .into());
            }
            if !seen.insert(ty.alias.as_str()) {
                return Err(ConfigError::Generic(format!(
                    "Alias '{}' is declared by more than one type",
                    ty.alias
                ))
                .into());
            }
        }

        Ok(())
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

impl OutputFormat {
    /// Parse a format name as accepted on the command line
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "plain" => Some(OutputFormat::Plain),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "table" => Some(OutputFormat::Table),
            _ => None,
        }
    }

    /// Check if format is JSON-based
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutocompleteError;

    const SAMPLE: &str = r#"
[display]
format = "table"
color_output = false

[logging]
level = "debug"

[search]
failure_policy = "skip-failed"
parallel = true

[[types]]
alias = "mentions"
label = "People"
options = [{ value = "alice", display = "Alice" }, { value = "bob" }]

[[types]]
alias = "tags"
label = "Tags"
match_mode = "contains"
case_sensitive = true
max_results = 3
options = [{ value = "rust", description = "Systems language" }]
"#;

    fn sample_type(alias: &str) -> TypeConfig {
        TypeConfig {
            alias: alias.to_string(),
            label: "Label".to_string(),
            match_mode: MatchMode::Prefix,
            case_sensitive: false,
            max_results: 5,
            options: Vec::new(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.format, OutputFormat::Plain);
        assert!(config.display.color_output);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.search.failure_policy, FailurePolicy::FailFast);
        assert!(!config.search.parallel);
        assert!(config.types.is_empty());
    }

    #[test]
    fn test_parse_sample() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.display.format, OutputFormat::Table);
        assert!(!config.display.color_output);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.timestamps);
        assert_eq!(config.search.failure_policy, FailurePolicy::SkipFailed);
        assert!(config.search.parallel);

        assert_eq!(config.types.len(), 2);
        let mentions = &config.types[0];
        assert_eq!(mentions.alias, "mentions");
        assert_eq!(mentions.match_mode, MatchMode::Prefix);
        assert_eq!(mentions.max_results, 10);
        assert_eq!(mentions.options[0].display.as_deref(), Some("Alice"));

        let tags = &config.types[1];
        assert_eq!(tags.match_mode, MatchMode::Contains);
        assert!(tags.case_sensitive);
        assert_eq!(tags.max_results, 3);
        assert_eq!(
            tags.options[0].description.as_deref(),
            Some("Systems language")
        );

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.display.format, OutputFormat::Plain);
        assert!(config.types.is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[display\nformat = ").unwrap_err();
        assert!(matches!(
            err,
            AutocompleteError::Config(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_duplicate_alias() {
        let mut config = Config::default();
        config.types = vec![sample_type("tags"), sample_type("tags")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_alias_with_whitespace() {
        let mut config = Config::default();
        config.types = vec![sample_type("my tags")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_max_results() {
        let mut config = Config::default();
        let mut ty = sample_type("tags");
        ty.max_results = 0;
        config.types = vec![ty];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = Path::new("/nonexistent/dynac/config.toml");
        let err = Config::load_from_file(Some(path)).unwrap_err();
        assert!(matches!(
            err,
            AutocompleteError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("dynac-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let config = Config::from_toml_str(SAMPLE).unwrap();
        config.save(&path).unwrap();

        let reloaded = Config::load_from_file(Some(&path)).unwrap();
        assert_eq!(reloaded.types.len(), 2);
        assert_eq!(reloaded.types[1].alias, "tags");
        assert_eq!(reloaded.search.failure_policy, FailurePolicy::SkipFailed);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("json-pretty"), Some(OutputFormat::JsonPretty));
        assert_eq!(OutputFormat::parse("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert!(OutputFormat::JsonPretty.is_json());
        assert!(!OutputFormat::Plain.is_json());
    }
}
