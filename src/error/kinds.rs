use std::{fmt, io};

/// Crate-wide `Result` type using [`AutocompleteError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, AutocompleteError>;

/// Top-level error type for autocomplete operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum AutocompleteError {
    /// Type registration errors.
    Registry(RegistryError),

    /// Errors raised by a type's search during aggregation.
    Search(SearchError),

    /// Configuration errors.
    Config(ConfigError),

    /// Interactive shell errors.
    Repl(ReplError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Type registry errors.
///
/// All of these describe a misconfigured set of types and surface when the
/// registry is built, never per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two registered types declare the same alias.
    DuplicateAlias(String),

    /// A type declares an empty alias or one containing whitespace.
    InvalidAlias(String),

    /// A type declares an empty label.
    InvalidLabel { alias: String },

    /// A lookup named an alias that is not registered.
    UnknownAlias(String),
}

/// Errors raised while aggregating search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A single type's search failed.
    TypeFailed { alias: String, message: String },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Missing required field.
    MissingField(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Generic configuration error.
    Generic(String),
}

/// Interactive shell errors.
#[derive(Debug)]
pub enum ReplError {
    /// Line editor failure.
    Editor(String),

    /// Input that does not follow the shell grammar.
    InvalidInput(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for AutocompleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutocompleteError::Registry(e) => write!(f, "Registry error: {e}"),
            AutocompleteError::Search(e) => write!(f, "Search error: {e}"),
            AutocompleteError::Config(e) => write!(f, "Configuration error: {e}"),
            AutocompleteError::Repl(e) => write!(f, "{e}"),
            AutocompleteError::Io(e) => write!(f, "I/O error: {e}"),
            AutocompleteError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateAlias(alias) => {
                write!(f, "Alias '{alias}' is registered by more than one type")
            }
            RegistryError::InvalidAlias(alias) => write!(f, "Invalid type alias: '{alias}'"),
            RegistryError::InvalidLabel { alias } => {
                write!(f, "Type '{alias}' has an empty label")
            }
            RegistryError::UnknownAlias(alias) => write!(f, "Unknown type alias: '{alias}'"),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::TypeFailed { alias, message } => {
                write!(f, "Search for '{alias}' failed: {message}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {field}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplError::Editor(msg) => write!(f, "Line editor error: {msg}"),
            ReplError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
        }
    }
}

impl std::error::Error for AutocompleteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AutocompleteError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for RegistryError {}
impl std::error::Error for SearchError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ReplError {}

/* ========================= Conversions to AutocompleteError ========================= */

impl From<io::Error> for AutocompleteError {
    fn from(err: io::Error) -> Self {
        AutocompleteError::Io(err)
    }
}

impl From<RegistryError> for AutocompleteError {
    fn from(err: RegistryError) -> Self {
        AutocompleteError::Registry(err)
    }
}

impl From<SearchError> for AutocompleteError {
    fn from(err: SearchError) -> Self {
        AutocompleteError::Search(err)
    }
}

impl From<ConfigError> for AutocompleteError {
    fn from(err: ConfigError) -> Self {
        AutocompleteError::Config(err)
    }
}

impl From<ReplError> for AutocompleteError {
    fn from(err: ReplError) -> Self {
        AutocompleteError::Repl(err)
    }
}

impl From<toml::de::Error> for AutocompleteError {
    fn from(err: toml::de::Error) -> Self {
        AutocompleteError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for AutocompleteError {
    fn from(err: toml::ser::Error) -> Self {
        AutocompleteError::Config(ConfigError::Generic(format!(
            "Failed to serialize config: {err}"
        )))
    }
}

impl From<serde_json::Error> for AutocompleteError {
    fn from(err: serde_json::Error) -> Self {
        AutocompleteError::Generic(format!("JSON error: {err}"))
    }
}

impl From<String> for AutocompleteError {
    fn from(msg: String) -> Self {
        AutocompleteError::Generic(msg)
    }
}

impl From<&str> for AutocompleteError {
    fn from(msg: &str) -> Self {
        AutocompleteError::Generic(msg.to_owned())
    }
}
