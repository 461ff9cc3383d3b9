//! Error handling for the autocomplete aggregator.
//!
//! Errors fall into three groups:
//! - Configuration errors (duplicate or malformed type aliases, bad config
//!   files) which are fatal at startup
//! - Search errors raised by a type while an aggregation cycle runs
//! - Ambient errors from I/O and the interactive shell
//!
//! Unknown aliases passed to the aggregator are not errors; they are filtered.
//!
//! # Example
//!
//! ```rust
//! use dynac::error::{AutocompleteError, RegistryError, Result};
//!
//! fn check(alias: &str) -> Result<()> {
//!     if alias.is_empty() {
//!         return Err(RegistryError::InvalidAlias(alias.to_string()).into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(check(""), Err(AutocompleteError::Registry(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{AutocompleteError, ConfigError, RegistryError, ReplError, Result, SearchError};
