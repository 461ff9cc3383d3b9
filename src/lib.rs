//! dynac - multi-source autocomplete aggregator
//!
//! Given the type aliases matched by the text a user is typing (mentions,
//! tags, channels...) and the query to look for, dynac searches every matched
//! type and merges the results into one ordered suggestion list.
//!
//! # Modules
//!
//! - `aggregator`: Search state, memoized result aggregation
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `formatter`: Output formatting and display
//! - `registry`: Statically declared type registry
//! - `repl`: Interactive shell
//! - `types`: Autocomplete type contract and the config-backed list type
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dynac::{Autocomplete, TypeRegistry};
//! use dynac::types::StaticListType;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = TypeRegistry::builder()
//!         .register(Arc::new(
//!             StaticListType::new("mentions", "People").with_values(["alice", "bob"]),
//!         ))
//!         .register(Arc::new(StaticListType::new("tags", "Tags").with_values(["api"])))
//!         .build()?;
//!
//!     let mut autocomplete = Autocomplete::new(Arc::new(registry));
//!     autocomplete.set_search_params(["mentions", "tags"], "a");
//!
//!     for option in autocomplete.results().await?.iter() {
//!         println!("[{}] {}", option.alias, option.display);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod registry;
pub mod repl;
pub mod types;

// Re-export commonly used types
pub use aggregator::{AggregatedResult, Autocomplete, SearchState};
pub use config::Config;
pub use error::{AutocompleteError, Result};
pub use formatter::Formatter;
pub use registry::{TypeDescriptor, TypeRegistry};
pub use repl::ReplEngine;
pub use types::{AutocompleteOption, AutocompleteType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
