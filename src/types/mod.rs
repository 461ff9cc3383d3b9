//! Autocomplete type capability
//!
//! Every source of suggestions (people to mention, tags, channels...) is a
//! type implementing [`AutocompleteType`]. The aggregator only relies on the
//! three operations of that trait and never looks at how a search is served.

mod static_list;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use static_list::{MatchMode, StaticListType};

/// Contract implemented once per registered autocomplete type
#[async_trait]
pub trait AutocompleteType: Send + Sync {
    /// Unique identifier, used as registry key and trigger symbol
    fn alias(&self) -> &str;

    /// Human-readable name shown next to the alias
    fn label(&self) -> &str;

    /// Search this type's options for `query`, in the order they should be shown
    async fn search(&self, query: &str) -> Result<Vec<AutocompleteOption>>;
}

/// A single suggestion produced by a type's search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteOption {
    /// Alias of the type that produced this option
    pub alias: String,
    /// Text to insert when the option is picked
    pub value: String,
    /// Text to show in the suggestion list
    pub display: String,
    /// Optional secondary text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AutocompleteOption {
    /// Create an option whose display text equals its value
    pub fn new(alias: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            alias: alias.into(),
            display: value.clone(),
            value,
            description: None,
        }
    }

    /// Override the display text
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
