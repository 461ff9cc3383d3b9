//! Result aggregation across autocomplete types
//!
//! [`Autocomplete`] owns the search state of one autocomplete widget. Callers
//! report which type aliases matched the text being typed and the query to
//! search for, then read the merged option list:
//!
//! 1. `set_search_params` filters the aliases against the registry and is the
//!    only way to change the state
//! 2. `results` runs one search per matched alias and concatenates the option
//!    lists in alias order
//! 3. The concatenation is memoized until the state changes
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use dynac::aggregator::Autocomplete;
//! use dynac::registry::TypeRegistry;
//! use dynac::types::StaticListType;
//!
//! # async fn demo() -> dynac::Result<()> {
//! let registry = TypeRegistry::builder()
//!     .register(Arc::new(StaticListType::new("tags", "Tags").with_values(["rust", "ruby"])))
//!     .build()?;
//!
//! let mut autocomplete = Autocomplete::new(Arc::new(registry));
//! autocomplete.set_search_params(["tags", "emoji"], "ru");
//! let options = autocomplete.results().await?;
//! assert_eq!(options.len(), 2);
//! # Ok(())
//! # }
//! ```

mod cache;
mod state;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::{FailurePolicy, SearchConfig};
use crate::error::{Result, SearchError};
use crate::registry::{TypeDescriptor, TypeRegistry};
use crate::types::AutocompleteOption;

use cache::ResultCache;

pub use cache::CacheStats;
pub use state::SearchState;

/// Aggregated option list, shared between the cache and callers
pub type AggregatedResult = Arc<[AutocompleteOption]>;

/// Autocomplete aggregator over a fixed type registry
#[derive(Debug)]
pub struct Autocomplete {
    /// Registered types
    registry: Arc<TypeRegistry>,

    /// Current matched aliases and query
    state: SearchState,

    /// Memoized results of the current state
    cache: ResultCache,

    /// Failure handling for type searches
    failure_policy: FailurePolicy,

    /// Run type searches concurrently
    parallel: bool,
}

impl Autocomplete {
    /// Create an idle aggregator with default search settings
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self::with_config(registry, &SearchConfig::default())
    }

    /// Create an idle aggregator
    ///
    /// # Arguments
    /// * `registry` - Registered autocomplete types
    /// * `config` - Failure policy and dispatch mode
    pub fn with_config(registry: Arc<TypeRegistry>, config: &SearchConfig) -> Self {
        Self {
            registry,
            state: SearchState::idle(),
            cache: ResultCache::default(),
            failure_policy: config.failure_policy,
            parallel: config.parallel,
        }
    }

    /// Registry backing this aggregator
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Available types as alias -> descriptor
    pub fn autocomplete_types(&self) -> IndexMap<String, TypeDescriptor> {
        self.registry.list_types()
    }

    /// Set the matched type aliases and the query in one step
    ///
    /// Unknown aliases are dropped silently; order and duplicates of the
    /// remaining ones are kept. With no alias left the query is cleared.
    /// Cached results are discarded when the resulting state differs from
    /// the current one.
    pub fn set_search_params<I, S>(&mut self, aliases: I, query: impl Into<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: Vec<S> = aliases.into_iter().collect();
        let next = SearchState::resolve(&self.registry, &requested, query);

        let dropped = requested.len() - next.matched_aliases().len();
        if dropped > 0 {
            debug!("Dropped {} unregistered alias(es) from search params", dropped);
        }

        if next != self.state {
            debug!(
                "Search params changed: aliases={:?} query={:?}",
                next.matched_aliases(),
                next.query()
            );
            self.cache.invalidate();
            self.state = next;
        }
    }

    /// Current search state
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn matched_aliases(&self) -> &[String] {
        self.state.matched_aliases()
    }

    pub fn query(&self) -> &str {
        self.state.query()
    }

    /// Whether any type is matched
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Drop memoized results so the next read searches again
    ///
    /// Useful when the data behind a type changed while the state did not.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Whether results for the current state are memoized
    pub fn is_cached(&self) -> bool {
        self.cache.is_populated()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Aggregated options for the current state
    ///
    /// Idle state returns an empty list without searching. Otherwise the
    /// memoized list is returned when present; if not, every matched type is
    /// searched and the option lists are concatenated in alias order.
    ///
    /// # Returns
    /// * `Result<AggregatedResult>` - Flattened options, or the first type
    ///   failure under the fail-fast policy
    pub async fn results(&mut self) -> Result<AggregatedResult> {
        if !self.state.is_active() {
            return Ok(Arc::from(Vec::new()));
        }

        if let Some(cached) = self.cache.get(&self.state) {
            debug!("Serving {} cached option(s)", cached.len());
            return Ok(cached);
        }

        let start = Instant::now();
        let per_type = if self.parallel {
            self.search_parallel().await?
        } else {
            self.search_sequential().await?
        };

        let results: AggregatedResult = per_type.into_iter().flatten().collect();
        debug!(
            "Aggregated {} option(s) from {} type(s) in {:?}",
            results.len(),
            self.state.matched_aliases().len(),
            start.elapsed()
        );

        self.cache.store(self.state.clone(), Arc::clone(&results));
        Ok(results)
    }

    /// Search matched types one after another, stopping at the first failure
    /// when failing fast
    async fn search_sequential(&self) -> Result<Vec<Vec<AutocompleteOption>>> {
        let query = self.state.query();
        let mut per_type = Vec::with_capacity(self.state.matched_aliases().len());

        for alias in self.state.matched_aliases() {
            let outcome = self.registry.search(alias, query).await;
            if let Some(options) = self.settle(alias, outcome)? {
                per_type.push(options);
            }
        }

        Ok(per_type)
    }

    /// Search matched types concurrently; output keeps alias order
    async fn search_parallel(&self) -> Result<Vec<Vec<AutocompleteOption>>> {
        let query = self.state.query();
        let aliases = self.state.matched_aliases();

        let outcomes = join_all(
            aliases
                .iter()
                .map(|alias| self.registry.search(alias, query)),
        )
        .await;

        let mut per_type = Vec::with_capacity(outcomes.len());
        for (alias, outcome) in aliases.iter().zip(outcomes) {
            if let Some(options) = self.settle(alias, outcome)? {
                per_type.push(options);
            }
        }

        Ok(per_type)
    }

    /// Apply the failure policy to one type's search outcome
    fn settle(
        &self,
        alias: &str,
        outcome: Result<Vec<AutocompleteOption>>,
    ) -> Result<Option<Vec<AutocompleteOption>>> {
        match outcome {
            Ok(options) => Ok(Some(options)),
            Err(err) => match self.failure_policy {
                FailurePolicy::FailFast => Err(SearchError::TypeFailed {
                    alias: alias.to_string(),
                    message: err.to_string(),
                }
                .into()),
                FailurePolicy::SkipFailed => {
                    warn!("Skipping results of '{}': {}", alias, err);
                    Ok(None)
                }
            },
        }
    }
}
