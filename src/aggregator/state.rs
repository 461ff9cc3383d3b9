//! Search state of the aggregator

use serde::Serialize;

use crate::registry::TypeRegistry;

/// Matched type aliases plus the query to run against them
///
/// Invariant: when no alias is matched the query is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SearchState {
    matched_aliases: Vec<String>,
    query: String,
}

impl SearchState {
    /// Idle state: nothing matched, empty query
    pub fn idle() -> Self {
        Self::default()
    }

    /// Build the state for a request, keeping only registered aliases
    ///
    /// Requested aliases keep their order and multiplicity; unknown ones are
    /// dropped. The query is cleared when no alias survives.
    pub fn resolve<I, S>(registry: &TypeRegistry, requested: I, query: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matched_aliases: Vec<String> = requested
            .into_iter()
            .filter(|alias| registry.contains(alias.as_ref()))
            .map(|alias| alias.as_ref().to_string())
            .collect();

        let query = if matched_aliases.is_empty() {
            String::new()
        } else {
            query.into()
        };

        Self {
            matched_aliases,
            query,
        }
    }

    pub fn matched_aliases(&self) -> &[String] {
        &self.matched_aliases
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether any type is currently matched
    pub fn is_active(&self) -> bool {
        !self.matched_aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StaticListType;
    use std::sync::Arc;

    fn create_test_registry() -> TypeRegistry {
        TypeRegistry::builder()
            .register(Arc::new(StaticListType::new("mentions", "People")))
            .register(Arc::new(StaticListType::new("tags", "Tags")))
            .build()
            .unwrap()
    }

    #[test]
    fn test_idle_state() {
        let state = SearchState::idle();
        assert!(!state.is_active());
        assert!(state.matched_aliases().is_empty());
        assert_eq!(state.query(), "");
    }

    #[test]
    fn test_resolve_drops_unknown_aliases() {
        let registry = create_test_registry();
        let state = SearchState::resolve(&registry, ["mentions", "emoji"], "al");

        assert_eq!(state.matched_aliases(), ["mentions"]);
        assert_eq!(state.query(), "al");
        assert!(state.is_active());
    }

    #[test]
    fn test_resolve_keeps_order_and_duplicates() {
        let registry = create_test_registry();
        let state = SearchState::resolve(&registry, ["tags", "emoji", "mentions", "tags"], "r");

        assert_eq!(state.matched_aliases(), ["tags", "mentions", "tags"]);
    }

    #[test]
    fn test_resolve_forces_empty_query_without_matches() {
        let registry = create_test_registry();

        let state = SearchState::resolve(&registry, ["emoji"], "smile");
        assert!(!state.is_active());
        assert_eq!(state.query(), "");

        let state = SearchState::resolve(&registry, Vec::<String>::new(), "re");
        assert_eq!(state, SearchState::idle());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let registry = create_test_registry();
        let first = SearchState::resolve(&registry, ["mentions", "tags"], "re");
        let second = SearchState::resolve(&registry, ["mentions", "tags"], "re");
        assert_eq!(first, second);
    }
}
