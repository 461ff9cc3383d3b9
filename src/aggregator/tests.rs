use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio_test::{assert_err, assert_ok};

use super::*;
use crate::config::{FailurePolicy, SearchConfig};
use crate::error::{AutocompleteError, Result};
use crate::types::AutocompleteType;

/// Type returning canned options and recording every query it receives
struct RecordingType {
    alias: String,
    label: String,
    options: Vec<AutocompleteOption>,
    fail: bool,
    queries: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl RecordingType {
    fn new(alias: &str, label: &str, values: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            alias: alias.to_string(),
            label: label.to_string(),
            options: values
                .iter()
                .map(|v| AutocompleteOption::new(alias, *v))
                .collect(),
            fail: false,
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(alias: &str) -> Arc<Self> {
        Arc::new(Self {
            alias: alias.to_string(),
            label: alias.to_uppercase(),
            options: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AutocompleteType for RecordingType {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn label(&self) -> &str {
        &self.label
    }

    async fn search(&self, query: &str) -> Result<Vec<AutocompleteOption>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(AutocompleteError::Generic("backend unavailable".to_string()));
        }
        Ok(self.options.clone())
    }
}

struct Fixture {
    mentions: Arc<RecordingType>,
    tags: Arc<RecordingType>,
    registry: Arc<TypeRegistry>,
}

fn fixture() -> Fixture {
    let mentions = RecordingType::new("mentions", "People", &["A", "B"]);
    let tags = RecordingType::new("tags", "Tags", &["C"]);
    let registry = TypeRegistry::builder()
        .register(mentions.clone())
        .register(tags.clone())
        .build()
        .unwrap();

    Fixture {
        mentions,
        tags,
        registry: Arc::new(registry),
    }
}

fn values(options: &[AutocompleteOption]) -> Vec<&str> {
    options.iter().map(|o| o.value.as_str()).collect()
}

#[test]
fn test_new_aggregator_is_idle() {
    let fx = fixture();
    let autocomplete = Autocomplete::new(fx.registry);

    assert!(!autocomplete.is_active());
    assert!(autocomplete.matched_aliases().is_empty());
    assert_eq!(autocomplete.query(), "");
}

#[test]
fn test_autocomplete_types_listing() {
    let fx = fixture();
    let autocomplete = Autocomplete::new(fx.registry);
    let types = autocomplete.autocomplete_types();

    assert_eq!(types.len(), 2);
    assert_eq!(types["mentions"].label, "People");
    assert_eq!(types["tags"].label, "Tags");
    assert_eq!(types, autocomplete.autocomplete_types());
}

#[test]
fn test_unknown_alias_is_dropped() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry);

    autocomplete.set_search_params(["mentions", "emoji"], "al");

    assert_eq!(autocomplete.matched_aliases(), ["mentions"]);
    assert_eq!(autocomplete.query(), "al");
}

#[test]
fn test_no_valid_alias_forces_empty_query() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry);

    autocomplete.set_search_params(Vec::<String>::new(), "re");
    assert!(autocomplete.matched_aliases().is_empty());
    assert_eq!(autocomplete.query(), "");

    autocomplete.set_search_params(["emoji"], "smile");
    assert_eq!(autocomplete.query(), "");
}

#[test]
fn test_set_search_params_is_idempotent() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry);

    autocomplete.set_search_params(["tags", "mentions"], "re");
    let first = autocomplete.state().clone();
    autocomplete.set_search_params(["tags", "mentions"], "re");

    assert_eq!(&first, autocomplete.state());
}

#[tokio::test]
async fn test_results_concatenate_in_alias_order() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(["mentions", "tags"], "re");
    let results = assert_ok!(autocomplete.results().await);

    assert_eq!(values(&results), vec!["A", "B", "C"]);
    assert_eq!(fx.mentions.queries(), vec!["re"]);
    assert_eq!(fx.tags.queries(), vec!["re"]);
}

#[tokio::test]
async fn test_alias_order_follows_request() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(["tags", "mentions"], "re");
    let results = assert_ok!(autocomplete.results().await);

    assert_eq!(values(&results), vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_duplicate_aliases_are_searched_each_time() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(["tags", "tags"], "x");
    let results = assert_ok!(autocomplete.results().await);

    assert_eq!(values(&results), vec!["C", "C"]);
    assert_eq!(fx.tags.calls(), 2);
}

#[tokio::test]
async fn test_idle_state_makes_no_search_calls() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(Vec::<String>::new(), "anything");
    let results = assert_ok!(autocomplete.results().await);

    assert!(results.is_empty());
    assert_eq!(fx.mentions.calls(), 0);
    assert_eq!(fx.tags.calls(), 0);
}

#[tokio::test]
async fn test_results_are_memoized() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(["mentions", "tags"], "re");
    let first = assert_ok!(autocomplete.results().await);
    let second = assert_ok!(autocomplete.results().await);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fx.mentions.calls(), 1);
    assert_eq!(fx.tags.calls(), 1);
    assert_eq!(autocomplete.cache_stats(), CacheStats { hits: 1, misses: 1 });
}

#[tokio::test]
async fn test_same_params_keep_cache() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(["mentions"], "re");
    let first = assert_ok!(autocomplete.results().await);
    autocomplete.set_search_params(["mentions", "emoji"], "re");
    let second = assert_ok!(autocomplete.results().await);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fx.mentions.calls(), 1);
}

#[tokio::test]
async fn test_query_change_recomputes() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(["mentions"], "r");
    assert_ok!(autocomplete.results().await);
    assert!(autocomplete.is_cached());

    autocomplete.set_search_params(["mentions"], "re");
    assert!(!autocomplete.is_cached());
    assert_ok!(autocomplete.results().await);

    assert_eq!(fx.mentions.queries(), vec!["r", "re"]);
}

#[tokio::test]
async fn test_explicit_invalidate_recomputes() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(["tags"], "c");
    assert_ok!(autocomplete.results().await);
    autocomplete.invalidate();
    assert_ok!(autocomplete.results().await);

    assert_eq!(fx.tags.calls(), 2);
}

#[tokio::test]
async fn test_fail_fast_propagates_and_caches_nothing() {
    let broken = RecordingType::failing("broken");
    let tags = RecordingType::new("tags", "Tags", &["C"]);
    let registry = TypeRegistry::builder()
        .register(broken.clone())
        .register(tags.clone())
        .build()
        .unwrap();
    let mut autocomplete = Autocomplete::new(Arc::new(registry));

    autocomplete.set_search_params(["broken", "tags"], "x");
    let err = assert_err!(autocomplete.results().await);

    match err {
        AutocompleteError::Search(SearchError::TypeFailed { alias, message }) => {
            assert_eq!(alias, "broken");
            assert_eq!(message, "backend unavailable");
        }
        other => panic!("Expected search failure, got {:?}", other),
    }
    // Sequential dispatch stops at the failing type
    assert_eq!(tags.calls(), 0);
    assert!(!autocomplete.is_cached());

    assert_err!(autocomplete.results().await);
    assert_eq!(broken.calls(), 2);
}

#[tokio::test]
async fn test_skip_failed_returns_partial_results() {
    let broken = RecordingType::failing("broken");
    let tags = RecordingType::new("tags", "Tags", &["C", "D"]);
    let registry = TypeRegistry::builder()
        .register(tags.clone())
        .register(broken.clone())
        .build()
        .unwrap();
    let config = SearchConfig {
        failure_policy: FailurePolicy::SkipFailed,
        parallel: false,
    };
    let mut autocomplete = Autocomplete::with_config(Arc::new(registry), &config);

    autocomplete.set_search_params(["broken", "tags"], "x");
    let results = assert_ok!(autocomplete.results().await);

    assert_eq!(values(&results), vec!["C", "D"]);
    assert!(autocomplete.is_cached());
}

#[tokio::test]
async fn test_parallel_dispatch_preserves_order() {
    let fx = fixture();
    let config = SearchConfig {
        failure_policy: FailurePolicy::FailFast,
        parallel: true,
    };
    let mut autocomplete = Autocomplete::with_config(fx.registry.clone(), &config);

    autocomplete.set_search_params(["tags", "mentions", "tags"], "re");
    let results = assert_ok!(autocomplete.results().await);

    assert_eq!(values(&results), vec!["C", "A", "B", "C"]);
    assert_eq!(fx.tags.calls(), 2);
    assert_eq!(fx.mentions.calls(), 1);
}

#[tokio::test]
async fn test_parallel_fail_fast_reports_failing_alias() {
    let broken = RecordingType::failing("broken");
    let tags = RecordingType::new("tags", "Tags", &["C"]);
    let registry = TypeRegistry::builder()
        .register(tags.clone())
        .register(broken.clone())
        .build()
        .unwrap();
    let config = SearchConfig {
        failure_policy: FailurePolicy::FailFast,
        parallel: true,
    };
    let mut autocomplete = Autocomplete::with_config(Arc::new(registry), &config);

    autocomplete.set_search_params(["tags", "broken"], "x");
    let err = assert_err!(autocomplete.results().await);

    assert!(matches!(
        err,
        AutocompleteError::Search(SearchError::TypeFailed { ref alias, .. }) if alias == "broken"
    ));
}

#[tokio::test]
async fn test_back_to_idle_clears_results() {
    let fx = fixture();
    let mut autocomplete = Autocomplete::new(fx.registry.clone());

    autocomplete.set_search_params(["mentions"], "a");
    assert_eq!(assert_ok!(autocomplete.results().await).len(), 2);

    autocomplete.set_search_params(["emoji"], "a");
    assert!(assert_ok!(autocomplete.results().await).is_empty());
    assert_eq!(fx.mentions.calls(), 1);
}
