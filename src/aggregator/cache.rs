//! Memoization of aggregated results

use std::sync::Arc;

use serde::Serialize;

use super::state::SearchState;
use crate::types::AutocompleteOption;

/// Hit/miss counters of the result cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-entry cache keyed by the search state that produced it
#[derive(Debug, Default)]
pub(crate) struct ResultCache {
    entry: Option<(SearchState, Arc<[AutocompleteOption]>)>,
    stats: CacheStats,
}

impl ResultCache {
    /// Look up results for `key`, recording a hit or a miss
    pub(crate) fn get(&mut self, key: &SearchState) -> Option<Arc<[AutocompleteOption]>> {
        match &self.entry {
            Some((cached_key, results)) if cached_key == key => {
                self.stats.hits += 1;
                Some(Arc::clone(results))
            }
            _ => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub(crate) fn store(&mut self, key: SearchState, results: Arc<[AutocompleteOption]>) {
        self.entry = Some((key, results));
    }

    pub(crate) fn invalidate(&mut self) {
        self.entry = None;
    }

    pub(crate) fn is_populated(&self) -> bool {
        self.entry.is_some()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.stats
    }
}
