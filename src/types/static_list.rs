//! Config-backed autocomplete type
//!
//! A [`StaticListType`] serves a fixed list of options declared in the
//! configuration file. It filters by prefix or substring and orders the
//! survivors so that the most specific matches come first.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AutocompleteOption, AutocompleteType};
use crate::config::{OptionEntry, TypeConfig};
use crate::error::Result;

/// How a query is matched against an option
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Value or display text starts with the query
    #[default]
    Prefix,
    /// Value or display text contains the query
    Contains,
}

/// Autocomplete type serving a fixed option list
#[derive(Debug, Clone)]
pub struct StaticListType {
    alias: String,
    label: String,
    options: Vec<AutocompleteOption>,
    match_mode: MatchMode,
    case_sensitive: bool,
    max_results: usize,
}

impl StaticListType {
    /// Create an empty list type
    ///
    /// # Arguments
    /// * `alias` - Unique alias of the type
    /// * `label` - Human-readable label
    pub fn new(alias: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            label: label.into(),
            options: Vec::new(),
            match_mode: MatchMode::Prefix,
            case_sensitive: false,
            max_results: usize::MAX,
        }
    }

    /// Build a list type from its configuration entry
    pub fn from_config(config: &TypeConfig) -> Self {
        let mut list = Self::new(config.alias.clone(), config.label.clone())
            .with_match_mode(config.match_mode)
            .with_case_sensitive(config.case_sensitive)
            .with_max_results(config.max_results);
        for entry in &config.options {
            list.push_entry(entry);
        }
        list
    }

    /// Add options given as plain values
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let alias = self.alias.clone();
        self.options
            .extend(values.into_iter().map(|v| AutocompleteOption::new(alias.clone(), v)));
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Number of options this type can serve
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn push_entry(&mut self, entry: &OptionEntry) {
        let mut option = AutocompleteOption::new(self.alias.clone(), entry.value.clone());
        if let Some(display) = &entry.display {
            option = option.with_display(display.clone());
        }
        if let Some(description) = &entry.description {
            option = option.with_description(description.clone());
        }
        self.options.push(option);
    }

    fn normalize(&self, text: &str) -> String {
        if self.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }

    fn matches(&self, option: &AutocompleteOption, needle: &str) -> bool {
        let value = self.normalize(&option.value);
        let display = self.normalize(&option.display);
        match self.match_mode {
            MatchMode::Prefix => value.starts_with(needle) || display.starts_with(needle),
            MatchMode::Contains => value.contains(needle) || display.contains(needle),
        }
    }

    fn is_exact(&self, option: &AutocompleteOption, needle: &str) -> bool {
        self.normalize(&option.value) == needle || self.normalize(&option.display) == needle
    }

    /// Filter options by query and sort them:
    /// exact matches first, then shorter display text, then alphabetically
    fn filter_options(&self, query: &str) -> Vec<AutocompleteOption> {
        let needle = self.normalize(query);

        let mut filtered: Vec<AutocompleteOption> = if needle.is_empty() {
            self.options.clone()
        } else {
            self.options
                .iter()
                .filter(|option| self.matches(option, &needle))
                .cloned()
                .collect()
        };

        filtered.sort_by(|a, b| {
            if !needle.is_empty() {
                let a_exact = self.is_exact(a, &needle);
                let b_exact = self.is_exact(b, &needle);
                if a_exact && !b_exact {
                    return Ordering::Less;
                }
                if !a_exact && b_exact {
                    return Ordering::Greater;
                }
            }

            let len_cmp = a.display.len().cmp(&b.display.len());
            if len_cmp != Ordering::Equal {
                return len_cmp;
            }

            a.display.cmp(&b.display)
        });

        filtered.truncate(self.max_results);
        filtered
    }
}

#[async_trait]
impl AutocompleteType for StaticListType {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn label(&self) -> &str {
        &self.label
    }

    async fn search(&self, query: &str) -> Result<Vec<AutocompleteOption>> {
        Ok(self.filter_options(query))
    }
}
