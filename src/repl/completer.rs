//! Completer for reedline - completes shell keywords and type aliases
//!
//! Only the first word of a line is completed. It is either a keyword or a
//! comma separated alias list, in which case the segment after the last comma
//! is completed. The query after the first space is free text.

use indexmap::IndexMap;
use reedline::{Completer, Span, Suggestion};

use super::command::KEYWORDS;
use crate::registry::TypeDescriptor;

/// Keyword and alias completer for the dynac shell
pub struct ShellCompleter {
    /// Registered aliases with their labels
    aliases: Vec<(String, String)>,
}

impl ShellCompleter {
    /// Create a completer from the registry listing
    pub fn new(types: &IndexMap<String, TypeDescriptor>) -> Self {
        Self {
            aliases: types
                .values()
                .map(|d| (d.alias.clone(), d.label.clone()))
                .collect(),
        }
    }

    /// Candidates for the word ending at `pos`
    ///
    /// # Returns
    /// * `(usize, Vec<(String, Option<String>)>)` - Start of the completed
    ///   segment and (value, description) pairs
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<(String, Option<String>)>) {
        let before = &line[..pos];
        if before.trim_start().contains(char::is_whitespace) {
            return (pos, Vec::new());
        }

        let word_start = before.len() - before.trim_start().len();
        let word = &before[word_start..];
        let (segment_start, prefix) = match word.rfind(',') {
            Some(idx) => (word_start + idx + 1, &word[idx + 1..]),
            None => (word_start, word),
        };

        let mut candidates: Vec<(String, Option<String>)> = self
            .aliases
            .iter()
            .filter(|(alias, _)| alias.starts_with(prefix) && alias != prefix)
            .map(|(alias, label)| (alias.clone(), Some(label.clone())))
            .collect();

        // Keywords only make sense as the whole first word
        if segment_start == word_start {
            candidates.extend(
                KEYWORDS
                    .iter()
                    .filter(|kw| kw.starts_with(prefix) && **kw != prefix)
                    .map(|kw| (kw.to_string(), None)),
            );
        }

        candidates.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));
        (segment_start, candidates)
    }
}

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (start, candidates) = self.candidates(line, pos);

        candidates
            .into_iter()
            .map(|(value, description)| Suggestion {
                value,
                description,
                span: Span::new(start, pos),
                append_whitespace: false,
                ..Default::default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_completer() -> ShellCompleter {
        let mut types = IndexMap::new();
        for (alias, label) in [("mentions", "People"), ("tags", "Tags"), ("teams", "Teams")] {
            types.insert(
                alias.to_string(),
                TypeDescriptor {
                    alias: alias.to_string(),
                    label: label.to_string(),
                },
            );
        }
        ShellCompleter::new(&types)
    }

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn test_complete_alias_prefix() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("t", 1);

        assert_eq!(values(&suggestions), vec!["tags", "teams", "types"]);
        assert_eq!(suggestions[0].description.as_deref(), Some("Tags"));
        assert!(suggestions[2].description.is_none());
    }

    #[test]
    fn test_complete_after_comma() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("mentions,ta", 11);

        assert_eq!(values(&suggestions), vec!["tags"]);
        assert_eq!(suggestions[0].span.start, 9);
        assert_eq!(suggestions[0].span.end, 11);
    }

    #[test]
    fn test_no_keywords_after_comma() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("tags,", 5);

        assert_eq!(values(&suggestions), vec!["tags", "teams", "mentions"]);
    }

    #[test]
    fn test_query_is_not_completed() {
        let mut completer = create_test_completer();
        assert!(completer.complete("tags ru", 7).is_empty());
    }

    #[test]
    fn test_exact_word_is_not_suggested() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("tags", 4);

        assert!(!values(&suggestions).contains(&"tags"));
    }
}
