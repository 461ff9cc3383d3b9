//! Custom prompt implementation for the dynac shell

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing the currently matched type aliases
pub struct AutocompletePrompt {
    /// Matched aliases, empty when idle
    aliases: Vec<String>,
}

impl AutocompletePrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `aliases` - Currently matched aliases
    pub fn new(aliases: &[String]) -> Self {
        Self {
            aliases: aliases.to_vec(),
        }
    }
}

impl Prompt for AutocompletePrompt {
    /// Render the left prompt: `dynac> ` when idle, `dynac[a,b]> ` otherwise
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        if self.aliases.is_empty() {
            "dynac> ".into()
        } else {
            format!("dynac[{}]> ", self.aliases.join(",")).into()
        }
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
