//! Command execution for the interactive shell

use crate::aggregator::Autocomplete;
use crate::formatter::Formatter;
use crate::error::Result;

use super::command::ReplCommand;

const HELP_TEXT: &str = "\
Usage:
  ALIAS[,ALIAS...] [QUERY]  search the given types, e.g. `mentions,tags al`
  types                     list registered types
  state                     show the matched types and query
  again                     show the current results again
  refresh                   drop cached results and search again
  clear                     forget the matched types
  help                      show this message
  exit | quit               leave the shell";

/// Aggregator plus output settings driven by shell commands
pub struct ReplSession {
    /// Aggregator holding the search state
    autocomplete: Autocomplete,

    /// Output formatter
    formatter: Formatter,
}

impl ReplSession {
    pub fn new(autocomplete: Autocomplete, formatter: Formatter) -> Self {
        Self {
            autocomplete,
            formatter,
        }
    }

    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    /// Execute one command
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Text to print, `None` when there is nothing to show
    pub async fn execute(&mut self, command: ReplCommand) -> Result<Option<String>> {
        match command {
            ReplCommand::Search { aliases, query } => {
                self.autocomplete.set_search_params(&aliases, query);
                self.render_results().await.map(Some)
            }
            ReplCommand::Types => self
                .formatter
                .format_types(&self.autocomplete.autocomplete_types())
                .map(Some),
            ReplCommand::State => self
                .formatter
                .format_state(self.autocomplete.state())
                .map(Some),
            ReplCommand::Again => self.render_results().await.map(Some),
            ReplCommand::Refresh => {
                self.autocomplete.invalidate();
                self.render_results().await.map(Some)
            }
            ReplCommand::Clear => {
                self.autocomplete
                    .set_search_params(std::iter::empty::<&str>(), "");
                Ok(None)
            }
            ReplCommand::Help => Ok(Some(HELP_TEXT.to_string())),
            ReplCommand::Exit | ReplCommand::Empty => Ok(None),
        }
    }

    async fn render_results(&mut self) -> Result<String> {
        let options = self.autocomplete.results().await?;
        self.formatter.format_results(&options)
    }
}
