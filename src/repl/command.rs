//! Input grammar of the interactive shell
//!
//! ```text
//! ALIAS[,ALIAS...] [QUERY]   set search params and print results
//! types | state | again | refresh | clear | help | exit | quit
//! ```
//!
//! Keywords take precedence over aliases with the same name.

use crate::error::{ReplError, Result};

/// Shell keywords, in the order they are listed by `help`
pub const KEYWORDS: &[&str] = &[
    "types", "state", "again", "refresh", "clear", "help", "exit", "quit",
];

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Set the matched aliases and query, then show results
    Search { aliases: Vec<String>, query: String },
    /// List registered types
    Types,
    /// Show the current search state
    State,
    /// Show results of the current state again
    Again,
    /// Drop memoized results and search again
    Refresh,
    /// Return to the idle state
    Clear,
    Help,
    Exit,
    /// Blank line
    Empty,
}

impl ReplCommand {
    /// Parse one line of input
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(ReplCommand::Empty);
        }

        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim_start()),
            None => (trimmed, ""),
        };

        if KEYWORDS.contains(&head) {
            if !rest.is_empty() {
                return Err(ReplError::InvalidInput(format!("'{head}' takes no arguments")).into());
            }
            return Ok(match head {
                "types" => ReplCommand::Types,
                "state" => ReplCommand::State,
                "again" => ReplCommand::Again,
                "refresh" => ReplCommand::Refresh,
                "clear" => ReplCommand::Clear,
                "help" => ReplCommand::Help,
                _ => ReplCommand::Exit,
            });
        }

        let aliases: Vec<String> = head
            .split(',')
            .filter(|alias| !alias.is_empty())
            .map(str::to_string)
            .collect();

        if aliases.is_empty() {
            return Err(ReplError::InvalidInput(format!("no type alias in '{head}'")).into());
        }

        Ok(ReplCommand::Search {
            aliases,
            query: rest.to_string(),
        })
    }
}
