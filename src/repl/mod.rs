//! Interactive shell for dynac
//!
//! This module provides a line-editing shell on top of the aggregator:
//! - Command line editing with reedline
//! - Persistent command history
//! - Tab completion of keywords and type aliases
//! - A prompt showing the matched types

mod command;
mod completer;
mod prompt;
mod session;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::{debug, warn};

use crate::aggregator::Autocomplete;
use crate::config::HistoryConfig;
use crate::error::{ReplError, Result};
use crate::formatter::Formatter;

pub use command::{KEYWORDS, ReplCommand};
pub use completer::ShellCompleter;
pub use prompt::AutocompletePrompt;
pub use session::ReplSession;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive autocomplete sessions
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Aggregator and formatter driven by the commands
    session: ReplSession,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `autocomplete` - Aggregator to drive
    /// * `formatter` - Output formatter
    /// * `history_config` - History configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        autocomplete: Autocomplete,
        formatter: Formatter,
        history_config: &HistoryConfig,
    ) -> Result<Self> {
        let completer = Box::new(ShellCompleter::new(&autocomplete.autocomplete_types()));
        let completion_menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let mut editor = Reedline::create()
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        if history_config.persist {
            match FileBackedHistory::with_file(
                history_config.max_size,
                history_config.file_path.clone(),
            ) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => warn!(
                    "History disabled, cannot open {}: {}",
                    history_config.file_path.display(),
                    e
                ),
            }
        }

        Ok(Self {
            editor,
            session: ReplSession::new(autocomplete, formatter),
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, or None on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = AutocompletePrompt::new(self.session.autocomplete().matched_aliases());
        match self.editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            Ok(Signal::CtrlD) => Ok(None),
            // Ctrl-C drops the current line
            Ok(_) => Ok(Some(String::new())),
            Err(err) => Err(ReplError::Editor(err.to_string()).into()),
        }
    }

    /// Run the read-execute-print loop until exit or EOF
    ///
    /// Command errors, including failed aggregations, are printed and the
    /// loop continues.
    pub async fn run(&mut self) -> Result<()> {
        while self.running {
            let Some(line) = self.read_line()? else {
                break;
            };

            let command = match ReplCommand::parse(&line) {
                Ok(cmd) => cmd,
                Err(e) => {
                    eprintln!("{}", e);
                    continue;
                }
            };

            if command == ReplCommand::Exit {
                self.stop();
                continue;
            }

            debug!("Executing shell command {:?}", command);
            match self.session.execute(command).await {
                Ok(Some(output)) => println!("{}", output),
                Ok(None) => {}
                Err(e) => eprintln!("{}", e),
            }
        }

        Ok(())
    }

    /// Stop the loop after the current command
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }
}
