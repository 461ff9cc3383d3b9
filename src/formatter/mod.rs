//! Output formatting for dynac
//!
//! Renders aggregated options, the type listing and the search state in one
//! of the configured output formats:
//! - Plain text, one entry per line
//! - JSON (compact and pretty-printed)
//! - Tables

mod json;
mod table;

use indexmap::IndexMap;
use nu_ansi_term::Color;

use crate::aggregator::SearchState;
use crate::config::{DisplayConfig, OutputFormat};
use crate::error::Result;
use crate::registry::TypeDescriptor;
use crate::types::AutocompleteOption;

pub use json::JsonFormatter;
pub use table::{TableFormatter, TableStyle};

/// Main formatter for command output
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Enable colored output
    use_colors: bool,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `format_type` - Output format type
    /// * `use_colors` - Enable colored output
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            format_type,
            use_colors,
        }
    }

    /// Create a formatter from display configuration
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.format, config.color_output)
    }

    /// Format aggregated options
    ///
    /// # Arguments
    /// * `options` - Options in display order
    ///
    /// # Returns
    /// * `Result<String>` - Formatted output or error
    pub fn format_results(&self, options: &[AutocompleteOption]) -> Result<String> {
        match self.format_type {
            OutputFormat::Json | OutputFormat::JsonPretty => self.json().format(options),
            OutputFormat::Table => {
                let rows = options
                    .iter()
                    .map(|o| {
                        vec![
                            o.alias.clone(),
                            o.value.clone(),
                            o.display.clone(),
                            o.description.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                Ok(self.table().format(&["type", "value", "display", "description"], rows))
            }
            OutputFormat::Plain => Ok(self.plain_results(options)),
        }
    }

    /// Format the registry listing
    pub fn format_types(&self, types: &IndexMap<String, TypeDescriptor>) -> Result<String> {
        match self.format_type {
            OutputFormat::Json | OutputFormat::JsonPretty => self.json().format(types),
            OutputFormat::Table => {
                let rows = types
                    .values()
                    .map(|d| vec![d.alias.clone(), d.label.clone()])
                    .collect();
                Ok(self.table().format(&["alias", "label"], rows))
            }
            OutputFormat::Plain => {
                if types.is_empty() {
                    return Ok("(no types registered)".to_string());
                }
                Ok(types
                    .values()
                    .map(|d| format!("{}  {}", self.paint_alias(&d.alias), d.label))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }

    /// Format the current search state
    pub fn format_state(&self, state: &SearchState) -> Result<String> {
        if self.format_type.is_json() {
            return self.json().format(state);
        }

        if !state.is_active() {
            return Ok("idle".to_string());
        }

        Ok(format!(
            "types: {}\nquery: {:?}",
            state.matched_aliases().join(", "),
            state.query()
        ))
    }

    fn json(&self) -> JsonFormatter {
        JsonFormatter::new(
            self.format_type == OutputFormat::JsonPretty,
            self.use_colors,
            2,
        )
    }

    fn table(&self) -> TableFormatter {
        TableFormatter::with_colors(self.use_colors)
    }

    fn plain_results(&self, options: &[AutocompleteOption]) -> String {
        if options.is_empty() {
            return "(no results)".to_string();
        }

        options
            .iter()
            .map(|o| {
                let tag = self.paint_alias(&format!("[{}]", o.alias));
                let mut line = format!("{} {}", tag, o.display);
                if o.display != o.value {
                    line.push_str(&format!(" ({})", o.value));
                }
                if let Some(description) = &o.description {
                    line.push_str(&format!("  {}", description));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn paint_alias(&self, text: &str) -> String {
        if self.use_colors {
            Color::Cyan.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}
