//! Command-line interface for dynac
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Registry construction from the configured types
//! - One-shot subcommands (types, search, completion, config)

pub mod completion;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::aggregator::Autocomplete;
use crate::config::{Config, FailurePolicy, LogLevel, OutputFormat};
use crate::error::Result;
use crate::formatter::Formatter;
use crate::registry::TypeRegistry;

/// dynac - multi-source autocomplete aggregator
#[derive(Parser, Debug)]
#[command(
    name = "dynac",
    version,
    about = "Multi-source autocomplete aggregator",
    long_about = "Resolve autocomplete types declared in a config file, search the matched ones
and print the merged suggestion list, one-shot or from an interactive shell."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Output format (plain, json, json-pretty, table)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Search matched types concurrently
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Leave failing types out of the results instead of failing
    #[arg(long = "skip-failed", global = true)]
    pub skip_failed: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for dynac
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered autocomplete types
    Types,

    /// Run one aggregation and print the options
    Search {
        /// Matched type aliases, comma separated
        #[arg(short = 't', long = "types", value_delimiter = ',', required = true)]
        types: Vec<String>,

        /// Search text
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
    },

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Parse process arguments and load configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Build the interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// An invalid configuration is fatal: the type declarations it carries
    /// would produce a broken registry.
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        config.validate()?;

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Path of the configuration file in use
    pub fn config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Build the type registry from the configured types
    pub fn build_registry(&self) -> Result<TypeRegistry> {
        TypeRegistry::builder()
            .register_configured(&self.config.types)
            .build()
    }

    /// Create an idle aggregator over `registry` using the search settings
    pub fn create_autocomplete(&self, registry: Arc<TypeRegistry>) -> Autocomplete {
        Autocomplete::with_config(registry, &self.config.search)
    }

    /// Create a formatter from the display settings
    pub fn formatter(&self) -> Formatter {
        Formatter::from_config(&self.config.display)
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
        Self::apply_search_args(config, args);
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            config.display.format = Self::parse_output_format(format_str);
        }

        if args.no_color {
            config.display.color_output = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Apply search-related CLI arguments to configuration
    fn apply_search_args(config: &mut Config, args: &CliArgs) {
        if args.parallel {
            config.search.parallel = true;
        }

        if args.skip_failed {
            config.search.failure_policy = FailurePolicy::SkipFailed;
        }
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> OutputFormat {
        OutputFormat::parse(format_str).unwrap_or_else(|| {
            eprintln!("Warning: Unknown format '{}', using plain", format_str);
            OutputFormat::Plain
        })
    }

    /// Handle subcommands
    ///
    /// # Arguments
    /// * `registry` - Registry built from the configuration
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub async fn handle_subcommand(&self, registry: Arc<TypeRegistry>) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Types) => {
                println!("{}", self.formatter().format_types(&registry.list_types())?);
                Ok(true)
            }
            Some(Commands::Search { types, query }) => {
                let mut autocomplete = self.create_autocomplete(registry);
                autocomplete.set_search_params(types, query.as_str());
                let options = autocomplete.results().await?;
                println!("{}", self.formatter().format_results(&options)?);
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file(&self.config_path())?;
        }

        if show || !validate {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self, path: &Path) -> Result<()> {
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist, defaults apply");
            return Ok(());
        }

        match Config::load_from_file(Some(path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid ({} type(s))", config.types.len()),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        println!("# Configuration file: {}", self.config_path().display());
        println!();
        println!("{}", self.config.to_toml_string()?);
        Ok(())
    }

    /// Print the startup banner unless quiet
    pub fn print_banner(&self) {
        if self.args.quiet {
            return;
        }
        println!("dynac {}", env!("CARGO_PKG_VERSION"));
        println!("Type 'help' for usage, 'exit' to quit.");
    }
}
