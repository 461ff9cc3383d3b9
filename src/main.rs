//! dynac - Multi-source autocomplete aggregator
//!
//! Loads autocomplete types from the configuration file and either runs a
//! one-shot subcommand or an interactive shell.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! dynac -c types.toml
//!
//! # One-shot search
//! dynac -c types.toml search --types mentions,tags al
//! ```

use std::sync::Arc;
use tracing::{Level, info, warn};

use dynac::ReplEngine;
use dynac::cli::CliInterface;
use dynac::error::Result;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Build the type registry
/// 4. Handle subcommands or start the interactive shell
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    let registry = Arc::new(cli.build_registry()?);
    info!("Registered {} autocomplete type(s)", registry.len());

    if cli.handle_subcommand(registry.clone()).await? {
        return Ok(());
    }

    if registry.is_empty() {
        warn!(
            "No autocomplete types configured in {}",
            cli.config_path().display()
        );
    }

    cli.print_banner();

    let autocomplete = cli.create_autocomplete(registry);
    let mut repl = ReplEngine::new(autocomplete, cli.formatter(), &cli.config().history)?;
    repl.run().await?;

    println!("Goodbye!");
    Ok(())
}

/// Initialize logging system based on configured level
///
/// CLI verbosity flags are already folded into the configuration.
fn initialize_logging(cli: &CliInterface) {
    let level: Level = cli.config().logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
