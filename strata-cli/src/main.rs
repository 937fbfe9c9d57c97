//! Main entry point for the strata CLI.
//!
//! This is the command-line interface for inspecting merged configuration.
//! It provides commands for reading the merged key space:
//! - `get`: Print the value at a dotted key
//! - `has`: Check whether a dotted key is present
//! - `dump`: Print the whole merged configuration
//! - `flatten`: Print every leaf as a dotted key

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library log records to stderr based on verbosity
    let logger = strata::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        eprintln!("Warning: could not install logger: {e}");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        format: cli.format,
        files: cli.files,
        optional: cli.optional,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Has(cmd) => cmd.execute(&global),
        cli::Command::Dump(cmd) => cmd.execute(&global),
        cli::Command::Flatten(cmd) => cmd.execute(&global),
        cli::Command::Extensions(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if !global.quiet {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
