//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, DumpCommand, ExtensionsCommand, FlattenCommand, GetCommand, HasCommand,
};
use crate::utils::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting merged configuration files.
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about = "Inspect layered configuration files", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Output format for values
    #[arg(
        long,
        value_enum,
        default_value = "json",
        global = true,
        env = "STRATA_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Required configuration file or directory (repeatable)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        global = true,
        env = "STRATA_FILES",
        value_delimiter = ','
    )]
    pub files: Vec<PathBuf>,

    /// Optional configuration file or directory, loaded last (repeatable)
    #[arg(
        short = 'o',
        long = "optional",
        value_name = "PATH",
        global = true,
        env = "STRATA_OPTIONAL",
        value_delimiter = ','
    )]
    pub optional: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the value stored at a dotted key
    Get(GetCommand),

    /// Exit successfully if a dotted key is present
    Has(HasCommand),

    /// Print the whole merged configuration
    Dump(DumpCommand),

    /// Print every leaf as a dotted key
    Flatten(FlattenCommand),

    /// List the supported file extensions
    Extensions(ExtensionsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
