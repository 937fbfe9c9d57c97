//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use std::path::PathBuf;
use strata::{ConfigLoader, PathSpec, ReadOnlyConfig, Value};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Output format for values.
    pub format: OutputFormat,

    /// Required configuration paths.
    pub files: Vec<PathBuf>,

    /// Optional configuration paths.
    pub optional: Vec<PathBuf>,
}

/// Output format for rendered values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Turn CLI paths into a loader input.
///
/// A single path is passed as is so that a directory expands to its entries.
pub fn path_spec(paths: &[PathBuf]) -> PathSpec {
    match paths {
        [single] => PathSpec::One(single.clone()),
        _ => PathSpec::Many(paths.to_vec()),
    }
}

/// Load and merge the configuration named by the global options.
///
/// # Errors
///
/// Returns `InvalidArguments` if no path was given, otherwise any loader
/// error.
pub fn load_configuration(global: &GlobalOptions) -> Result<ReadOnlyConfig, CliError> {
    if global.files.is_empty() && global.optional.is_empty() {
        return Err(CliError::InvalidArguments(
            "no configuration files given (use --file or STRATA_FILES)".to_string(),
        ));
    }

    log::debug!(
        "Loading {} required and {} optional path(s)",
        global.files.len(),
        global.optional.len()
    );

    let mut loader = ConfigLoader::new();
    let config = loader.read(path_spec(&global.files), path_spec(&global.optional))?;
    Ok(config)
}

/// Render a value in the requested format.
///
/// Top-level strings are printed bare so they can be used in shell scripts.
pub fn render_value(value: &Value, format: OutputFormat) -> Result<String, CliError> {
    if let Value::String(s) = value {
        return Ok(s.clone());
    }

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| CliError::Output(e.to_string())),
    }
}

/// Parse a `--default` argument: JSON if it parses, a plain string otherwise.
pub fn parse_default(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
