//! CLI-specific error types with exit codes.
//!
//! This module wraps library errors and maps every failure to the exit code
//! the `strata` binary reports.

use std::fmt;
use strata::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Output could not be rendered.
    Output(String),

    /// Semantic failure (e.g., key absent) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (missing key)
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration file could not be loaded
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Output(_) => 6,
            CliError::Library(lib_err) => match lib_err {
                LibError::KeyNotFound { .. } => 1,
                LibError::InvalidKey => 4,
                LibError::Io(_) => 5,
                LibError::FileNotFound { .. }
                | LibError::ExtensionMissing { .. }
                | LibError::InvalidFileName { .. }
                | LibError::UnsupportedExtension { .. }
                | LibError::InvalidParserType { .. }
                | LibError::ParseFailure { .. }
                | LibError::NotAnArray { .. } => 7,
                _ => 6,
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Output(msg) => write!(f, "Failed to render output: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
