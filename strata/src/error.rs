//! Error types for the strata library.
//!
//! This module provides the error hierarchy for every operation in the
//! library, using `thiserror` for ergonomic error handling.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a strata error.
///
/// # Examples
///
/// ```
/// use strata::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the strata library.
///
/// Every variant is fatal to the operation that produced it; nothing in the
/// library retries or recovers locally.
#[derive(Debug, Error)]
pub enum Error {
    /// An empty key was passed where one is required.
    #[error("invalid key: a key is required")]
    InvalidKey,

    /// A dotted key did not resolve and no default was supplied.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// The key that failed to resolve.
        key: String,
    },

    /// A value expected to be a sequence (or a parsed file expected to be a
    /// map or sequence) had another shape.
    #[error("not an array: {subject}")]
    NotAnArray {
        /// The key or file path holding the offending value.
        subject: String,
    },

    /// A required configuration path is not a regular file.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A configuration path has no extension to infer its format from.
    #[error("file has no extension: {}", path.display())]
    ExtensionMissing {
        /// The offending path.
        path: PathBuf,
    },

    /// A configuration file name is not valid UTF-8, so it cannot name a
    /// namespace.
    #[error("file name is not valid UTF-8: {}", path.display())]
    InvalidFileName {
        /// The offending path.
        path: PathBuf,
    },

    /// No parser is registered for an extension, or the parser is currently
    /// being constructed further up the call stack.
    #[error("unsupported extension: {extension}")]
    UnsupportedExtension {
        /// The extension that could not be resolved.
        extension: String,
    },

    /// A parser factory produced something that is not a parser.
    #[error("parser factory for {extension} did not return a parser")]
    InvalidParserType {
        /// The extension whose factory misbehaved.
        extension: String,
    },

    /// A file could not be decoded by its format parser.
    #[error("failed to parse {} as {format}: {source}", path.display())]
    ParseFailure {
        /// The file that failed to decode.
        path: PathBuf,
        /// The format that was being decoded.
        format: Format,
        /// The underlying decoder error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A mutation was attempted on a read-only configuration.
    #[error("write operation on read-only configuration is not allowed")]
    WriteNotAllowed,

    /// A value could not be converted into the requested type.
    #[error("cannot deserialize value at '{key}': {source}")]
    Deserialize {
        /// The key whose value failed to convert.
        key: String,
        /// The underlying conversion error.
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Format discriminator carried by [`Error::ParseFailure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// TOML documents.
    Toml,
    /// JSON documents.
    Json,
    /// INI files.
    Ini,
    /// XML documents.
    Xml,
    /// YAML documents.
    Yaml,
    /// A format provided by a custom parser.
    Custom(String),
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => write!(f, "toml"),
            Self::Json => write!(f, "json"),
            Self::Ini => write!(f, "ini"),
            Self::Xml => write!(f, "xml"),
            Self::Yaml => write!(f, "yaml"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

impl Error {
    /// Build a [`Error::ParseFailure`] from any decoder error.
    pub fn parse_failure<E>(path: impl Into<PathBuf>, format: Format, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::ParseFailure {
            path: path.into(),
            format,
            source: source.into(),
        }
    }

    /// Check if error indicates a missing key or file.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::Error;
    ///
    /// let err = Error::KeyNotFound { key: "app.name".to_string() };
    /// assert!(err.is_not_found());
    /// assert!(!Error::WriteNotAllowed.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::FileNotFound { .. })
    }

    /// Check if error came from a format decoder.
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::ParseFailure { .. })
    }
}
