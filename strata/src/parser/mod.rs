//! Format parsers and the extension registry.
//!
//! A [`Parser`] turns one file into a [`serde_json::Value`]. The
//! [`ParserRegistry`] maps file extensions to parsers, constructing each one
//! lazily the first time it is requested.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use strata::parser::{JsonParser, Parser, ParserRegistry};
//!
//! let mut registry = ParserRegistry::new();
//! assert!(registry.has_parser("yml"));
//!
//! // Register a custom extension that reuses the JSON parser
//! registry.set_factory("jsonc", |registry| registry.get_parser("json"));
//!
//! let jsonc = registry.get_parser("jsonc").unwrap();
//! let json = registry.get_parser("json").unwrap();
//! assert!(Arc::ptr_eq(&jsonc, &json));
//! ```

mod formats;
mod registry;

use std::path::Path;

use serde_json::Value;

use crate::error::Result;

pub use formats::{IniParser, JsonParser, TomlParser, XmlParser, YamlParser, XML_ATTRIBUTES_KEY};
pub use registry::{into_any, ParserFactory, ParserRegistry};

/// Converts one configuration file into a value tree.
///
/// Implementations should report decoder failures as
/// [`crate::Error::ParseFailure`].
#[cfg_attr(test, mockall::automock)]
pub trait Parser: Send + Sync {
    /// Parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    fn parse(&self, path: &Path) -> Result<Value>;
}
