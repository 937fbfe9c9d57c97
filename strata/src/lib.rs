#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strata
//!
//! A library for aggregating configuration from many files.
//!
//! Files in TOML, JSON, INI, XML and YAML are parsed, nested under their
//! file stem and merged into one tree addressed by dotted keys such as
//! `database.primary.port`.
//!
//! ## Core Types
//!
//! - [`ConfigLoader`] and [`PathSpec`]: loading and merging files
//! - [`ParserRegistry`] and [`Parser`]: extension to parser resolution
//! - [`Config`], [`ReadOnlyConfig`] and [`ConfigAccess`]: dotted-key access
//! - [`keypath`]: the underlying tree operations
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use std::fs;
//! use strata::{ConfigAccess, ConfigLoader, PathSpec};
//! use tempfile::TempDir;
//!
//! let dir = TempDir::new().unwrap();
//! fs::write(dir.path().join("db.toml"), "host = \"localhost\"\nport = 5432\n").unwrap();
//! fs::write(dir.path().join(".env.json"), r#"{"db": {"port": 6543}}"#).unwrap();
//!
//! let config = ConfigLoader::new().read(dir.path(), PathSpec::default()).unwrap();
//!
//! assert_eq!(config.get("db.host").unwrap(), "localhost");
//! // Directory entries load in name order, so `db.toml` wins over `.env.json`
//! assert_eq!(config.get("db.port").unwrap(), 5432);
//! ```

pub mod config;
pub mod error;
pub mod keypath;
pub mod loader;
pub mod logging;
pub mod parser;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigAccess, ReadOnlyConfig};
pub use error::{Error, Format, Result};
pub use loader::{resolve_paths, ConfigLoader, PathSpec};
pub use logging::{init_logger, LogLevel, Logger};
pub use parser::{Parser, ParserRegistry};
pub use serde_json::{Map, Value};
