//! CLI command implementations.
//!
//! - `get`: Print the value at a dotted key
//! - `has`: Check whether a dotted key is present
//! - `dump`: Print the whole merged configuration
//! - `flatten`: Print every leaf as a dotted key
//! - `extensions`: List supported file extensions
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod dump;
pub mod extensions;
pub mod flatten;
pub mod get;
pub mod has;

pub use completions::CompletionsCommand;
pub use dump::DumpCommand;
pub use extensions::ExtensionsCommand;
pub use flatten::FlattenCommand;
pub use get::GetCommand;
pub use has::HasCommand;
