//! Extension to parser registry with lazy construction.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::{IniParser, JsonParser, Parser, TomlParser, XmlParser, YamlParser};
use crate::error::{Error, Result};

/// Deferred parser constructor.
///
/// The factory receives the registry so it can delegate to another
/// extension. Its result must be a boxed `Arc<dyn Parser>` (see
/// [`into_any`]); anything else is rejected with
/// [`Error::InvalidParserType`].
pub type ParserFactory = Arc<dyn Fn(&mut ParserRegistry) -> Result<Box<dyn Any>> + Send + Sync>;

/// Erase a parser into the shape dynamic factories must return.
#[must_use]
pub fn into_any(parser: Arc<dyn Parser>) -> Box<dyn Any> {
    Box::new(parser)
}

enum Registration {
    Ready(Arc<dyn Parser>),
    Deferred(ParserFactory),
}

/// Maps file extensions to parsers.
///
/// Registrations keep their insertion order, which is the order reported by
/// [`ParserRegistry::supported_extensions`]. A deferred registration is
/// constructed on first use and the result is reused afterwards.
///
/// While a factory runs its extension is marked as being resolved; a
/// reentrant request for the same extension fails with
/// [`Error::UnsupportedExtension`] instead of recursing.
pub struct ParserRegistry {
    entries: Vec<(String, Registration)>,
    resolving: HashSet<String>,
}

impl ParserRegistry {
    /// Create a registry with the built-in parsers.
    ///
    /// Extensions are registered in this order: `toml`, `json`, `ini`,
    /// `xml`, `yaml` and `yml`, the last being an alias of `yaml`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::parser::ParserRegistry;
    ///
    /// let registry = ParserRegistry::new();
    /// assert_eq!(
    ///     registry.supported_extensions(),
    ///     vec!["toml", "json", "ini", "xml", "yaml", "yml"]
    /// );
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.set_factory("toml", |_| Ok(Arc::new(TomlParser) as Arc<dyn Parser>));
        registry.set_factory("json", |_| Ok(Arc::new(JsonParser) as Arc<dyn Parser>));
        registry.set_factory("ini", |_| Ok(Arc::new(IniParser) as Arc<dyn Parser>));
        registry.set_factory("xml", |_| Ok(Arc::new(XmlParser) as Arc<dyn Parser>));
        registry.set_factory("yaml", |_| Ok(Arc::new(YamlParser) as Arc<dyn Parser>));
        registry.set_factory("yml", |registry| registry.get_parser("yaml"));
        registry
    }

    /// Create a registry without any parsers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            resolving: HashSet::new(),
        }
    }

    /// Register an already constructed parser for `extension`.
    pub fn set_parser(&mut self, extension: impl Into<String>, parser: Arc<dyn Parser>) {
        self.insert(extension.into(), Registration::Ready(parser));
    }

    /// Register a deferred, typed parser factory for `extension`.
    pub fn set_factory<F>(&mut self, extension: impl Into<String>, factory: F)
    where
        F: Fn(&mut ParserRegistry) -> Result<Arc<dyn Parser>> + Send + Sync + 'static,
    {
        self.set_dyn_factory(extension, move |registry| factory(registry).map(into_any));
    }

    /// Register a deferred factory whose result is checked at construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::any::Any;
    /// use strata::parser::ParserRegistry;
    /// use strata::Error;
    ///
    /// let mut registry = ParserRegistry::new();
    /// registry.set_dyn_factory("ext", |_| Ok(Box::new("not a parser") as Box<dyn Any>));
    ///
    /// assert!(registry.has_parser("ext"));
    /// assert!(matches!(
    ///     registry.get_parser("ext"),
    ///     Err(Error::InvalidParserType { .. })
    /// ));
    /// ```
    pub fn set_dyn_factory<F>(&mut self, extension: impl Into<String>, factory: F)
    where
        F: Fn(&mut ParserRegistry) -> Result<Box<dyn Any>> + Send + Sync + 'static,
    {
        self.insert(extension.into(), Registration::Deferred(Arc::new(factory)));
    }

    /// Check whether anything is registered for `extension`.
    ///
    /// This never constructs a parser.
    #[must_use]
    pub fn has_parser(&self, extension: &str) -> bool {
        self.position(extension).is_some()
    }

    /// Get the parser for `extension`, constructing it if needed.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedExtension`] if nothing is registered, or if the
    ///   extension is already being constructed further up the call stack
    /// - [`Error::InvalidParserType`] if the factory returned something else
    ///   than a parser
    /// - any error returned by the factory itself
    pub fn get_parser(&mut self, extension: &str) -> Result<Arc<dyn Parser>> {
        let unsupported = || Error::UnsupportedExtension {
            extension: extension.to_string(),
        };

        if self.resolving.contains(extension) {
            return Err(unsupported());
        }

        let index = self.position(extension).ok_or_else(unsupported)?;
        let factory = match &self.entries[index].1 {
            Registration::Ready(parser) => return Ok(Arc::clone(parser)),
            Registration::Deferred(factory) => Arc::clone(factory),
        };

        log::debug!("Constructing parser for extension '{extension}'");
        self.resolving.insert(extension.to_string());
        let built = panic::catch_unwind(AssertUnwindSafe(|| factory(self)));
        self.resolving.remove(extension);
        let built = built.unwrap_or_else(|payload| panic::resume_unwind(payload));

        let parser = *built?
            .downcast::<Arc<dyn Parser>>()
            .map_err(|_| Error::InvalidParserType {
                extension: extension.to_string(),
            })?;

        self.set_parser(extension, Arc::clone(&parser));
        Ok(parser)
    }

    /// Registered extensions in registration order.
    #[must_use]
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.entries.iter().map(|(ext, _)| ext.as_str()).collect()
    }

    fn position(&self, extension: &str) -> Option<usize> {
        self.entries.iter().position(|(ext, _)| ext == extension)
    }

    fn insert(&mut self, extension: String, registration: Registration) {
        match self.position(&extension) {
            Some(index) => self.entries[index].1 = registration,
            None => self.entries.push((extension, registration)),
        }
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("extensions", &self.supported_extensions())
            .field("resolving", &self.resolving)
            .finish()
    }
}
