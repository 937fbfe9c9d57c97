//! Logging infrastructure for the strata library.
//!
//! The library itself only emits records through the [`log`] facade
//! (`log::debug!` for every file loaded or skipped, every parser
//! constructed). Binaries pick a [`LogLevel`] and install a [`Logger`] that
//! writes those records to stderr.

use std::env;
use std::fmt;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "STRATA_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use strata::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Suppress all output.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything, including per-file load traces.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `quiet`, `normal` or `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` crate filter matching this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Trace,
        }
    }
}

/// A stderr logger gated by a [`LogLevel`].
///
/// # Examples
///
/// ```
/// use strata::{LogLevel, Logger};
/// use log::Log;
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.enabled(&log::Metadata::builder().level(log::Level::Warn).build()));
/// assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Debug).build()));
/// ```
#[derive(Debug, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger for the given level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Install this logger as the global `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if a global logger was already installed.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let filter = self.level.filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Chooses a logger from CLI flags and the environment.
///
/// Priority: `verbose`, then `quiet`, then [`LOG_MODE_ENV`], then Normal.
/// An unparseable environment value is ignored.
///
/// # Examples
///
/// ```
/// use strata::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .map_or_else(Logger::default, Logger::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard(Option<String>);

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let saved = env::var(LOG_MODE_ENV).ok();
            match value {
                Some(v) => env::set_var(LOG_MODE_ENV, v),
                None => env::remove_var(LOG_MODE_ENV),
            }
            Self(saved)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.0 {
                Some(v) => env::set_var(LOG_MODE_ENV, v),
                None => env::remove_var(LOG_MODE_ENV),
            }
        }
    }

    fn metadata(level: log::Level) -> Metadata<'static> {
        Metadata::builder().level(level).build()
    }

    #[test]
    fn test_log_level_display_and_parse() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose] {
            assert_eq!(LogLevel::parse(&level.to_string()).unwrap(), level);
        }
        assert_eq!(LogLevel::parse("Normal").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_filters() {
        assert_eq!(LogLevel::Quiet.filter(), LevelFilter::Off);
        assert_eq!(LogLevel::Normal.filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Verbose.filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_enabled_by_level() {
        let quiet = Logger::new(LogLevel::Quiet);
        assert!(!quiet.enabled(&metadata(log::Level::Error)));

        let normal = Logger::default();
        assert!(normal.enabled(&metadata(log::Level::Error)));
        assert!(normal.enabled(&metadata(log::Level::Warn)));
        assert!(!normal.enabled(&metadata(log::Level::Info)));

        let verbose = Logger::new(LogLevel::Verbose);
        assert!(verbose.enabled(&metadata(log::Level::Debug)));
    }

    #[test]
    #[serial]
    fn test_init_logger_defaults() {
        let _guard = EnvGuard::set(None);
        assert_eq!(init_logger(false, false).level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_from_env() {
        let _guard = EnvGuard::set(Some("verbose"));
        assert_eq!(init_logger(false, false).level(), LogLevel::Verbose);
    }

    #[test]
    #[serial]
    fn test_init_logger_env_invalid_fallback() {
        let _guard = EnvGuard::set(Some("loud"));
        assert_eq!(init_logger(false, false).level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_flags_override_env() {
        let _guard = EnvGuard::set(Some("verbose"));
        assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
        assert_eq!(init_logger(true, false).level(), LogLevel::Verbose);
    }
}
