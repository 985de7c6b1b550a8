//! Logger registry
//!
//! A [`LogManager`] hands out one [`Logger`] per name. All loggers of a
//! manager share its configuration, formatter and reporter slot.

use super::{
    config::LoggerConfig,
    error::Result,
    formatter::MessageFormatter,
    logger::Logger,
    reporter::{Reporter, ReporterSlot},
    sink::Sink,
    tag::{tags, Tag},
};
use crate::sinks::LogFacadeSink;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Creates the sink of a newly registered logger from its name
pub type SinkFactory = Arc<dyn Fn(&str) -> Arc<dyn Sink> + Send + Sync>;

static GLOBAL: OnceLock<LogManager> = OnceLock::new();

/// Get-or-create registry of named loggers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taglog::LogManager;
///
/// let manager = LogManager::new();
/// let a = manager.get_logger("http");
/// let b = manager.get_logger("http");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct LogManager {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    config: LoggerConfig,
    catalogue: Vec<Tag>,
    formatter: Arc<MessageFormatter>,
    reporter: ReporterSlot,
    sink_factory: SinkFactory,
}

impl LogManager {
    /// Manager with the default configuration; loggers forward to the `log`
    /// crate under their own name.
    pub fn new() -> Self {
        Self::build(LoggerConfig::default(), tags::standard())
    }

    /// Manager with a validated configuration. Configured tag names are
    /// checked against `catalogue` up front, so `get_logger` cannot fail.
    pub fn with_config(config: LoggerConfig, catalogue: Vec<Tag>) -> Result<Self> {
        config.validate()?;
        config.enablement(&catalogue)?;
        Ok(Self::build(config, catalogue))
    }

    fn build(config: LoggerConfig, catalogue: Vec<Tag>) -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            formatter: Arc::new(config.formatter()),
            config,
            catalogue,
            reporter: ReporterSlot::new(),
            sink_factory: Arc::new(|name: &str| -> Arc<dyn Sink> {
                Arc::new(LogFacadeSink::new(name))
            }),
        }
    }

    /// Replace how sinks are created for loggers registered from now on
    #[must_use]
    pub fn with_sink_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn Sink> + Send + Sync + 'static,
    {
        self.sink_factory = Arc::new(factory);
        self
    }

    /// Process-wide manager with the default configuration
    pub fn global() -> &'static LogManager {
        GLOBAL.get_or_init(LogManager::new)
    }

    /// The logger registered under `name`, created on first request.
    ///
    /// Creation happens under the write lock after a second lookup, so
    /// concurrent callers for the same name all get the same instance and
    /// the sink factory runs once per name.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let mut loggers = self.loggers.write();
        let logger = loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(self.create_logger(name)));
        Arc::clone(logger)
    }

    fn create_logger(&self, name: &str) -> Logger {
        let enabled = match self.config.enablement(&self.catalogue) {
            Ok(set) => set,
            Err(e) => {
                // Unreachable for managers built through `with_config`.
                eprintln!("[TAGLOG WARNING] {}; logger '{}' enables all tags", e, name);
                super::enablement::EnablementSet::All
            }
        };

        let built = Logger::builder(name)
            .config(self.config.clone())
            .enabled(enabled)
            .sink((self.sink_factory)(name))
            .reporter_slot(self.reporter.clone())
            .shared_formatter(Arc::clone(&self.formatter))
            .build();

        match built {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("[TAGLOG WARNING] Failed to build logger '{}': {}", name, e);
                Logger::noop()
            }
        }
    }

    /// Install a reporter for every logger of this manager
    pub fn set_reporter(&self, reporter: Arc<dyn Reporter>) {
        self.reporter.set(reporter);
    }

    pub fn clear_reporter(&self) {
        self.reporter.clear();
    }

    pub fn reporter_slot(&self) -> &ReporterSlot {
        &self.reporter
    }

    /// Names of all registered loggers, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogManager")
            .field("loggers", &self.logger_names())
            .field("config", &self.config)
            .field("reporter", &self.reporter)
            .finish()
    }
}
