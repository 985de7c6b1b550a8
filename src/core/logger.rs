//! Main logger implementation

use super::{
    config::LoggerConfig,
    context::LogContext,
    enablement::EnablementSet,
    error::{LoggerError, Result},
    formatter::MessageFormatter,
    metrics::LoggerMetrics,
    record::LogRecord,
    reporter::ReporterSlot,
    scoped::ScopedLogger,
    sink::{NullSink, Sink},
    stack::{CapturedStack, StackResolver},
    tag::Tag,
};
use arc_swap::ArcSwap;
use std::panic::Location;
use std::sync::Arc;

/// A named logger.
///
/// Every call carries one or more [`Tag`]s and a callback that fills a fresh
/// [`LogContext`]. The call is emitted iff any of its tags is enabled; a
/// filtered call never runs the callback nor walks the stack.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taglog::{tags, Logger, MemorySink};
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder("app").sink(sink.clone()).build().unwrap();
///
/// logger
///     .log(&[tags::INFO], |ctx| {
///         ctx.message("started").data("port", 8080);
///     })
///     .unwrap();
///
/// assert!(sink.messages()[0].ends_with("(started) port=8080 "));
/// ```
pub struct Logger {
    name: String,
    enabled: ArcSwap<EnablementSet>,
    sink: Arc<dyn Sink>,
    reporter: ReporterSlot,
    resolver: StackResolver,
    formatter: Arc<MessageFormatter>,
    capture_frames: bool,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// Logger that emits nothing
    #[must_use]
    pub fn noop() -> Self {
        Self {
            name: "noop".to_string(),
            enabled: ArcSwap::from_pointee(EnablementSet::none()),
            sink: Arc::new(NullSink),
            reporter: ReporterSlot::new(),
            resolver: StackResolver::default(),
            formatter: Arc::new(MessageFormatter::default()),
            capture_frames: false,
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current enablement snapshot
    pub fn enabled(&self) -> Arc<EnablementSet> {
        self.enabled.load_full()
    }

    /// Replace the enablement set. Concurrent calls see either the old or
    /// the new set, never a mix.
    pub fn set_enabled(&self, set: EnablementSet) {
        self.enabled.store(Arc::new(set));
    }

    pub fn is_enabled(&self, tags: &[Tag]) -> bool {
        self.enabled.load().any_enabled(tags)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    /// Emit a call tagged with `tags`.
    ///
    /// Fails with [`LoggerError::EmptyTags`] for an empty slice; sink errors
    /// are returned as-is. Panics in `f` or in the reporter propagate.
    #[track_caller]
    pub fn log<F>(&self, tags: &[Tag], f: F) -> Result<()>
    where
        F: FnOnce(&mut LogContext),
    {
        self.emit(None, tags, Location::caller(), f)
    }

    /// Like [`log`](Self::log), with a correlation identifier placed after
    /// the call site.
    #[track_caller]
    pub fn log_with_id<F>(&self, id: &str, tags: &[Tag], f: F) -> Result<()>
    where
        F: FnOnce(&mut LogContext),
    {
        self.emit(Some(id), tags, Location::caller(), f)
    }

    /// Bind a parent context; every call through the returned logger starts
    /// from a copy of it.
    pub fn with_context<F>(&self, f: F) -> ScopedLogger<'_>
    where
        F: FnOnce(&mut LogContext),
    {
        let mut parent = LogContext::new();
        f(&mut parent);
        ScopedLogger::new(self, parent)
    }

    pub(crate) fn emit<F>(
        &self,
        id: Option<&str>,
        tags: &[Tag],
        location: &'static Location<'static>,
        f: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut LogContext),
    {
        if tags.is_empty() {
            return Err(LoggerError::EmptyTags);
        }

        if !self.is_enabled(tags) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let stack = if self.capture_frames {
            self.resolver.capture()
        } else {
            CapturedStack::default()
        }
        .pinned_to(location);

        let mut context = LogContext::new();
        f(&mut context);

        let record = LogRecord {
            correlation_id: id,
            tags,
            context: &context,
            stack: &stack,
        };

        if let Some(reporter) = self.reporter.get() {
            reporter.report(&record);
        }

        let message = self.formatter.format(&record);

        match self.sink.write(record.effective_level(), &message) {
            Ok(()) => {
                self.metrics.record_emitted();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_sink_failure();
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("enabled", &self.enabled())
            .field("sink", &self.sink.name())
            .field("reporter", &self.reporter)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use taglog::prelude::*;
///
/// let logger = Logger::builder("db")
///     .enabled(EnablementSet::of([tags::WARN, tags::ERROR]))
///     .build()
///     .unwrap();
///
/// assert!(!logger.is_enabled(&[tags::INFO]));
/// ```
pub struct LoggerBuilder {
    name: String,
    config: LoggerConfig,
    enabled: Option<EnablementSet>,
    catalogue: Vec<Tag>,
    sink: Option<Arc<dyn Sink>>,
    reporter: ReporterSlot,
    formatter: Option<Arc<MessageFormatter>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: LoggerConfig::default(),
            enabled: None,
            catalogue: super::tag::tags::standard(),
            sink: None,
            reporter: ReporterSlot::new(),
            formatter: None,
        }
    }

    /// Use `config` for enablement, formatting and stack capture
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Explicit enablement set, overriding the configured tag names
    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, set: EnablementSet) -> Self {
        self.enabled = Some(set);
        self
    }

    /// Tags that configured names are resolved against
    #[must_use = "builder methods return a new value"]
    pub fn catalogue(mut self, catalogue: Vec<Tag>) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Destination of formatted messages (default: [`NullSink`])
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Share a reporter slot, e.g. the one of a [`LogManager`](super::LogManager)
    #[must_use = "builder methods return a new value"]
    pub fn reporter_slot(mut self, slot: ReporterSlot) -> Self {
        self.reporter = slot;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub(crate) fn shared_formatter(mut self, formatter: Arc<MessageFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let enabled = match self.enabled {
            Some(set) => set,
            None => self.config.enablement(&self.catalogue)?,
        };
        let formatter = match self.formatter {
            Some(f) => f,
            None => Arc::new(self.config.formatter()),
        };

        Ok(Logger {
            name: self.name,
            enabled: ArcSwap::from_pointee(enabled),
            sink: self.sink.unwrap_or_else(|| Arc::new(NullSink)),
            reporter: self.reporter,
            resolver: self.config.resolver(),
            formatter,
            capture_frames: self.config.capture_frames,
            metrics: LoggerMetrics::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use crate::core::reporter::Reporter;
    use crate::core::tag::tags::{DEBUG, ERROR, INFO, WARN};
    use crate::sinks::MemorySink;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn logger_with(set: EnablementSet) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("test")
            .enabled(set)
            .sink(sink.clone())
            .build()
            .unwrap();
        (logger, sink)
    }

    #[test]
    fn test_builder_defaults_to_all() {
        let logger = Logger::builder("app").build().unwrap();
        assert_eq!(*logger.enabled(), EnablementSet::All);
        assert_eq!(logger.name(), "app");
    }

    #[test]
    fn test_builder_rejects_unknown_configured_tag() {
        let config = LoggerConfig::from_json_str(r#"{ "enabled": ["loud"] }"#).unwrap();
        let err = Logger::builder("app").config(config).build().unwrap_err();
        assert!(matches!(err, LoggerError::UnknownTag { .. }));
    }

    #[test]
    fn test_empty_tags_rejected() {
        let (logger, sink) = logger_with(EnablementSet::All);
        let err = logger.log(&[], |ctx| {
            ctx.message("never");
        });
        assert!(matches!(err, Err(LoggerError::EmptyTags)));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_filtered_call_skips_callback() {
        let (logger, sink) = logger_with(EnablementSet::of([ERROR]));
        let mut ran = false;
        logger
            .log(&[DEBUG, INFO], |_| {
                ran = true;
            })
            .unwrap();

        assert!(!ran);
        assert!(sink.is_empty());
        assert_eq!(logger.metrics().filtered_count(), 1);
    }

    #[test]
    fn test_any_tag_enables_call() {
        let (logger, sink) = logger_with(EnablementSet::of([WARN]));
        logger.log(&[INFO, WARN], |_| {}).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(logger.metrics().emitted_count(), 1);
    }

    #[test]
    fn test_effective_level_forwarded() {
        let (logger, sink) = logger_with(EnablementSet::of([INFO]));
        logger.log(&[INFO, WARN], |_| {}).unwrap();
        assert_eq!(sink.entries()[0].0, LogLevel::Warn);
    }

    #[test]
    fn test_call_site_is_caller() {
        let (logger, sink) = logger_with(EnablementSet::All);
        let line = line!() + 1;
        logger.log(&[INFO], |_| {}).unwrap();

        let expected = format!("[i] {}:{} ", file!(), line);
        assert_eq!(sink.messages()[0], expected);
    }

    #[test]
    fn test_correlation_id() {
        let (logger, sink) = logger_with(EnablementSet::All);
        logger
            .log_with_id("req-42", &[INFO], |ctx| {
                ctx.message("done");
            })
            .unwrap();
        assert!(sink.messages()[0].ends_with(" req-42 (done) "));
    }

    #[test]
    fn test_set_enabled_swaps_snapshot() {
        let (logger, sink) = logger_with(EnablementSet::All);
        logger.set_enabled(EnablementSet::none());
        logger.log(&[ERROR], |_| {}).unwrap();
        assert!(sink.is_empty());

        logger.set_enabled(EnablementSet::of([ERROR]));
        logger.log(&[ERROR], |_| {}).unwrap();
        assert_eq!(sink.len(), 1);
    }

    struct Recording {
        calls: AtomicUsize,
        descriptions: Mutex<Vec<Option<String>>>,
    }

    impl Reporter for Recording {
        fn report(&self, record: &LogRecord<'_>) {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.descriptions
                .lock()
                .push(record.description().map(String::from));
        }
    }

    #[test]
    fn test_reporter_called_for_emitted_calls_only() {
        let reporter = Arc::new(Recording {
            calls: AtomicUsize::new(0),
            descriptions: Mutex::new(Vec::new()),
        });
        let slot = ReporterSlot::new();
        slot.set(reporter.clone());

        let logger = Logger::builder("rep")
            .enabled(EnablementSet::of([WARN]))
            .reporter_slot(slot)
            .build()
            .unwrap();

        logger.log(&[DEBUG], |ctx| {
            ctx.message("hidden");
        }).unwrap();
        logger.log(&[WARN], |ctx| {
            ctx.message("shown");
        }).unwrap();

        assert_eq!(reporter.calls.load(Ordering::Relaxed), 1);
        assert_eq!(
            *reporter.descriptions.lock(),
            vec![Some("shown".to_string())]
        );
    }

    #[test]
    fn test_noop_logger() {
        let logger = Logger::noop();
        let mut ran = false;
        logger.log(&[ERROR], |_| ran = true).unwrap();
        assert!(!ran);
    }

    #[test]
    fn test_sink_error_propagates() {
        let sink = Arc::new(MemorySink::new());
        sink.close();
        let logger = Logger::builder("x").sink(sink).build().unwrap();

        let err = logger.log(&[INFO], |_| {}).unwrap_err();
        assert!(matches!(err, LoggerError::SinkError { .. }));
        assert_eq!(logger.metrics().sink_failure_count(), 1);
    }

    #[test]
    #[should_panic(expected = "callback failed")]
    fn test_callback_panic_propagates() {
        let logger = Logger::builder("x").build().unwrap();
        let _ = logger.log(&[INFO], |_| panic!("callback failed"));
    }
}
