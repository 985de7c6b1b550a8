//! Core logger types and traits

pub mod config;
pub mod context;
pub mod enablement;
pub mod error;
pub mod escape;
pub mod exception;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod render;
pub mod reporter;
pub mod scoped;
pub mod sink;
pub mod stack;
pub mod tag;

pub use config::{EnabledTags, LoggerConfig};
pub use context::{LogContext, Value};
pub use enablement::EnablementSet;
pub use error::{LoggerError, Result};
pub use exception::CapturedException;
pub use formatter::MessageFormatter;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use record::LogRecord;
pub use registry::{LogManager, SinkFactory};
pub use render::ExceptionRenderer;
pub use reporter::{Reporter, ReporterSlot};
pub use scoped::ScopedLogger;
pub use sink::{NullSink, Sink};
pub use stack::{CapturedStack, StackFrame, StackResolver};
pub use tag::{tags, Tag};
