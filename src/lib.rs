//! # taglog
//!
//! A tag-filtered structured logging front end.
//!
//! Callers emit events tagged with one or more [`Tag`]s, fill a per-call
//! [`LogContext`] with a description, typed variables and captured
//! exceptions, and the logger decides whether to emit, formats a single
//! human-readable message and forwards it to a [`Sink`] and an optional
//! [`Reporter`].
//!
//! ## Features
//!
//! - **Tag filtering**: a call is emitted iff any of its tags is enabled;
//!   filtered calls never run their callback
//! - **Exception chains**: causes and suppressed errors are rendered with
//!   frames shared with the enclosing error elided
//! - **Scoped context**: [`ScopedLogger`] prefixes every call with a parent
//!   context
//! - **Registry**: [`LogManager`] hands out one logger per name

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        tags, CapturedException, EnablementSet, LogContext, LogLevel, LogManager, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, Reporter, Result, ScopedLogger, Sink, Tag,
        Value,
    };
    pub use crate::sinks::MemorySink;
}

pub use crate::core::{
    tags, CapturedException, CapturedStack, EnabledTags, EnablementSet, ExceptionRenderer,
    LogContext, LogLevel, LogManager, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, MessageFormatter, NullSink, Reporter, ReporterSlot, Result, ScopedLogger, Sink,
    SinkFactory, StackFrame, StackResolver, Tag, Value,
};
#[cfg(feature = "console")]
pub use sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use sinks::FileSink;
pub use sinks::{LogFacadeSink, MemorySink};
