//! Sink trait for log output destinations

use super::{error::Result, log_level::LogLevel};

/// Final destination of formatted messages.
///
/// Sinks are shared between threads, so they take `&self` and synchronise
/// internally. Errors are returned to the logging caller unchanged.
pub trait Sink: Send + Sync {
    fn write(&self, level: LogLevel, message: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {
    fn write(&self, _level: LogLevel, _message: &str) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}
