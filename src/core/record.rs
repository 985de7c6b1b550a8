//! Borrowed view of one emitted log call

use super::context::LogContext;
use super::log_level::LogLevel;
use super::stack::CapturedStack;
use super::tag::{self, Tag};

/// Everything known about an emitted call once its context is populated.
///
/// Handed to the [`Reporter`](super::Reporter) and to the
/// [`MessageFormatter`](super::MessageFormatter).
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub correlation_id: Option<&'a str>,
    pub tags: &'a [Tag],
    pub context: &'a LogContext,
    pub stack: &'a CapturedStack,
}

impl<'a> LogRecord<'a> {
    pub fn description(&self) -> Option<&'a str> {
        self.context.description()
    }

    /// Highest level among the call's tags
    pub fn effective_level(&self) -> LogLevel {
        tag::effective_level(self.tags).unwrap_or_default()
    }
}
