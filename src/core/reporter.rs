//! External reporters (alerting, telemetry)

use super::record::LogRecord;
use parking_lot::RwLock;
use std::sync::Arc;

/// Receives every emitted call before its message is formatted.
///
/// Called whenever a call passes the enablement check, regardless of what the
/// sink later does with the message. Panics are not caught.
pub trait Reporter: Send + Sync {
    fn report(&self, record: &LogRecord<'_>);
}

impl<F> Reporter for F
where
    F: Fn(&LogRecord<'_>) + Send + Sync,
{
    fn report(&self, record: &LogRecord<'_>) {
        self(record)
    }
}

/// Runtime-swappable reporter shared by all loggers of a manager.
#[derive(Clone, Default)]
pub struct ReporterSlot {
    inner: Arc<RwLock<Option<Arc<dyn Reporter>>>>,
}

impl ReporterSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, reporter: Arc<dyn Reporter>) {
        *self.inner.write() = Some(reporter);
    }

    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    pub fn is_set(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Current reporter; the lock is released before the caller uses it.
    pub fn get(&self) -> Option<Arc<dyn Reporter>> {
        self.inner.read().clone()
    }
}

impl std::fmt::Debug for ReporterSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReporterSlot")
            .field("set", &self.is_set())
            .finish()
    }
}
