//! In-memory sink, mostly for tests and for inspecting output

use crate::core::{LogLevel, LoggerError, Result, Sink};
use parking_lot::Mutex;

/// Keeps every written `(level, message)` pair.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(LogLevel, String)>>,
    closed: Mutex<bool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Make further writes fail
    pub fn close(&self) {
        *self.closed.lock() = true;
    }
}

impl Sink for MemorySink {
    fn write(&self, level: LogLevel, message: &str) -> Result<()> {
        if *self.closed.lock() {
            return Err(LoggerError::sink("memory", "sink is closed"));
        }
        self.entries.lock().push((level, message.to_string()));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
