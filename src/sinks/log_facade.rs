//! Bridge into the `log` crate
//!
//! The default sink of loggers created by a [`LogManager`](crate::LogManager):
//! messages go to whatever `log` backend the application installed, with the
//! logger name as target.

use crate::core::{LogLevel, Result, Sink};

#[derive(Debug, Clone)]
pub struct LogFacadeSink {
    target: String,
}

impl LogFacadeSink {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Sink for LogFacadeSink {
    fn write(&self, level: LogLevel, message: &str) -> Result<()> {
        log::log!(target: self.target.as_str(), level.to_log_level(), "{}", message);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        log::logger().flush();
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
