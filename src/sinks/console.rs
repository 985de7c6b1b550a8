//! Console sink implementation

use crate::core::{LogLevel, Result, Sink};
use chrono::Utc;
use colored::Colorize;

/// Writes `<timestamp> <LEVEL> <message>` lines; Error and Fatal go to
/// stderr, everything else to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    use_colors: bool,
    timestamps: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamps: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", level.to_str())
                .color(level.color_code())
                .to_string()
        } else {
            format!("{:5}", level.to_str())
        };

        if self.timestamps {
            format!(
                "{} {} {}",
                Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                level_str,
                message
            )
        } else {
            format!("{} {}", level_str, message)
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, level: LogLevel, message: &str) -> Result<()> {
        let line = self.format_line(level, message);
        match level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
