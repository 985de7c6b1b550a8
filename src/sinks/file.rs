//! File sink implementation

use crate::core::{LogLevel, LoggerError, Result, Sink};
use chrono::Utc;
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends `<timestamp> <LEVEL> <message>` records to a file.
///
/// Messages spanning several lines (exception chains) are written as-is.
/// Writes from one process are serialised by a mutex; an advisory lock on the
/// file keeps concurrent processes from interleaving a record.
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, level: LogLevel, message: &str) -> Result<()> {
        let record = format!(
            "{} {:5} {}\n",
            Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            level.to_str(),
            message.trim_end_matches('\n')
        );

        let mut writer = self.writer.lock();
        writer.get_ref().lock_exclusive()?;
        let written = writer
            .write_all(record.as_bytes())
            .and_then(|()| writer.flush());
        let unlocked = FileExt::unlock(writer.get_ref());
        written?;
        unlocked?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.get_mut().flush() {
            eprintln!(
                "[TAGLOG WARNING] Failed to flush '{}' on drop: {}",
                self.path.display(),
                e
            );
        }
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_records() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");

        let sink = FileSink::new(&path).unwrap();
        sink.write(LogLevel::Info, "[i] a.rs:1 first ").unwrap();
        sink.write(LogLevel::Error, "[e] a.rs:2 \napp::E: boom\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("INFO  [i] a.rs:1 first "));
        assert!(lines[1].ends_with("ERROR [e] a.rs:2 "));
        assert_eq!(lines[2], "app::E: boom");
    }

    #[test]
    fn test_open_failure_has_context() {
        let err = FileSink::new("/nonexistent-dir/x/app.log").unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }
}
