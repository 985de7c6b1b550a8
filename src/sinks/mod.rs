//! Sink implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod log_facade;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
#[cfg(feature = "file")]
pub use file::FileSink;
pub use log_facade::LogFacadeSink;
pub use memory::MemorySink;

pub use crate::core::{NullSink, Sink};
