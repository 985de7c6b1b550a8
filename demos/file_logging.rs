//! File logging example
//!
//! Demonstrates a registry configured from JSON whose loggers write to a file.
//!
//! Run with: cargo run --example file_logging

use std::sync::Arc;
use taglog::prelude::*;
use taglog::FileSink;

fn main() -> Result<()> {
    println!("=== taglog - File Logging Example ===\n");

    let config = LoggerConfig::from_json_str(r#"{ "enabled": ["info", "warn", "error"], "value_limit": 64 }"#)?;
    let file: Arc<dyn Sink> = Arc::new(FileSink::new("application.log")?);
    let manager = LogManager::with_config(config, tags::standard())?
        .with_sink_factory(move |_| Arc::clone(&file));

    let db = manager.get_logger("db");
    let http = manager.get_logger("http");

    db.log(&[tags::INFO], |ctx| {
        ctx.message("connected").data("pool", 8);
    })?;
    db.log(&[tags::DEBUG], |ctx| {
        ctx.message("filtered out");
    })?;
    for i in 1..=3 {
        http.log_with_id(&format!("req-{}", i), &[tags::INFO], |ctx| {
            ctx.message("handled").data("status", 200);
        })?;
    }
    http.log(&[tags::WARN], |ctx| {
        ctx.message("payload trimmed").data("body", "x".repeat(500));
    })?;

    db.flush()?;
    http.flush()?;

    println!("Registered loggers: {:?}", manager.logger_names());
    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");
    Ok(())
}
