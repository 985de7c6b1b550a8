//! Basic usage example
//!
//! Demonstrates tag filtering, variables, scoped context and error chains.
//!
//! Run with: cargo run --example basic_usage

use std::sync::Arc;
use taglog::prelude::*;
use taglog::taglog;

#[derive(Debug)]
struct ConfigError {
    source: std::io::Error,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not read settings")
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn main() -> Result<()> {
    println!("=== taglog - Basic Usage Example ===\n");

    let sink = Arc::new(MemorySink::new());
    let logger = Logger::builder("demo")
        .enabled(EnablementSet::of([tags::INFO, tags::WARN, tags::ERROR]))
        .sink(sink.clone())
        .build()?;

    println!("1. Tagged messages (debug is disabled):");
    logger.log(&[tags::DEBUG], |ctx| {
        ctx.message("this callback never runs");
    })?;
    taglog!(logger, [tags::INFO], "service started"; port = 8080, tls = false)?;
    taglog!(logger, id = "req-17", [tags::WARN, tags::INFO], "slow request"; millis = 812.5)?;

    println!("2. Scoped context:");
    let request = logger.with_context(|ctx| {
        ctx.data("request", "GET /users").data("user", Some(42));
    });
    request.log(&[tags::INFO], |ctx| {
        ctx.message("authorised");
    })?;

    println!("3. Error chain:");
    let error = ConfigError {
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json missing"),
    };
    logger.log(&[tags::ERROR], |ctx| {
        ctx.message("startup failed").error(&error);
    })?;

    for (level, message) in sink.entries() {
        println!("{:>5} {}", level, message);
    }

    println!("\nEmitted {} messages, filtered {}", logger.metrics().emitted_count(), logger.metrics().filtered_count());
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
