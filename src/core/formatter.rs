//! Message formatting
//!
//! Layout of a formatted message, fields separated by single spaces:
//!
//! ```text
//! [<codes>] <file>:<line> [<id> ][(<description>) ][<name>=<value> ...]
//! <exception chain>
//! ```

use super::context::Value;
use super::escape::{escape_quoted, DEFAULT_VALUE_LIMIT};
use super::record::LogRecord;
use super::render::{ExceptionRenderer, LINE_SEPARATOR};
use super::tag::prefix_codes;
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct MessageFormatter {
    renderer: ExceptionRenderer,
    value_limit: usize,
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(ExceptionRenderer::default(), DEFAULT_VALUE_LIMIT)
    }
}

impl MessageFormatter {
    pub fn new(renderer: ExceptionRenderer, value_limit: usize) -> Self {
        Self {
            renderer,
            value_limit,
        }
    }

    pub fn format(&self, record: &LogRecord<'_>) -> String {
        let mut out = String::with_capacity(128);

        out.push('[');
        out.push_str(&prefix_codes(record.tags));
        out.push_str("] ");

        write_optional(&mut out, record.stack.call_site_file.as_deref());
        out.push(':');
        write_optional(&mut out, record.stack.call_site_line);
        out.push(' ');

        if let Some(id) = record.correlation_id {
            out.push_str(id);
            out.push(' ');
        }

        if let Some(description) = record.description() {
            out.push('(');
            out.push_str(description);
            out.push_str(") ");
        }

        for (name, value) in record.context.variables() {
            out.push_str(name);
            out.push('=');
            self.write_value(&mut out, value);
            out.push(' ');
        }

        for exception in record.context.exceptions() {
            out.push_str(LINE_SEPARATOR);
            self.renderer.render(&mut out, exception);
        }

        out
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        match value {
            Value::Str(s) => {
                out.push('"');
                out.push_str(&escape_quoted(s, self.value_limit));
                out.push('"');
            }
            other => {
                let _ = write!(out, "{}", other);
            }
        }
    }
}

fn write_optional<T: std::fmt::Display>(out: &mut String, value: Option<T>) {
    match value {
        Some(v) => {
            let _ = write!(out, "{}", v);
        }
        None => out.push_str("null"),
    }
}
