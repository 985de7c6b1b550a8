//! Per-call context populated by the caller's callback
//!
//! This module provides:
//! - `Value`: typed value of a context variable
//! - `LogContext`: description, ordered variables and captured exceptions of
//!   a single log call

use super::exception::CapturedException;
use std::error::Error;
use std::fmt;
use uuid::Uuid;

/// Value type for context variables
///
/// Finite floats render in Rust's shortest round-trip form (`1.0`, `1e20`);
/// non-finite ones as `NaN`, `Infinity` and `-Infinity`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Uuid(Uuid),
    Str(String),
    /// No value was supplied
    Absent,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) if fl.is_nan() => write!(f, "NaN"),
            Value::Float(fl) if fl.is_infinite() => {
                write!(f, "{}", if *fl > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::Uuid(u) => write!(f, "{}", u),
            Value::Str(s) => write!(f, "{}", s),
            Value::Absent => write!(f, "null"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

/// Accumulator handed by `&mut` to the population callback of one log call.
///
/// A fresh context is created for every emitted call and dropped once the
/// message is formatted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    description: Option<String>,
    variables: Vec<(String, Value)>,
    exceptions: Vec<CapturedException>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) the description
    pub fn message(&mut self, msg: impl Into<String>) -> &mut Self {
        self.description = Some(msg.into());
        self
    }

    /// Append a variable; duplicate names are kept in order.
    pub fn data(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.variables.push((name.into(), value.into()));
        self
    }

    pub fn exception(&mut self, exception: CapturedException) -> &mut Self {
        self.exceptions.push(exception);
        self
    }

    /// Capture an error and its source chain
    pub fn error<E: Error + 'static>(&mut self, error: &E) -> &mut Self {
        self.exception(CapturedException::of(error))
    }

    /// Copy `parent`'s description, variables and exceptions in as a prefix.
    pub fn inherit(&mut self, parent: &LogContext) -> &mut Self {
        self.description = parent.description.clone();
        self.variables.extend(parent.variables.iter().cloned());
        self.exceptions.extend(parent.exceptions.iter().cloned());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn variables(&self) -> &[(String, Value)] {
        &self.variables
    }

    pub fn exceptions(&self) -> &[CapturedException] {
        &self.exceptions
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.variables.is_empty() && self.exceptions.is_empty()
    }
}
