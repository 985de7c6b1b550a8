//! Captured exceptions
//!
//! A [`CapturedException`] is an owned snapshot of an error: its type name,
//! message, frames, cause chain and suppressed siblings. It forms a tree; each
//! node exclusively owns its cause and suppressed children.

use super::render::DEFAULT_MAX_DEPTH;
use super::stack::StackFrame;
use std::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedException {
    pub type_name: String,
    pub message: Option<String>,
    pub frames: Vec<StackFrame>,
    pub cause: Option<Box<CapturedException>>,
    pub suppressed: Vec<CapturedException>,
}

impl CapturedException {
    pub fn new(type_name: impl Into<String>, message: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message,
            frames: Vec::new(),
            cause: None,
            suppressed: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_frames(mut self, frames: Vec<StackFrame>) -> Self {
        self.frames = frames;
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: CapturedException) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    #[must_use]
    pub fn with_suppressed(mut self, suppressed: CapturedException) -> Self {
        self.suppressed.push(suppressed);
        self
    }

    /// Snapshot an error and its `source()` chain.
    ///
    /// The root carries the concrete type name. Sources are only reachable as
    /// `dyn Error`: well-known std errors are named by their path, others by
    /// the leading identifier of their `Debug` output (the struct or variant
    /// name for derived impls). No frames are recorded; errors do not carry
    /// them.
    ///
    /// At most [`DEFAULT_MAX_DEPTH`] sources are followed, so a chain whose
    /// `source()` loops back on itself still terminates.
    pub fn of<E: Error + 'static>(error: &E) -> Self {
        let mut sources = Vec::new();
        let mut next = error.source();
        while let Some(source) = next {
            if sources.len() == DEFAULT_MAX_DEPTH {
                break;
            }
            sources.push(Self::new(source_type_name(source), Some(source.to_string())));
            next = source.source();
        }

        let mut root = Self::new(std::any::type_name::<E>(), Some(error.to_string()));
        root.cause = sources
            .into_iter()
            .rev()
            .fold(None, |cause: Option<Box<Self>>, mut node| {
                node.cause = cause;
                Some(Box::new(node))
            });
        root
    }

    /// Depth of the cause chain, this node included
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut cur = self.cause.as_deref();
        while let Some(c) = cur {
            len += 1;
            cur = c.cause.as_deref();
        }
        len
    }
}

fn source_type_name(error: &(dyn Error + 'static)) -> String {
    let known = if error.is::<std::io::Error>() {
        Some("std::io::Error")
    } else if error.is::<std::fmt::Error>() {
        Some("std::fmt::Error")
    } else if error.is::<std::num::ParseIntError>() {
        Some("std::num::ParseIntError")
    } else if error.is::<std::num::ParseFloatError>() {
        Some("std::num::ParseFloatError")
    } else if error.is::<std::str::Utf8Error>() {
        Some("std::str::Utf8Error")
    } else if error.is::<std::string::FromUtf8Error>() {
        Some("std::string::FromUtf8Error")
    } else {
        None
    };
    match known {
        Some(name) => name.to_string(),
        None => debug_type_name(error),
    }
}

fn debug_type_name(error: &dyn Error) -> String {
    let debug = format!("{:?}", error);
    let name: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if name.is_empty() {
        "dyn Error".to_string()
    } else {
        name
    }
}
