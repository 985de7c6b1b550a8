//! Tags: the markers attached to every log call
//!
//! A tag is an immutable `(name, code, level)` triple. Tags drive both
//! filtering (see [`EnablementSet`](super::EnablementSet)) and the bracketed
//! prefix of every formatted message.

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Immutable marker with value-based identity.
///
/// # Example
///
/// ```
/// use taglog::{LogLevel, Tag};
///
/// const AUDIT: Tag = Tag::new("audit", 'a', LogLevel::Info);
/// assert_eq!(AUDIT, Tag::owned("audit", 'a', LogLevel::Info));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    name: Cow<'static, str>,
    code: char,
    level: LogLevel,
}

impl Tag {
    pub const fn new(name: &'static str, code: char, level: LogLevel) -> Self {
        Self {
            name: Cow::Borrowed(name),
            code,
            level,
        }
    }

    /// Build a tag whose name is only known at runtime (e.g. from configuration)
    pub fn owned(name: impl Into<String>, code: char, level: LogLevel) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            code,
            level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Single-character short code used in the message prefix
    pub fn code(&self) -> char {
        self.code
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.code)
    }
}

/// Highest level among `tags`, or `None` for an empty slice.
pub fn effective_level(tags: &[Tag]) -> Option<LogLevel> {
    tags.iter().map(Tag::level).max()
}

/// Short codes sorted ascending and concatenated, e.g. `"abc"` for `[b, a, c]`.
pub fn prefix_codes(tags: &[Tag]) -> String {
    let mut codes: Vec<char> = tags.iter().map(Tag::code).collect();
    codes.sort_unstable();
    codes.into_iter().collect()
}

/// Standard tag catalogue, one tag per level.
pub mod tags {
    use super::Tag;
    use crate::core::log_level::LogLevel;

    pub const TRACE: Tag = Tag::new("trace", 't', LogLevel::Trace);
    pub const DEBUG: Tag = Tag::new("debug", 'd', LogLevel::Debug);
    pub const INFO: Tag = Tag::new("info", 'i', LogLevel::Info);
    pub const WARN: Tag = Tag::new("warn", 'w', LogLevel::Warn);
    pub const ERROR: Tag = Tag::new("error", 'e', LogLevel::Error);
    pub const FATAL: Tag = Tag::new("fatal", 'f', LogLevel::Fatal);

    /// All standard tags, used as the default catalogue when resolving
    /// configured tag names.
    pub fn standard() -> Vec<Tag> {
        vec![TRACE, DEBUG, INFO, WARN, ERROR, FATAL]
    }
}
