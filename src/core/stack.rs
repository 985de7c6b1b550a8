//! Stack frames, capture-site resolution and frame cleanup
//!
//! Frames are captured with the `backtrace` crate at the moment of a logging
//! call. The resolver strips the logger's own frames from the leading end
//! (call-site direction); exception traces are trimmed of runtime noise from
//! the trailing end (deepest frames).

use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Frames of the logging facade itself, stripped from the leading end of a
/// capture-site stack.
pub const DEFAULT_FACADE_PREFIXES: &[&str] = &[
    "backtrace::",
    "taglog::core::stack",
    "taglog::core::logger",
    "taglog::core::scoped",
];

/// Runtime and thread-startup frames trimmed from the trailing end of
/// exception traces.
pub const DEFAULT_NOISE_PREFIXES: &[&str] = &[
    "std::rt",
    "std::panicking",
    "std::panic",
    "std::sys",
    "std::thread",
    "core::ops::function",
    "core::panic",
    "__rust_",
    "test::",
    "tokio::runtime",
    "start_thread",
    "__libc_start",
    "_start",
    "__clone",
    "clone3",
];

/// One frame of a captured stack; comparable, printable and otherwise opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackFrame {
    /// Fully qualified module/type path the function belongs to
    pub declaring_unit: String,
    pub function: String,
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
}

impl StackFrame {
    pub fn new(declaring_unit: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            declaring_unit: declaring_unit.into(),
            function: function.into(),
            file_name: None,
            line_number: None,
        }
    }

    #[must_use]
    pub fn at(mut self, file_name: impl Into<String>, line_number: u32) -> Self {
        self.file_name = Some(file_name.into());
        self.line_number = Some(line_number);
        self
    }

    /// Split a demangled symbol such as `app::db::Pool::get` into
    /// `("app::db::Pool", "get")`. Symbols without a path stay whole in the
    /// declaring unit.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.rfind("::") {
            Some(idx) => Self::new(&symbol[..idx], &symbol[idx + 2..]),
            None => Self::new(symbol, ""),
        }
    }

    /// `declaring_unit::function`, or just the unit when the function is empty
    pub fn qualified_name(&self) -> String {
        if self.function.is_empty() {
            self.declaring_unit.clone()
        } else {
            format!("{}::{}", self.declaring_unit, self.function)
        }
    }

    fn matches_any(&self, prefixes: &[String]) -> bool {
        prefixes.iter().any(|p| self.name_starts_with(p))
    }

    /// `qualified_name().trim_start_matches('<').starts_with(prefix)` without
    /// building the name.
    fn name_starts_with(&self, prefix: &str) -> bool {
        let unit = self.declaring_unit.trim_start_matches('<');
        let Some(rest) = prefix.strip_prefix(unit) else {
            return unit.starts_with(prefix);
        };
        if self.function.is_empty() {
            return rest.is_empty();
        }
        match rest.strip_prefix("::") {
            Some(function_prefix) => self.function.starts_with(function_prefix),
            None => "::".starts_with(rest),
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.qualified_name())?;
        match (&self.file_name, self.line_number) {
            (Some(file), Some(line)) => write!(f, "{}:{}", file, line)?,
            (Some(file), None) => write!(f, "{}", file)?,
            (None, _) => write!(f, "Unknown Source")?,
        }
        write!(f, ")")
    }
}

/// Frames of a logging call with its call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedStack {
    pub frames: Vec<StackFrame>,
    pub call_site_file: Option<String>,
    pub call_site_line: Option<u32>,
}

impl CapturedStack {
    /// Replace the call site with a `#[track_caller]` location.
    #[must_use]
    pub fn pinned_to(mut self, location: &Location<'_>) -> Self {
        self.call_site_file = Some(location.file().to_string());
        self.call_site_line = Some(location.line());
        self
    }
}

/// Cleans captured frame lists.
#[derive(Debug, Clone)]
pub struct StackResolver {
    facade_prefixes: Vec<String>,
    noise_prefixes: Vec<String>,
}

impl Default for StackResolver {
    fn default() -> Self {
        Self {
            facade_prefixes: DEFAULT_FACADE_PREFIXES.iter().map(|s| s.to_string()).collect(),
            noise_prefixes: DEFAULT_NOISE_PREFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StackResolver {
    pub fn new(facade_prefixes: Vec<String>, noise_prefixes: Vec<String>) -> Self {
        Self {
            facade_prefixes,
            noise_prefixes,
        }
    }

    pub fn noise_prefixes(&self) -> &[String] {
        &self.noise_prefixes
    }

    /// Drop leading facade frames; the first survivor is the call site.
    pub fn resolve(&self, raw: Vec<StackFrame>) -> CapturedStack {
        let skip = raw
            .iter()
            .take_while(|f| f.matches_any(&self.facade_prefixes))
            .count();
        let frames: Vec<StackFrame> = raw.into_iter().skip(skip).collect();

        let (call_site_file, call_site_line) = match frames.first() {
            Some(first) => (first.file_name.clone(), first.line_number),
            None => (None, None),
        };

        CapturedStack {
            frames,
            call_site_file,
            call_site_line,
        }
    }

    /// Capture the current thread's stack and resolve it.
    pub fn capture(&self) -> CapturedStack {
        self.resolve(capture_frames())
    }

    /// Drop trailing frames matching the noise denylist.
    pub fn trim_noise<'a>(&self, frames: &'a [StackFrame]) -> &'a [StackFrame] {
        let keep = frames.len()
            - frames
                .iter()
                .rev()
                .take_while(|f| f.matches_any(&self.noise_prefixes))
                .count();
        &frames[..keep]
    }
}

/// Walk the current stack, innermost frame first.
///
/// Inlined functions resolve to several symbols per frame; each becomes its
/// own [`StackFrame`]. Frames without symbol information are skipped.
pub fn capture_frames() -> Vec<StackFrame> {
    let mut frames = Vec::new();
    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            let Some(name) = symbol.name() else {
                return;
            };
            let mut resolved = StackFrame::from_symbol(&format!("{:#}", name));
            resolved.file_name = symbol
                .filename()
                .and_then(Path::file_name)
                .map(|f| f.to_string_lossy().into_owned());
            resolved.line_number = symbol.lineno();
            frames.push(resolved);
        });
        true
    });
    frames
}
