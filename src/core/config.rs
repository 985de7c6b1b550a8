//! Logger configuration
//!
//! Configuration is plain serde data, usually loaded from JSON:
//!
//! ```
//! use taglog::LoggerConfig;
//!
//! let config = LoggerConfig::from_json_str(r#"{ "enabled": ["info", "warn"], "value_limit": 64 }"#)
//!     .unwrap();
//! assert_eq!(config.value_limit, 64);
//! ```

use super::enablement::EnablementSet;
use super::error::{LoggerError, Result};
use super::escape::DEFAULT_VALUE_LIMIT;
use super::formatter::MessageFormatter;
use super::render::{ExceptionRenderer, DEFAULT_MAX_DEPTH};
use super::stack::{StackResolver, DEFAULT_FACADE_PREFIXES, DEFAULT_NOISE_PREFIXES};
use super::tag::Tag;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which tags a new logger starts with: the keyword `"all"` or a list of tag
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnabledTags {
    Keyword(String),
    Names(Vec<String>),
}

impl Default for EnabledTags {
    fn default() -> Self {
        EnabledTags::Keyword("all".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: EnabledTags,
    /// Longest string value written into a message
    pub value_limit: usize,
    /// Trailing exception frames to hide
    pub noise_prefixes: Vec<String>,
    /// Leading capture-site frames belonging to the logger
    pub facade_prefixes: Vec<String>,
    pub max_exception_depth: usize,
    /// Walk the stack on every emitted call. The call site is always known
    /// through `#[track_caller]`; this only fills `CapturedStack::frames`.
    pub capture_frames: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: EnabledTags::default(),
            value_limit: DEFAULT_VALUE_LIMIT,
            noise_prefixes: DEFAULT_NOISE_PREFIXES.iter().map(|s| s.to_string()).collect(),
            facade_prefixes: DEFAULT_FACADE_PREFIXES.iter().map(|s| s.to_string()).collect(),
            max_exception_depth: DEFAULT_MAX_DEPTH,
            capture_frames: false,
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                path.display().to_string(),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.value_limit == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "value_limit must be greater than zero",
            ));
        }
        if let EnabledTags::Keyword(keyword) = &self.enabled {
            if !keyword.eq_ignore_ascii_case("all") && !keyword.eq_ignore_ascii_case("none") {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    format!("enabled must be \"all\", \"none\" or a list of tags, got \"{}\"", keyword),
                ));
            }
        }
        Ok(())
    }

    /// Resolve `enabled` against a tag catalogue.
    pub fn enablement(&self, catalogue: &[Tag]) -> Result<EnablementSet> {
        match &self.enabled {
            EnabledTags::Keyword(k) if k.eq_ignore_ascii_case("none") => Ok(EnablementSet::none()),
            EnabledTags::Keyword(k) => EnablementSet::from_names(&[k.as_str()], catalogue),
            EnabledTags::Names(names) => EnablementSet::from_names(names, catalogue),
        }
    }

    pub fn resolver(&self) -> StackResolver {
        StackResolver::new(self.facade_prefixes.clone(), self.noise_prefixes.clone())
    }

    pub fn formatter(&self) -> MessageFormatter {
        MessageFormatter::new(
            ExceptionRenderer::new(self.resolver(), self.max_exception_depth),
            self.value_limit,
        )
    }
}
