//! Per-logger enablement sets

use super::error::{LoggerError, Result};
use super::tag::Tag;
use std::collections::HashSet;

/// Set of tags a logger emits.
///
/// Loggers hold an immutable snapshot of this value and replace it as a whole,
/// so readers never see a half-updated set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnablementSet {
    /// Contains every tag
    #[default]
    All,
    /// Contains exactly these tags
    Explicit(HashSet<Tag>),
}

impl EnablementSet {
    /// An explicit set with no tags: nothing is emitted
    pub fn none() -> Self {
        EnablementSet::Explicit(HashSet::new())
    }

    pub fn of<I: IntoIterator<Item = Tag>>(tags: I) -> Self {
        EnablementSet::Explicit(tags.into_iter().collect())
    }

    /// Resolve tag names against a catalogue.
    ///
    /// `"all"` selects [`EnablementSet::All`] and must be the only name; any
    /// other name must be present in `catalogue`.
    pub fn from_names<S: AsRef<str>>(names: &[S], catalogue: &[Tag]) -> Result<Self> {
        if names.iter().any(|n| n.as_ref().eq_ignore_ascii_case("all")) {
            if names.len() == 1 {
                return Ok(EnablementSet::All);
            }
            return Err(LoggerError::config(
                "EnablementSet",
                "\"all\" cannot be combined with other tag names",
            ));
        }

        let mut enabled = HashSet::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let tag = catalogue
                .iter()
                .find(|t| t.name() == name)
                .ok_or_else(|| LoggerError::unknown_tag(name))?;
            enabled.insert(tag.clone());
        }
        Ok(EnablementSet::Explicit(enabled))
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        match self {
            EnablementSet::All => true,
            EnablementSet::Explicit(on) => on.contains(tag),
        }
    }

    /// True iff at least one of `tags` is enabled.
    pub fn any_enabled(&self, tags: &[Tag]) -> bool {
        match self {
            EnablementSet::All => true,
            EnablementSet::Explicit(on) => tags.iter().any(|t| on.contains(t)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tag::tags::{self, DEBUG, ERROR, INFO, WARN};

    #[test]
    fn test_all_contains_everything() {
        let set = EnablementSet::All;
        assert!(set.contains(&DEBUG));
        assert!(set.any_enabled(&[INFO]));
    }

    #[test]
    fn test_explicit_is_logical_or() {
        let set = EnablementSet::of([WARN]);
        assert!(!set.any_enabled(&[INFO]));
        assert!(set.any_enabled(&[INFO, WARN]));
        assert!(set.any_enabled(&[ERROR, DEBUG, WARN]));
        assert!(!set.any_enabled(&[ERROR, DEBUG]));
    }

    #[test]
    fn test_none_rejects_everything() {
        let set = EnablementSet::none();
        assert!(!set.any_enabled(&tags::standard()));
    }

    #[test]
    fn test_from_names() {
        let catalogue = tags::standard();
        let set = EnablementSet::from_names(&["info", "error"], &catalogue).unwrap();
        assert!(set.contains(&INFO));
        assert!(set.contains(&ERROR));
        assert!(!set.contains(&DEBUG));

        assert_eq!(
            EnablementSet::from_names(&["ALL"], &catalogue).unwrap(),
            EnablementSet::All
        );

        let err = EnablementSet::from_names(&["verbose"], &catalogue).unwrap_err();
        assert!(matches!(err, LoggerError::UnknownTag { .. }));
    }

    #[test]
    fn test_all_mixed_with_names_is_rejected() {
        let err = EnablementSet::from_names(&["info", "all"], &tags::standard()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("\"all\" cannot be combined"));
    }
}
