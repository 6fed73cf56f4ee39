//! Deprecation versions and their derived removal version

use crate::error::{DeprecationError, DeprecationResult};
use std::fmt;

/// `since` as supplied, plus the major release that removes the symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPair {
    since: String,
    removed_in: String,
}

impl VersionPair {
    /// Parse a version such as `3.0` or `3.3`
    ///
    /// The text is kept verbatim. The removal version is always the next
    /// whole major: 3.0 and 3.9 both map to 4.0.
    pub fn parse(text: &str) -> DeprecationResult<Self> {
        let major = text
            .split('.')
            .next()
            .filter(|m| !m.is_empty() && m.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|m| m.parse::<u64>().ok())
            .ok_or_else(|| DeprecationError::invalid_version(text))?;

        let next = major
            .checked_add(1)
            .ok_or_else(|| DeprecationError::invalid_version(text))?;

        Ok(Self {
            since: text.to_string(),
            removed_in: format!("{}.0", next),
        })
    }

    /// Absent and empty versions mean "no version"
    pub fn parse_optional(text: Option<&str>) -> DeprecationResult<Option<Self>> {
        match text {
            Some(t) if !t.is_empty() => Self::parse(t).map(Some),
            _ => Ok(None),
        }
    }

    pub fn since(&self) -> &str {
        &self.since
    }

    pub fn removed_in(&self) -> &str {
        &self.removed_in
    }
}

impl fmt::Display for VersionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "since {} and will be removed in {}",
            self.since, self.removed_in
        )
    }
}
