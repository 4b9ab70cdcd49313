//! Tag handling.
//!
//! Tags are free text, entered as a comma-separated string (`-t "code, review"`).
//! Before anything is written they are brought into canonical form by
//! [`normalize`]:
//!
//! - split on commas
//! - trim each token, drop empty ones
//! - deduplicate (case-sensitive)
//! - sort ascending (byte order)
//! - join with a single comma
//!
//! On the read side a [`TagFilter`] selects prompts by tag. A filter matches
//! either any of its tags ([`TagMatch::Any`], the default) or all of them
//! ([`TagMatch::All`]). On the command line, the `AND:` prefix selects the
//! latter: `AND:code,review`.

use crate::model::Prompt;
use std::collections::BTreeSet;
use std::fmt;

/// Prefix that switches a textual filter to [`TagMatch::All`].
pub const AND_PREFIX: &str = "AND:";

/// Splits, trims and deduplicates a comma-separated tag string.
pub fn tag_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the canonical form of a comma-separated tag string.
///
/// Total over all inputs; a string made only of commas and whitespace
/// normalizes to `""`.
///
/// ```
/// use p::tags::normalize;
///
/// assert_eq!(normalize(" b , a,,b "), "a,b");
/// assert_eq!(normalize(" , ,"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    tag_set(raw).into_iter().collect::<Vec<_>>().join(",")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMatch {
    /// Prompt carries at least one of the filter tags.
    #[default]
    Any,
    /// Prompt carries every filter tag.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagFilter {
    pub mode: TagMatch,
    pub tags: BTreeSet<String>,
}

impl TagFilter {
    pub fn new(mode: TagMatch, raw_tags: &str) -> Self {
        Self {
            mode,
            tags: tag_set(raw_tags),
        }
    }

    pub fn any(raw_tags: &str) -> Self {
        Self::new(TagMatch::Any, raw_tags)
    }

    pub fn all(raw_tags: &str) -> Self {
        Self::new(TagMatch::All, raw_tags)
    }

    /// Parses the textual filter syntax: `tag1,tag2` or `AND:tag1,tag2`.
    pub fn parse(expr: &str) -> Self {
        match expr.trim_start().strip_prefix(AND_PREFIX) {
            Some(rest) => Self::all(rest),
            None => Self::any(expr),
        }
    }

    /// A filter without tags lets everything through.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn matches(&self, prompt: &Prompt) -> bool {
        if self.is_empty() {
            return true;
        }

        let prompt_tags = tag_set(&prompt.tags);
        if prompt_tags.is_empty() {
            return false;
        }

        match self.mode {
            TagMatch::Any => self.tags.iter().any(|t| prompt_tags.contains(t)),
            TagMatch::All => self.tags.is_subset(&prompt_tags),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.tags.iter().cloned().collect::<Vec<_>>().join(",");
        match self.mode {
            TagMatch::Any => write!(f, "{}", joined),
            TagMatch::All => write!(f, "{}{}", AND_PREFIX, joined),
        }
    }
}
