//! Part-of-speech tag classes
//!
//! A [`TagClass`] is a prefix predicate over Penn Treebank style tags:
//! `"NN"` matches `NN`, `NNS`, `NNP`, `NNPS`; `"J"` matches every adjective.
//! The empty prefix is the wildcard and matches every tag, including the
//! empty one. A set of prefixes matches when any member does.
//!
//! Matching is ASCII case-insensitive: `"nn"` matches `NNS`, but non-ASCII
//! letters must match exactly. Penn tags are plain ASCII.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Label rendered for the wildcard class in feature names
pub const WILDCARD_LABEL: &str = "ALL";

/// Separator used when rendering a multi-prefix class as a label
pub const UNION_SEPARATOR: &str = "+";

/// A POS prefix, or a union of prefixes.
///
/// Serialized as a bare string (`"NN"`) or an array (`["VB", "RB"]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagClass {
    Prefix(String),
    AnyOf(SmallVec<[String; 4]>),
}

impl TagClass {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        TagClass::Prefix(prefix.into())
    }

    pub fn any_of<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagClass::AnyOf(prefixes.into_iter().map(Into::into).collect())
    }

    /// The class matching every tag
    pub fn wildcard() -> Self {
        TagClass::Prefix(String::new())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, TagClass::Prefix(p) if p.is_empty())
    }

    /// Does `tag` belong to this class?
    #[inline]
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            TagClass::Prefix(prefix) => starts_with_ignore_case(tag, prefix),
            TagClass::AnyOf(prefixes) => prefixes
                .iter()
                .any(|prefix| starts_with_ignore_case(tag, prefix)),
        }
    }

    /// Deterministic label used in feature names
    pub fn label(&self) -> String {
        match self {
            TagClass::Prefix(prefix) if prefix.is_empty() => WILDCARD_LABEL.to_string(),
            TagClass::Prefix(prefix) => prefix.clone(),
            TagClass::AnyOf(prefixes) => prefixes
                .iter()
                .map(|p| if p.is_empty() { WILDCARD_LABEL } else { p.as_str() })
                .collect::<Vec<_>>()
                .join(UNION_SEPARATOR),
        }
    }
}

impl Default for TagClass {
    fn default() -> Self {
        TagClass::wildcard()
    }
}

impl From<&str> for TagClass {
    fn from(prefix: &str) -> Self {
        TagClass::prefix(prefix)
    }
}

impl<const N: usize> From<[&str; N]> for TagClass {
    fn from(prefixes: [&str; N]) -> Self {
        TagClass::any_of(prefixes)
    }
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Free-function form of [`TagClass::matches`]
#[inline]
pub fn matches(tag: &str, class: &TagClass) -> bool {
    class.matches(tag)
}

/// ASCII case-insensitive `tag.starts_with(prefix)`; never panics
#[inline]
fn starts_with_ignore_case(tag: &str, prefix: &str) -> bool {
    tag.len() >= prefix.len()
        && tag.is_char_boundary(prefix.len())
        && tag[..prefix.len()].eq_ignore_ascii_case(prefix)
}
