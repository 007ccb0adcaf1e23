//! Capability and descriptive tags
//!
//! The registry never interprets tags beyond set membership. Callers pass their
//! own tag container through [`TagQuery`].

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A hierarchical tag such as `"Ability.Crafting.Smithing"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the tag name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Membership query over a caller-owned tag container
pub trait TagQuery {
    /// Check whether the container holds `tag`
    fn has_tag(&self, tag: &str) -> bool;
}

/// Ordered set of tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Insert a tag, returning false if it was already present
    pub fn insert(&mut self, tag: impl Into<Tag>) -> bool {
        self.0.insert(tag.into())
    }

    /// Remove a tag
    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.remove(tag)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate tags in order
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    /// True if `other` holds at least one of these tags
    pub fn any_in<Q: TagQuery + ?Sized>(&self, other: &Q) -> bool {
        self.0.iter().any(|t| other.has_tag(t.as_str()))
    }

    /// True if `other` holds every one of these tags
    pub fn all_in<Q: TagQuery + ?Sized>(&self, other: &Q) -> bool {
        self.0.iter().all(|t| other.has_tag(t.as_str()))
    }

    /// True if this set holds at least one tag of `other`
    pub fn has_any(&self, other: &TagSet) -> bool {
        other.any_in(self)
    }

    /// True if this set holds every tag of `other`
    pub fn has_all(&self, other: &TagSet) -> bool {
        other.all_in(self)
    }
}

impl TagQuery for TagSet {
    fn has_tag(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }
}

impl TagQuery for HashSet<String> {
    fn has_tag(&self, tag: &str) -> bool {
        self.contains(tag)
    }
}

impl TagQuery for BTreeSet<String> {
    fn has_tag(&self, tag: &str) -> bool {
        self.contains(tag)
    }
}

impl TagQuery for [&str] {
    fn has_tag(&self, tag: &str) -> bool {
        self.iter().any(|t| *t == tag)
    }
}

impl<T: Into<Tag>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Tag>> Extend<T> for TagSet {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}
