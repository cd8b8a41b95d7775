//! User records and group membership.
//!
//! A group export file holds a JSON array of user objects. Each file maps to
//! one [`GroupSource`]: the [`GroupTag`] taken from its file name plus the
//! decoded [`UserRecord`]s. [`merge::merge_groups`] folds the sources into
//! deduplicated [`MergedUser`]s.

/// Group-file merger
pub mod merge;

/// Group file discovery and decoding
pub mod source;

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// One user entry of a group export, kept as the open-ended JSON object.
///
/// Unknown fields are preserved; typed accessors cover the fields the
/// export reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Wraps a decoded JSON object
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field lookup
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The user identifier, when present and a string
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// First element of a multi-valued entry of the nested `attributes` object
    ///
    /// Returns `None` when `attributes`, the named entry, or its first element
    /// is missing, or when the entry is not a list.
    #[must_use]
    pub fn first_attribute(&self, name: &str) -> Option<&Value> {
        self.0
            .get("attributes")
            .and_then(Value::as_object)
            .and_then(|attributes| attributes.get(name))
            .and_then(Value::as_array)
            .and_then(|values| values.first())
    }
}

/// Name of the group a file's users belong to (the file name without its
/// extension)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupTag(String);

impl GroupTag {
    /// Creates a tag from a group name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derives the tag from a file path, `admins.json` becoming `admins`
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_stem()
            .map(|stem| Self(stem.to_string_lossy().into_owned()))
    }

    /// The group name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The users listed in one group export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSource {
    /// Group the users belong to
    pub tag: GroupTag,
    /// Users in file order
    pub users: Vec<UserRecord>,
}

impl GroupSource {
    /// Creates a source from a tag and its users
    #[must_use]
    pub fn new(tag: impl Into<GroupTag>, users: Vec<UserRecord>) -> Self {
        Self {
            tag: tag.into(),
            users,
        }
    }
}

/// A deduplicated user with every group it was seen in.
///
/// The record is the first occurrence of the user; the group list is never
/// empty, holds no duplicates, and keeps first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedUser {
    /// Attributes from the first occurrence
    record: UserRecord,
    /// Groups in first-seen order
    groups: Vec<GroupTag>,
}

impl MergedUser {
    /// Starts a merged user from its first sighting
    #[must_use]
    pub fn new(record: UserRecord, group: GroupTag) -> Self {
        Self {
            record,
            groups: vec![group],
        }
    }

    /// Records membership in another group.
    ///
    /// Returns `false` when the user was already tagged with `group`.
    pub fn add_group(&mut self, group: &GroupTag) -> bool {
        if self.groups.contains(group) {
            return false;
        }
        self.groups.push(group.clone());
        true
    }

    /// The user's attributes
    #[must_use]
    pub const fn record(&self) -> &UserRecord {
        &self.record
    }

    /// Groups in first-seen order
    #[must_use]
    pub fn groups(&self) -> &[GroupTag] {
        &self.groups
    }

    /// Groups joined with `separator`
    #[must_use]
    pub fn groups_joined(&self, separator: &str) -> String {
        self.groups
            .iter()
            .map(GroupTag::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// The user identifier
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.record.id()
    }
}
