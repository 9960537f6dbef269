//! Repository coordinates and directory entries.
//!
//! - `RepositoryCoordinate`: owner/name/ref triple identifying one snapshot
//! - `DirectoryEntry`: one child returned by a listing call
//! - `EntryKind`: file, directory, or a kind the crawler does not follow

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryCoordinate {
    pub owner: String,
    pub name: String,
    /// Commit hash, branch or tag.
    pub reference: String,
}

impl RepositoryCoordinate {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            reference: reference.into(),
        }
    }
}

impl fmt::Display for RepositoryCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.reference)
    }
}

/// Decoded straight from the contents API; fields the crawler does not use
/// (sha, size, urls) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    /// Full path from the repository root.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
        }
    }

    pub fn file(path: &str) -> Self {
        Self::new(base_name(path), path, EntryKind::File)
    }

    pub fn dir(path: &str) -> Self {
        Self::new(base_name(path), path, EntryKind::Directory)
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    #[serde(rename = "dir")]
    Directory,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// Matching paths from one crawl. Duplicate-free; iteration is sorted.
pub type ResultSet = BTreeSet<String>;
