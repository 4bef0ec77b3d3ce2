//! Duplicate groups and the digest-keyed duplicate index.
//!
//! # Overview
//!
//! A [`DuplicateIndex`] maps each [`FileDigest`] to the [`DuplicateGroup`] of
//! paths that hashed to it. It is built fresh for every scan:
//!
//! 1. created empty,
//! 2. filled with [`DuplicateIndex::insert`] in discovery order,
//! 3. filtered with [`DuplicateIndex::retain_duplicates`],
//! 4. consumed by a report or by deletion.
//!
//! Groups keep the order in which their digest was first seen, and paths
//! inside a group keep discovery order. The first path of a group is the
//! copy that survives deletion.
//!
//! # Example
//!
//! ```
//! use dupsweep::duplicates::DuplicateIndex;
//! use dupsweep::scanner::FileDigest;
//! use std::path::PathBuf;
//!
//! let same = FileDigest::from_bytes([1; 32]);
//! let other = FileDigest::from_bytes([2; 32]);
//!
//! let mut index = DuplicateIndex::new();
//! index.insert(same, PathBuf::from("a.txt"));
//! index.insert(other, PathBuf::from("c.txt"));
//! index.insert(same, PathBuf::from("b.txt"));
//! index.retain_duplicates();
//!
//! assert_eq!(index.len(), 1);
//! assert_eq!(index.get(&same).unwrap().paths, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::FileDigest;

/// Files whose contents hashed to the same digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// SHA-256 digest shared by every file in the group
    pub digest: FileDigest,
    /// Paths in discovery order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a group holding a single path.
    #[must_use]
    pub fn new(digest: FileDigest, path: PathBuf) -> Self {
        Self {
            digest,
            paths: vec![path],
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether the group holds more than one copy.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.paths.len() > 1
    }

    /// Number of redundant copies (total - 1 survivor).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// The copy kept by delete mode: the first one discovered.
    #[must_use]
    pub fn survivor(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }

    /// The copies removed by delete mode, in discovery order.
    #[must_use]
    pub fn redundant(&self) -> &[PathBuf] {
        self.paths.get(1..).unwrap_or(&[])
    }
}

/// Digest-keyed collection of duplicate groups in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    groups: Vec<DuplicateGroup>,
    positions: HashMap<FileDigest, usize>,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` under `digest`.
    ///
    /// Appends to the existing group for `digest`, or starts a new group
    /// after all existing ones.
    pub fn insert(&mut self, digest: FileDigest, path: PathBuf) {
        match self.positions.get(&digest) {
            Some(&pos) => self.groups[pos].paths.push(path),
            None => {
                self.positions.insert(digest, self.groups.len());
                self.groups.push(DuplicateGroup::new(digest, path));
            }
        }
    }

    /// Drop every group with fewer than two paths.
    ///
    /// Relative order of the remaining groups is preserved.
    pub fn retain_duplicates(&mut self) {
        let before = self.groups.len();
        self.groups.retain(DuplicateGroup::has_duplicates);
        self.positions = self
            .groups
            .iter()
            .enumerate()
            .map(|(pos, group)| (group.digest, pos))
            .collect();
        log::debug!(
            "Dropped {} unique digests, {} duplicate groups remain",
            before - self.groups.len(),
            self.groups.len()
        );
    }

    /// Look up the group for a digest.
    #[must_use]
    pub fn get(&self, digest: &FileDigest) -> Option<&DuplicateGroup> {
        self.positions.get(digest).map(|&pos| &self.groups[pos])
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the index holds no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over groups in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup> {
        self.groups.iter()
    }

    /// Groups as a slice, in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Total number of paths across all groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }

    /// Total number of redundant copies across all groups.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }

    /// Consume the index, yielding its groups in first-seen order.
    #[must_use]
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.groups
    }
}

impl<'a> IntoIterator for &'a DuplicateIndex {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl IntoIterator for DuplicateIndex {
    type Item = DuplicateGroup;
    type IntoIter = std::vec::IntoIter<DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
