//! File identity tracking.
//!
//! The same file can be reached under more than one path: a symbolic link
//! to a file, a followed link to a directory, or a hard link. Hashing each
//! of those paths yields the same digest, yet deleting any of them as a
//! "duplicate" would remove (or orphan) the only copy of the data.
//!
//! [`IdentityTracker`] remembers the first path seen for every
//! `(device, inode)` pair so later aliases can be folded into it.
//!
//! # Platform Support
//!
//! - **Unix**: uses `(st_dev, st_ino)` from metadata
//! - **Other**: identity is unknown and every path is treated as distinct

use std::collections::HashMap;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

/// Identity of the file a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    dev: u64,
    ino: u64,
}

impl FileId {
    /// Build an identity from metadata.
    ///
    /// Returns `None` where the platform does not expose inode numbers.
    #[cfg(unix)]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }

    /// Identity of the file at `path`, following symbolic links.
    #[must_use]
    pub fn of(path: &Path) -> Option<Self> {
        fs::metadata(path)
            .ok()
            .and_then(|metadata| Self::from_metadata(&metadata))
    }
}

/// Remembers the first path seen for each file identity.
#[derive(Debug, Default)]
pub struct IdentityTracker {
    seen: HashMap<FileId, PathBuf>,
}

impl IdentityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` under `id`.
    ///
    /// Returns the earlier path if this identity was already recorded, in
    /// which case `path` is an alias and is not stored.
    pub fn alias_of(&mut self, id: FileId, path: &Path) -> Option<&Path> {
        use std::collections::hash_map::Entry;
        match self.seen.entry(id) {
            Entry::Occupied(entry) => Some(entry.into_mut().as_path()),
            Entry::Vacant(entry) => {
                entry.insert(path.to_path_buf());
                None
            }
        }
    }

    /// Number of distinct identities recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
