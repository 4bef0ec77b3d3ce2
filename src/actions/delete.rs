//! Permanent deletion of redundant duplicate copies.
//!
//! # Overview
//!
//! [`delete_duplicates`] consumes a [`DuplicateIndex`] and, for every group,
//! removes paths from the end of the group until a single path remains.
//! The first-discovered copy is therefore always the survivor and the
//! last-discovered copy is removed first.
//!
//! Deletion is permanent (`std::fs::remove_file`). A symbolic link is
//! removed itself; its target is left alone.
//!
//! # Failure policy
//!
//! By default a failed deletion is logged, recorded in
//! [`BatchDeleteResult::failures`] and processing moves on to the next path.
//! With [`DeleteConfig::continue_on_error`] turned off, the first failure
//! stops all remaining deletions. Survivors are never touched, so neither
//! policy can remove the last copy of a file.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::delete::{delete_duplicates, DeleteConfig};
//! use dupsweep::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let (index, _) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//! let result = delete_duplicates(index, &DeleteConfig::default());
//! println!("{}", result.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use thiserror::Error;

use crate::duplicates::DuplicateIndex;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path that could not be deleted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted entry in bytes.
    pub size: u64,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Results of a batch deletion operation.
#[derive(Debug, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions.
    pub failures: Vec<DeleteError>,
    /// Total bytes freed.
    pub bytes_freed: u64,
    /// Whether remaining deletions were abandoned after a failure.
    pub stopped_early: bool,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted deletions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        let freed = ByteSize::b(self.bytes_freed);
        if self.all_succeeded() {
            format!("Deleted {} file(s), freed {}", self.success_count(), freed)
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {}",
                self.success_count(),
                self.failure_count(),
                freed
            )
        }
    }
}

/// Configuration for deletion operations.
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    /// Continue on error (process remaining files even if some fail).
    pub continue_on_error: bool,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self {
            continue_on_error: true,
        }
    }
}

impl DeleteConfig {
    /// Enable/disable continue on error.
    #[must_use]
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `Io` for any other failure
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    // symlink_metadata so that dangling links can still be removed
    let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
    let size = metadata.len();

    fs::remove_file(path).map_err(|e| {
        log::error!("Delete failed for {}: {}", path.display(), e);
        DeleteError::from_io(path, e)
    })?;

    log::info!("Deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size))
}

/// Delete every redundant copy in `index`, keeping the first path of each
/// group.
///
/// Paths are removed from the end of each group until one remains.
pub fn delete_duplicates(index: DuplicateIndex, config: &DeleteConfig) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    'groups: for group in index {
        let mut paths = group.paths;
        while paths.len() > 1 {
            let Some(path) = paths.pop() else { break };

            match permanent_delete(&path) {
                Ok(deleted) => {
                    result.bytes_freed += deleted.size;
                    result.successes.push(deleted);
                }
                Err(e) => {
                    log::warn!("Failed to delete {}: {}", path.display(), e);
                    result.failures.push(e);

                    if !config.continue_on_error {
                        log::info!("Stopping deletion after first failure");
                        result.stopped_early = true;
                        break 'groups;
                    }
                }
            }
        }
        if let Some(survivor) = paths.first() {
            log::debug!("Kept {} (digest {})", survivor.display(), group.digest);
        }
    }

    log::debug!("{}", result.summary());

    result
}
