//! Duplicate finder: walk, hash, group.
//!
//! # Overview
//!
//! [`DuplicateFinder::find_duplicates`] runs the whole scan for one root
//! directory:
//!
//! 1. **Validate** the root (must exist and be a directory)
//! 2. **Walk** the tree in deterministic order (see [`crate::scanner::Walker`])
//! 3. **Hash** every discovered file with SHA-256
//! 4. **Group** paths by digest in discovery order, then drop unique digests
//!
//! # Failure policy
//!
//! A traversal error always aborts the scan. A file that cannot be hashed
//! aborts the scan too, unless [`FinderConfig::skip_unreadable`] is set, in
//! which case the file is left out and reported in
//! [`ScanSummary::skipped`]. An index with silently missing entries must
//! never drive deletion.
//!
//! # Aliases
//!
//! Paths that resolve to the same `(device, inode)` as an earlier path (a
//! symbolic link to a file, a file reached through a followed directory
//! link, a hard link) are folded into the first-discovered path. Only that
//! path enters the index, so deleting redundant copies never removes the
//! file a survivor refers to.
//!
//! # Parallel hashing
//!
//! With [`FinderConfig::jobs`] above 1, hashing runs on a dedicated rayon
//! pool. Results are collected in discovery order and merged sequentially,
//! so the resulting index is identical to a single-threaded scan. Without
//! `skip_unreadable`, the first failing file stops the remaining work.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_jobs(4));
//! let (index, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! println!("{} duplicate groups, {} redundant files", index.len(), summary.duplicate_files);
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::DuplicateIndex;
use crate::scanner::{
    FileDigest, FileId, HashError, Hasher, IdentityTracker, ScanError, Walker, WalkerConfig,
};

/// Digest of one file plus the identity it resolves to.
type Hashed = (FileDigest, Option<FileId>);

/// Configuration for a duplicate scan.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Directory traversal options.
    pub walker_config: WalkerConfig,
    /// Read block size for hashing, in bytes.
    pub block_size: usize,
    /// Number of hashing threads. 1 hashes on the calling thread.
    pub jobs: usize,
    /// Skip files that cannot be hashed instead of aborting the scan.
    pub skip_unreadable: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
            block_size: crate::scanner::DEFAULT_BLOCK_SIZE,
            jobs: 1,
            skip_unreadable: false,
        }
    }
}

impl FinderConfig {
    /// Set the directory traversal options.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the hashing block size (minimum 1).
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Set the number of hashing threads (minimum 1).
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Skip unreadable files instead of aborting.
    #[must_use]
    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of distinct files hashed successfully
    pub total_files: usize,
    /// Paths left out because they resolve to an already indexed file
    pub aliases: usize,
    /// Number of duplicate groups found
    pub duplicate_groups: usize,
    /// Number of redundant copies (excluding one survivor per group)
    pub duplicate_files: usize,
    /// Bytes that deleting every redundant copy would free
    pub reclaimable_space: u64,
    /// Files left out because they could not be hashed
    pub skipped: Vec<HashError>,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Whether any file was left out of the index.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        bytesize::ByteSize::b(self.reclaimable_space).to_string()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory traversal failed.
    #[error("Scan aborted: {0}")]
    Scan(#[from] ScanError),

    /// A file could not be hashed.
    #[error("Scan aborted: {0}")]
    Hash(#[from] HashError),
}

impl FinderError {
    /// Whether the error concerns the scan root itself.
    #[must_use]
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::NotADirectory(_))
    }
}

/// Duplicate finder that walks, hashes and groups one directory tree.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::new().with_block_size(config.block_size);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under `path`.
    ///
    /// Returns an index holding only groups with two or more paths, along
    /// with summary statistics.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist or is not a directory (nothing is read)
    /// - Directory traversal fails
    /// - A file cannot be hashed and `skip_unreadable` is off
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(DuplicateIndex, ScanSummary), FinderError> {
        let start_time = Instant::now();

        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }

        log::info!("Starting duplicate scan of {}", path.display());

        let walker = Walker::new(path, self.config.walker_config.clone());
        let files = walker.walk().collect::<Result<Vec<PathBuf>, ScanError>>()?;
        log::debug!("Discovered {} files", files.len());

        let mut summary = ScanSummary::default();
        let mut index = if self.config.jobs > 1 {
            self.hash_parallel(files, &mut summary)?
        } else {
            let results = files.into_iter().map(|file| self.hash_one(file));
            self.merge(results, &mut summary)?
        };

        index.retain_duplicates();

        summary.duplicate_groups = index.len();
        summary.duplicate_files = index.duplicate_count();
        summary.reclaimable_space = reclaimable_space(&index);
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} files hashed, {} duplicate groups, {} redundant files in {:.2?}",
            summary.total_files,
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.scan_duration
        );

        Ok((index, summary))
    }

    /// Hash one file and resolve its identity.
    fn hash_one(&self, file: PathBuf) -> (PathBuf, Result<Hashed, HashError>) {
        let hashed = self
            .hasher
            .hash_file(&file)
            .map(|digest| (digest, FileId::of(&file)));
        (file, hashed)
    }

    /// Hash on a dedicated pool, then merge in discovery order.
    fn hash_parallel(
        &self,
        files: Vec<PathBuf>,
        summary: &mut ScanSummary,
    ) -> Result<DuplicateIndex, FinderError> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                log::warn!("Failed to create hashing thread pool, hashing sequentially: {}", e);
                let results = files.into_iter().map(|file| self.hash_one(file));
                return self.merge(results, summary);
            }
        };

        log::debug!("Hashing {} files on {} threads", files.len(), self.config.jobs);

        if self.config.skip_unreadable {
            let results: Vec<(PathBuf, Result<Hashed, HashError>)> = pool.install(|| {
                files
                    .into_par_iter()
                    .map(|file| self.hash_one(file))
                    .collect()
            });
            return self.merge(results.into_iter(), summary);
        }

        // Collecting into a Result stops scheduling new files once one fails.
        let hashed = pool
            .install(|| {
                files
                    .into_par_iter()
                    .map(|file| {
                        let (file, result) = self.hash_one(file);
                        result.map(|hashed| (file, hashed))
                    })
                    .collect::<Result<Vec<(PathBuf, Hashed)>, HashError>>()
            })
            .map_err(|e| {
                log::error!("Failed to hash {}: {}", e.path().display(), e);
                FinderError::Hash(e)
            })?;

        self.merge(hashed.into_iter().map(|(file, h)| (file, Ok(h))), summary)
    }

    /// Fold hashing results into an index, applying the failure policy and
    /// dropping aliases of already indexed files.
    fn merge<I>(&self, results: I, summary: &mut ScanSummary) -> Result<DuplicateIndex, FinderError>
    where
        I: Iterator<Item = (PathBuf, Result<Hashed, HashError>)>,
    {
        let mut index = DuplicateIndex::new();
        let mut identities = IdentityTracker::new();
        for (file, result) in results {
            match result {
                Ok((digest, id)) => {
                    let alias_of = match id {
                        Some(id) => identities.alias_of(id, &file),
                        None => None,
                    };
                    if let Some(first) = alias_of {
                        log::debug!(
                            "Skipping {}: same file as {}",
                            file.display(),
                            first.display()
                        );
                        summary.aliases += 1;
                        continue;
                    }
                    summary.total_files += 1;
                    index.insert(digest, file);
                }
                Err(e) if self.config.skip_unreadable => {
                    log::warn!("Skipping unreadable file: {}", e);
                    summary.skipped.push(e);
                }
                Err(e) => {
                    log::error!("Failed to hash {}: {}", file.display(), e);
                    return Err(FinderError::Hash(e));
                }
            }
        }
        Ok(index)
    }
}

/// Bytes held by redundant copies, using each group's survivor size.
fn reclaimable_space(index: &DuplicateIndex) -> u64 {
    index
        .iter()
        .map(|group| {
            let size = group
                .survivor()
                .and_then(|p| std::fs::metadata(p).ok())
                .map_or(0, |m| m.len());
            size * group.duplicate_count() as u64
        })
        .sum()
}
