//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding the path of every file that should be hashed.
//! Children of each directory are visited in file-name order, so two walks
//! of an unchanged tree yield exactly the same sequence.
//!
//! # Entry policy
//!
//! - Regular files are yielded.
//! - Directories are descended into, never yielded.
//! - A symbolic link to a regular file is yielded (it hashes as its target).
//! - A symbolic link to a directory is skipped unless
//!   [`WalkerConfig::follow_symlinks`] is set, in which case it is descended.
//! - A dangling symbolic link is yielded, so hashing it reports the problem.
//! - FIFOs, sockets and device nodes are skipped.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{ScanError, WalkerConfig};

/// Directory walker for sequential, deterministic file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// Yielded paths are `root` joined with each entry's relative path, so a
    /// relative root produces paths relative to the working directory.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree, yielding file paths in discovery order.
    ///
    /// Traversal errors are yielded as [`ScanError`] values; the caller
    /// decides whether to stop.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.classify(entry).map(Ok),
                Err(e) => Some(Err(self.convert_error(e))),
            })
    }

    /// Decide whether an entry is a file to hash.
    fn classify(&self, entry: DirEntry) -> Option<PathBuf> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return None;
        }

        if file_type.is_file() {
            return Some(entry.into_path());
        }

        if file_type.is_symlink() {
            // Only reached when links are not followed.
            return match std::fs::metadata(entry.path()) {
                Ok(target) if target.is_dir() => {
                    log::trace!("Skipping link to directory: {}", entry.path().display());
                    None
                }
                Ok(target) if !target.is_file() => {
                    log::debug!("Skipping link to special file: {}", entry.path().display());
                    None
                }
                Ok(_) => Some(entry.into_path()),
                Err(e) => {
                    log::debug!("Unresolvable link {}: {}", entry.path().display(), e);
                    Some(entry.into_path())
                }
            };
        }

        log::debug!("Skipping special file: {}", entry.path().display());
        None
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn convert_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            log::warn!(
                "Symbolic link loop at {} (ancestor {})",
                path.display(),
                ancestor.display()
            );
            return ScanError::SymlinkLoop {
                ancestor: ancestor.to_path_buf(),
                path,
            };
        }

        log::warn!("Walker error for {}: {}", path.display(), error);
        match error.into_io_error() {
            Some(io_error) => ScanError::from_io(&path, io_error),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("directory traversal failed"),
            },
        }
    }
}
