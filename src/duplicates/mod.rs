//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Digest-keyed grouping of file paths ([`groups`])
//! - The scan pipeline: walk, hash, group ([`finder`])

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{DuplicateGroup, DuplicateIndex};
