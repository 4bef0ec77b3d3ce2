//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "digest": "2cf24dba5fb0a30e...",
//!       "files": ["dir/a.txt", "dir/b.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 3,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 5,
//!     "skipped_files": 0,
//!     "scan_duration_ms": 2
//!   }
//! }
//! ```
//!
//! Paths are reported exactly as discovered, without normalization.

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, DuplicateIndex, ScanSummary};
use crate::scanner::FileDigest;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// SHA-256 digest as hexadecimal string (64 characters)
    pub digest: FileDigest,
    /// Paths in discovery order; the first one survives deletion
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            digest: group.digest,
            files: group
                .paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Number of files hashed
    pub total_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Number of redundant copies
    pub duplicate_files: usize,
    /// Bytes reclaimable by deleting redundant copies
    pub reclaimable_space: u64,
    /// Number of files that could not be hashed and were left out
    pub skipped_files: usize,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            total_files: summary.total_files,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            skipped_files: summary.skipped.len(),
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from an index and its scan summary.
    ///
    /// # Example
    ///
    /// ```
    /// use dupsweep::duplicates::{DuplicateIndex, ScanSummary};
    /// use dupsweep::output::json::JsonOutput;
    ///
    /// let output = JsonOutput::new(&DuplicateIndex::new(), &ScanSummary::default());
    /// assert!(output.duplicates.is_empty());
    /// ```
    #[must_use]
    pub fn new(index: &DuplicateIndex, summary: &ScanSummary) -> Self {
        Self {
            duplicates: index.iter().map(JsonDuplicateGroup::from).collect(),
            summary: JsonSummary::from(summary),
        }
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()
    }
}
