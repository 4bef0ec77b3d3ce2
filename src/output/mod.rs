//! Output formatters for duplicate scan results.
//!
//! This module provides different output formats for scan results:
//! - Plain text, the interactive report
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::duplicates::DuplicateFinder;
//! use dupsweep::output::TextOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (index, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! TextOutput::new(&index).write_to(std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use text::{TextOutput, GROUP_DELIMITER, REPORT_HEADER};
