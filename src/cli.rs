//! Command-line interface definitions for dupsweep.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and choose an action interactively (default)
//! dupsweep ~/Downloads
//!
//! # Print the report without prompting, as JSON
//! dupsweep ~/Downloads --action print --format json
//!
//! # Delete redundant copies, hashing on four threads
//! dupsweep ~/Downloads --action delete -j 4
//!
//! # Verbose mode for debugging
//! dupsweep -v ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Find duplicate files by content and remove redundant copies.
///
/// dupsweep hashes every file below PATH with SHA-256, groups files with
/// identical content and then prints the groups or deletes all but the
/// first-discovered copy of each.
#[derive(Debug, Parser)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// What to do with the duplicates found
    #[arg(short, long, value_enum, default_value = "prompt")]
    pub action: ActionArg,

    /// Report format used by the print action
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Read block size for hashing (e.g., 64KiB, 1MB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_block_size)]
    pub block_size: Option<usize>,

    /// Descend into symbolically linked directories
    ///
    /// Warning: link cycles abort the scan.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Leave unreadable files out instead of aborting the scan
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Stop deleting at the first failure
    #[arg(long)]
    pub stop_on_error: bool,

    /// Number of hashing threads (default: 1)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

impl Cli {
    /// Configuration values given on the command line.
    ///
    /// Boolean flags only ever switch a setting on; leaving a flag out keeps
    /// whatever the config file or environment says.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            block_size: self.block_size,
            follow_symlinks: self.follow_symlinks.then_some(true),
            skip_unreadable: self.skip_unreadable.then_some(true),
            stop_on_error: self.stop_on_error.then_some(true),
            jobs: self.jobs.map(usize::from),
        }
    }
}

/// Action to take after a scan finds duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ActionArg {
    /// Ask on the terminal
    #[default]
    Prompt,
    /// Print the duplicate report
    Print,
    /// Delete all but the first copy of every group
    Delete,
}

/// Format of the printed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum FormatArg {
    /// Plain text, one path per line
    #[default]
    Text,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatArg::Text => write!(f, "text"),
            FormatArg::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupsweep::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

/// Parse a hashing block size: a [`parse_size`] value of at least one byte.
///
/// # Errors
///
/// Returns an error for unparsable, zero, or unaddressable sizes.
pub fn parse_block_size(s: &str) -> Result<usize, String> {
    let bytes = parse_size(s)?;
    if bytes == 0 {
        return Err("Block size must be at least 1 byte".to_string());
    }
    usize::try_from(bytes).map_err(|_| format!("Block size too large: {bytes}"))
}
