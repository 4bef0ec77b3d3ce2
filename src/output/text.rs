//! Plain-text duplicate report.
//!
//! The report starts with a header line and a delimiter, then lists each
//! group's paths one per line, closing every group with the delimiter:
//!
//! ```text
//! The following files are identical:
//! --------------------
//! ./photos/a.jpg
//! ./backup/a.jpg
//! --------------------
//! ./notes.txt
//! ./old/notes.txt
//! --------------------
//! ```

use std::io::{self, Write};

use crate::duplicates::DuplicateIndex;

/// Header printed before the first group.
pub const REPORT_HEADER: &str = "The following files are identical:";

/// Delimiter printed before the first group and after every group.
pub const GROUP_DELIMITER: &str = "--------------------";

/// Text formatter for a duplicate index.
#[derive(Debug)]
pub struct TextOutput<'a> {
    index: &'a DuplicateIndex,
}

impl<'a> TextOutput<'a> {
    /// Create a formatter over `index`.
    #[must_use]
    pub fn new(index: &'a DuplicateIndex) -> Self {
        Self { index }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{REPORT_HEADER}")?;
        writeln!(writer, "{GROUP_DELIMITER}")?;
        for group in self.index {
            for path in &group.paths {
                writeln!(writer, "{}", path.display())?;
            }
            writeln!(writer, "{GROUP_DELIMITER}")?;
        }
        writer.flush()
    }
}
