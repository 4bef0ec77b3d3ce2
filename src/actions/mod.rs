//! File actions module.
//!
//! # Deletion
//!
//! The delete module removes redundant copies from a duplicate index:
//! - Permanent deletion, no trash
//! - The first-discovered copy of each group always survives
//! - Explicit failure policy (continue, or stop at the first failure)
//!
//! ```no_run
//! use dupsweep::actions::delete::permanent_delete;
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/path/to/duplicate.txt");
//! let result = permanent_delete(&path);
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_duplicates, permanent_delete, BatchDeleteResult, DeleteConfig, DeleteError,
    DeleteResult,
};
