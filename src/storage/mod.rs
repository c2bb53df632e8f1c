//! Flat-file persistence for event and feature tables
//!
//! # Overview
//!
//! - **event_table**: header-based reader and writer for door-access logs
//! - **feature_table**: writer for reconstructed episode records
//!
//! Both tables use comma-delimited text with a header line, `YYYY-MM-DD HH:MM:SS`
//! timestamps and `1`/`0` flags.

pub mod event_table;
pub mod feature_table;

// Re-export all public types for convenience
pub use event_table::*;
pub use feature_table::*;

use std::fs;
use std::io;
use std::path::Path;

/// Create the parent directory of an output path if it is missing
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
