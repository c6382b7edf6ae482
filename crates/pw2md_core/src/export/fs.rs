//! Destination filesystem capability.
//!
//! # Responsibility
//! - Provide the directory/file primitives the export engine calls into.
//!
//! # Invariants
//! - `write_new` never replaces an existing file.
//! - A completed `write_new` is visible to the next `exists` probe.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Directory and file primitives used by the exporter.
pub trait ExportFs {
    /// Creates `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Returns whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Creates a new file at `path` holding `contents`.
    ///
    /// Fails with `AlreadyExists` if the path is taken.
    fn write_new(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// `ExportFs` backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ExportFs for LocalFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as taken.
        fs::symlink_metadata(path).is_ok()
    }

    fn write_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        file.write_all(contents)?;
        file.flush()
    }
}
