//! Export configuration.
//!
//! # Responsibility
//! - Carry run options explicitly into the export engine.
//! - Derive defaults that depend on the source location.
//!
//! # Invariants
//! - `rank_window` is positive; the default keeps output compatible with
//!   earlier exports.

use std::path::{Path, PathBuf};

/// Width of the implicit category rank window.
pub const DEFAULT_RANK_WINDOW: i64 = 9999;
/// Folder metadata file written into each folder directory.
pub const DEFAULT_META_FILE_NAME: &str = "meta.json";
/// Export root used when the source path has no usable file stem.
pub const FALLBACK_EXPORT_ROOT: &str = "purewriter_export";

/// Options for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Prefix each article with a `create`/`update` header block.
    pub with_timestamps: bool,
    /// Articles with `0 <= rank - category.rank < rank_window` fall into a category.
    pub rank_window: i64,
    /// File name of the per-folder metadata document.
    pub meta_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            with_timestamps: false,
            rank_window: DEFAULT_RANK_WINDOW,
            meta_file_name: DEFAULT_META_FILE_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    /// Returns a copy with the timestamp header toggled.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.with_timestamps = enabled;
        self
    }

    /// Returns a copy with a custom rank window.
    ///
    /// Non-positive widths fall back to `DEFAULT_RANK_WINDOW`.
    pub fn with_rank_window(mut self, width: i64) -> Self {
        self.rank_window = if width > 0 { width } else { DEFAULT_RANK_WINDOW };
        self
    }
}

/// Interprets a yes/no answer. Only `y` / `Y` count as yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

/// Derives the export root directory from the source file path.
///
/// Uses the file stem (`notes.db` -> `notes`), or `purewriter_export` when
/// the stem is empty.
pub fn default_export_root(source: impl AsRef<Path>) -> PathBuf {
    let stem = source
        .as_ref()
        .file_stem()
        .map(|value| value.to_string_lossy().trim().to_string())
        .unwrap_or_default();
    if stem.is_empty() {
        PathBuf::from(FALLBACK_EXPORT_ROOT)
    } else {
        PathBuf::from(stem)
    }
}
