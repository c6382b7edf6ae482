//! Pure Writer database to Markdown directory tree exporter.
//!
//! Loads an immutable snapshot of folders, categories and articles, then
//! mirrors it into `<root>/<folder>/[<category>/]<article>.md`.

pub mod config;
pub mod db;
pub mod export;
pub mod loader;
pub mod logging;
pub mod model;

pub use config::{default_export_root, is_affirmative, ExportConfig, DEFAULT_RANK_WINDOW};
pub use export::classifier::{assign, classify, Assignment, Classification};
pub use export::fs::{ExportFs, LocalFs};
pub use export::namer::{derive_article_base_name, sanitize_name, unique_article_path};
pub use export::orchestrator::Exporter;
pub use export::sequencer::sequence;
pub use export::{ExportError, ExportOp, ExportResult, ExportUnit};
pub use loader::{LoadError, LoadResult, SnapshotLoader, SqliteSnapshotLoader, TRASH_FOLDER_ID};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{Article, ArticleFormat, Category, Folder, FolderLayout, Snapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
