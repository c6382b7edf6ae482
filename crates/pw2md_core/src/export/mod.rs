//! Classification and layout engine.
//!
//! # Responsibility
//! - Turn a `Snapshot` into a mirrored tree of folder/category directories
//!   holding one `.md` file per article.
//! - Keep ordering, naming and fallback classification deterministic.
//!
//! # Invariants
//! - Processing is strictly sequential; name probes see every earlier write.
//! - Existing files are never overwritten; collisions get ` (N)` siblings.
//! - Destination failures are isolated to the failing unit.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod classifier;
pub mod emitter;
pub mod fs;
pub mod namer;
pub mod orchestrator;
pub mod sequencer;
pub mod timefmt;

pub type ExportResult<T> = Result<T, ExportError>;

/// Output unit an export failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportUnit {
    Root,
    Folder,
    FolderMeta,
    Category,
    Article,
}

impl ExportUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Folder => "folder",
            Self::FolderMeta => "folder_meta",
            Self::Category => "category",
            Self::Article => "article",
        }
    }
}

/// Destination operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOp {
    CreateDir,
    Serialize,
    Write,
}

impl ExportOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateDir => "create_dir",
            Self::Serialize => "serialize",
            Self::Write => "write",
        }
    }
}

/// Destination write failure for one unit.
#[derive(Debug)]
pub struct ExportError {
    pub unit: ExportUnit,
    /// Display name of the folder/category/article.
    pub name: String,
    pub op: ExportOp,
    pub path: PathBuf,
    pub source: io::Error,
}

impl ExportError {
    pub fn new(
        unit: ExportUnit,
        name: impl Into<String>,
        op: ExportOp,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self {
            unit,
            name: name.into(),
            op,
            path: path.into(),
            source,
        }
    }
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} `{}`: {} failed at `{}`: {}",
            self.unit.as_str(),
            self.name,
            self.op.as_str(),
            self.path.display(),
            self.source
        )
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
