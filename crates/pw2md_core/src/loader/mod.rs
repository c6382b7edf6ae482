//! Source loader abstractions and SQLite implementation.
//!
//! # Responsibility
//! - Produce one immutable, fully materialized `Snapshot` before export.
//! - Isolate source SQL details from the export engine.
//!
//! # Invariants
//! - Loading is all-or-nothing: any read failure aborts with `LoadError`.
//! - The reserved trash folder and soft-deleted rows never reach the snapshot.

use crate::db::DbError;
use crate::model::Snapshot;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_loader;

pub use sqlite_loader::{SqliteSnapshotLoader, TRASH_FOLDER_ID};

/// Result type used by loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while reading the source snapshot.
#[derive(Debug)]
pub enum LoadError {
    /// Underlying SQLite error.
    Db(DbError),
    /// Required source table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from a source table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be converted into a model record.
    InvalidData(String),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "source database requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "source database requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid source data: {message}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for LoadError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for LoadError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Loader contract consumed by the exporter.
pub trait SnapshotLoader {
    /// Reads the whole source extract.
    fn load_snapshot(&self) -> LoadResult<Snapshot>;
}

/// A snapshot already in memory is its own loader.
impl SnapshotLoader for Snapshot {
    fn load_snapshot(&self) -> LoadResult<Snapshot> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotLoader;
    use crate::model::{Folder, Snapshot};

    #[test]
    fn in_memory_snapshot_loads_itself() {
        let snapshot = Snapshot::new(vec![Folder {
            id: "f1".to_string(),
            ..Folder::default()
        }]);
        assert_eq!(snapshot.load_snapshot().unwrap(), snapshot);
    }
}
