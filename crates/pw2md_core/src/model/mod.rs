//! Source snapshot domain model.
//!
//! # Responsibility
//! - Define the folder/category/article records read from the source extract.
//! - Keep the whole extract as one immutable `Snapshot` value.
//!
//! # Invariants
//! - Every article belongs to exactly one folder.
//! - Records are loaded once per run and never mutated afterwards.

pub mod article;
pub mod folder;

pub use article::{Article, ArticleFormat};
pub use folder::{Category, Folder, FolderLayout, RANK_MODE_SENTINEL};

use serde::{Deserialize, Serialize};

/// Fully materialized source extract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Folders in loader order.
    pub folders: Vec<Folder>,
}

impl Snapshot {
    /// Creates a snapshot from already loaded folders.
    pub fn new(folders: Vec<Folder>) -> Self {
        Self { folders }
    }

    /// Total number of categories across all folders.
    pub fn category_count(&self) -> usize {
        self.folders.iter().map(|folder| folder.categories.len()).sum()
    }

    /// Total number of articles across all folders.
    pub fn article_count(&self) -> usize {
        self.folders.iter().map(|folder| folder.articles.len()).sum()
    }
}
