//! Folder and category records.
//!
//! # Invariants
//! - `Category::rank` opens an implicit assignment window used when an
//!   article carries no usable category link.
//! - Category/article membership is fixed for the run.

use super::article::Article;
use serde::{Deserialize, Serialize};

/// Folder `rank_mode` value that forces the categorized layout.
pub const RANK_MODE_SENTINEL: &str = "RANK";

/// Output layout chosen for one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderLayout {
    /// Every article directly under the folder directory.
    Flat,
    /// One subdirectory per category plus standalone articles.
    Categorized,
}

/// Top-level notebook ("book") in the source database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Raw tag string as stored by the source.
    pub tags: String,
    pub rank: i64,
    /// `RANK` selects the categorized layout; empty otherwise.
    pub rank_mode: String,
    /// Unix epoch milliseconds.
    pub created_time: i64,
    /// Categories sorted by `rank ASC`.
    pub categories: Vec<Category>,
    /// Articles sorted by `rank ASC, create_time ASC`.
    pub articles: Vec<Article>,
}

impl Folder {
    /// Picks the output layout for this folder.
    ///
    /// Categorized when `rank_mode == "RANK"` or at least one category exists.
    pub fn layout(&self) -> FolderLayout {
        if self.rank_mode == RANK_MODE_SENTINEL || !self.categories.is_empty() {
            FolderLayout::Categorized
        } else {
            FolderLayout::Flat
        }
    }
}

/// Chapter-like grouping inside one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub folder_id: String,
    pub name: String,
    pub rank: i64,
    pub description: String,
    /// Unix epoch milliseconds.
    pub created_time: i64,
    /// Unix epoch milliseconds.
    pub update_time: i64,
}

#[cfg(test)]
mod tests {
    use super::{Category, Folder, FolderLayout};

    #[test]
    fn rank_mode_forces_categorized_layout() {
        let folder = Folder {
            rank_mode: "RANK".to_string(),
            ..Folder::default()
        };
        assert_eq!(folder.layout(), FolderLayout::Categorized);
    }

    #[test]
    fn categories_force_categorized_layout() {
        let folder = Folder {
            categories: vec![Category::default()],
            ..Folder::default()
        };
        assert_eq!(folder.layout(), FolderLayout::Categorized);
    }

    #[test]
    fn plain_folder_is_flat() {
        let folder = Folder {
            rank_mode: "TIME".to_string(),
            ..Folder::default()
        };
        assert_eq!(folder.layout(), FolderLayout::Flat);
    }
}
