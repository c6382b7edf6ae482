//! Article record.
//!
//! # Invariants
//! - `category_id` may be empty or point at a category that was not loaded.
//! - Timestamps are Unix epoch milliseconds.

use serde::{Deserialize, Serialize};

/// Body format marker, parsed from the source `extension` column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleFormat {
    /// `txt`: single line breaks are significant.
    PlainText,
    /// `md`: passed through unchanged.
    #[default]
    Markdown,
    /// Any other marker, kept verbatim and passed through unchanged.
    Other(String),
}

impl ArticleFormat {
    /// Maps a raw source extension to a format marker.
    pub fn from_extension(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "txt" => Self::PlainText,
            "md" => Self::Markdown,
            _ => Self::Other(value.to_string()),
        }
    }

    /// Returns whether this body needs line-break expansion before emission.
    pub fn is_plain_text(&self) -> bool {
        matches!(self, Self::PlainText)
    }
}

/// One note in the source database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    /// Word count as stored by the source.
    pub count: i64,
    pub folder_id: String,
    /// Explicit category link; empty when absent.
    pub category_id: String,
    pub rank: i64,
    pub create_time: i64,
    pub update_time: i64,
    pub format: ArticleFormat,
}
