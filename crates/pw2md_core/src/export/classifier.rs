//! Article-to-category assignment.
//!
//! # Responsibility
//! - Partition one folder's articles into per-category groups plus a
//!   standalone group.
//!
//! # Invariants
//! - A non-empty `category_id` naming a loaded category always wins.
//! - Otherwise the first category (by ascending rank) with
//!   `0 <= article.rank - category.rank < window` wins; distance is ignored.
//! - Articles matching nothing are standalone.
//! - Pure: no I/O.

use crate::model::{Article, Category};
use std::collections::HashMap;

/// Why an article landed where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// `category_id` matched a loaded category. Holds its index.
    Linked(usize),
    /// Fell inside the category's rank window. Holds its index.
    RankWindow(usize),
    /// No category matched.
    Standalone,
}

impl Assignment {
    /// Index into the category slice, if any.
    pub fn category_index(self) -> Option<usize> {
        match self {
            Self::Linked(index) | Self::RankWindow(index) => Some(index),
            Self::Standalone => None,
        }
    }
}

/// Per-category groups and the standalone remainder of one folder.
#[derive(Debug, Default)]
pub struct Classification<'a> {
    by_category: HashMap<String, Vec<&'a Article>>,
    /// Articles emitted directly under the folder.
    pub standalone: Vec<&'a Article>,
}

impl<'a> Classification<'a> {
    /// Articles assigned to `category_id`, in scan order.
    pub fn articles_for(&self, category_id: &str) -> &[&'a Article] {
        self.by_category
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of articles assigned to any category.
    pub fn categorized_count(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }
}

/// Decides where one article goes.
///
/// `categories` must be sorted by ascending rank.
pub fn assign(article: &Article, categories: &[Category], window: i64) -> Assignment {
    if !article.category_id.is_empty() {
        if let Some(index) = categories
            .iter()
            .position(|category| category.id == article.category_id)
        {
            return Assignment::Linked(index);
        }
    }

    categories
        .iter()
        .position(|category| in_rank_window(article.rank, category.rank, window))
        .map_or(Assignment::Standalone, Assignment::RankWindow)
}

/// Partitions `articles` over `categories` (sorted by ascending rank).
pub fn classify<'a>(
    articles: &'a [Article],
    categories: &[Category],
    window: i64,
) -> Classification<'a> {
    let mut classification = Classification::default();
    for article in articles {
        match assign(article, categories, window).category_index() {
            Some(index) => classification
                .by_category
                .entry(categories[index].id.clone())
                .or_default()
                .push(article),
            None => classification.standalone.push(article),
        }
    }
    classification
}

fn in_rank_window(article_rank: i64, category_rank: i64, window: i64) -> bool {
    article_rank
        .checked_sub(category_rank)
        .is_some_and(|offset| (0..window).contains(&offset))
}
