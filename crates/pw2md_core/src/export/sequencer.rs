//! Emission order for one article group.
//!
//! # Invariants
//! - Output is sorted by `rank ASC, create_time ASC`.
//! - The sort is stable: equal keys keep their input order.
//! - Groups are sequenced independently; nothing moves across groups.

use crate::model::Article;

/// Returns the group in emission order.
pub fn sequence<'a, I>(articles: I) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut ordered: Vec<&'a Article> = articles.into_iter().collect();
    // slice::sort_by is stable.
    ordered.sort_by(|left, right| {
        left.rank
            .cmp(&right.rank)
            .then(left.create_time.cmp(&right.create_time))
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::sequence;
    use crate::model::Article;

    fn article(id: &str, rank: i64, create_time: i64) -> Article {
        Article {
            id: id.to_string(),
            rank,
            create_time,
            ..Article::default()
        }
    }

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|article| article.id.clone()).collect()
    }

    #[test]
    fn orders_by_rank_then_create_time() {
        let articles = vec![
            article("c", 20, 1),
            article("b", 10, 5),
            article("a", 10, 2),
            article("d", -5, 9),
        ];
        assert_eq!(ids(&sequence(&articles)), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let articles = vec![
            article("first", 7, 100),
            article("early", 7, 50),
            article("second", 7, 100),
            article("third", 7, 100),
        ];
        assert_eq!(
            ids(&sequence(&articles)),
            vec!["early", "first", "second", "third"]
        );
    }

    #[test]
    fn empty_group_stays_empty() {
        let articles: Vec<Article> = Vec::new();
        assert!(sequence(&articles).is_empty());
    }
}
