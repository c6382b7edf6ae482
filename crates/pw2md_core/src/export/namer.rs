//! File and directory naming.
//!
//! # Responsibility
//! - Derive a filesystem-legal base name for articles, folders and categories.
//! - Resolve article name collisions against the live destination directory.
//!
//! # Invariants
//! - `sanitize_name` output never contains `\ / : * ? " < > |` and is never empty.
//! - `sanitize_name` is idempotent.
//! - Collision probing inspects the destination at call time, so writes into
//!   one directory must complete before the next probe.

use super::fs::ExportFs;
use super::timefmt::{format_epoch_ms, FILE_STAMP_PATTERN};
use crate::model::Article;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static ILLEGAL_NAME_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("valid illegal-chars regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Code points kept when a name is derived from article content.
pub const CONTENT_NAME_CHARS: usize = 20;
/// Name used when sanitization leaves nothing.
pub const UNTITLED_NAME: &str = "Untitled";
/// Prefix for names derived from the creation timestamp.
pub const UNTITLED_STAMP_PREFIX: &str = "Untitled-";
/// Extension of every emitted article file.
pub const ARTICLE_EXTENSION: &str = "md";

/// Makes `raw` usable as one path component.
///
/// Trims, replaces every reserved character with `x`, trims again and
/// substitutes `Untitled` for an empty result.
pub fn sanitize_name(raw: &str) -> String {
    let replaced = ILLEGAL_NAME_CHARS_RE.replace_all(raw.trim(), "x");
    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        UNTITLED_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derives the unsanitized base name for one article.
///
/// Priority: trimmed title, then the first 20 code points of the
/// whitespace-normalized content, then `Untitled-<create stamp>`.
pub fn derive_article_base_name(article: &Article) -> String {
    let title = article.title.trim();
    if !title.is_empty() {
        return title.to_string();
    }

    let from_content = content_name(&article.content);
    if !from_content.is_empty() {
        return from_content;
    }

    format!(
        "{UNTITLED_STAMP_PREFIX}{}",
        format_epoch_ms(article.create_time, FILE_STAMP_PATTERN)
    )
}

/// Sanitized base name for one article (no extension).
pub fn article_file_stem(article: &Article) -> String {
    sanitize_name(&derive_article_base_name(article))
}

/// Returns the first free `<stem>.md`, `<stem> (2).md`, ... path in `dir`.
pub fn unique_article_path<F: ExportFs + ?Sized>(fs: &F, dir: &Path, stem: &str) -> PathBuf {
    let candidate = dir.join(format!("{stem}.{ARTICLE_EXTENSION}"));
    if !fs.exists(&candidate) {
        return candidate;
    }

    let mut suffix: u64 = 2;
    loop {
        let candidate = dir.join(format!("{stem} ({suffix}).{ARTICLE_EXTENSION}"));
        if !fs.exists(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn content_name(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    normalized
        .trim()
        .chars()
        .take(CONTENT_NAME_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{
        article_file_stem, derive_article_base_name, sanitize_name, unique_article_path,
    };
    use crate::export::fs::{ExportFs, LocalFs};
    use crate::export::timefmt::{format_epoch_ms, FILE_STAMP_PATTERN};
    use crate::model::Article;

    fn article(title: &str, content: &str) -> Article {
        Article {
            title: title.to_string(),
            content: content.to_string(),
            create_time: 1_600_000_000_000,
            ..Article::default()
        }
    }

    #[test]
    fn sanitize_replaces_every_reserved_char() {
        let sanitized = sanitize_name(r#" a\b/c:d*e?f"g<h>i|j "#);
        assert_eq!(sanitized, "axbxcxdxexfxgxhxixj");
        for reserved in ['\\', '/', ':', '*', '?', '"', '<', '>', '|'] {
            assert!(!sanitized.contains(reserved));
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        for raw in ["  ", "a/b", " x ", "<>", "plain", "  ?? spaced  ", "日本語:メモ"] {
            let once = sanitize_name(raw);
            assert_eq!(sanitize_name(&once), once, "input `{raw}`");
        }
    }

    #[test]
    fn sanitize_substitutes_untitled_for_blank() {
        assert_eq!(sanitize_name("   "), "Untitled");
        assert_eq!(sanitize_name(""), "Untitled");
    }

    #[test]
    fn title_wins_over_content() {
        let article = article("  My Title  ", "body text");
        assert_eq!(derive_article_base_name(&article), "My Title");
    }

    #[test]
    fn empty_title_uses_first_twenty_code_points_of_content() {
        let article = article("", "Hello world this is a fairly long piece of body text");
        assert_eq!(article_file_stem(&article), "Hello world this is");
    }

    #[test]
    fn content_name_normalizes_line_breaks_and_counts_code_points() {
        let article = article("", "一二三\r\n四五六\n\n七八九十一二三四五六七八九十一二三");
        let name = derive_article_base_name(&article);
        assert_eq!(name, "一二三 四五六 七八九十一二三四五六七八");
        assert_eq!(name.chars().count(), 20);
    }

    #[test]
    fn blank_title_and_content_use_create_stamp() {
        let article = article(" ", " \n\t ");
        let expected = format!(
            "Untitled-{}",
            format_epoch_ms(1_600_000_000_000, FILE_STAMP_PATTERN)
        );
        assert_eq!(derive_article_base_name(&article), expected);
    }

    #[test]
    fn collisions_get_numbered_siblings_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut produced = Vec::new();
        for _ in 0..4 {
            let path = unique_article_path(&LocalFs, dir.path(), "X");
            LocalFs.write_new(&path, b"").unwrap();
            produced.push(path.file_name().unwrap().to_string_lossy().to_string());
        }
        assert_eq!(produced, vec!["X.md", "X (2).md", "X (3).md", "X (4).md"]);
    }
}
