//! Article and folder-metadata rendering and writing.
//!
//! # Responsibility
//! - Render article bodies (optional timestamp header, plain-text expansion).
//! - Write article files and per-folder `meta.json` documents.
//!
//! # Invariants
//! - The header block is present only when `ExportConfig::with_timestamps`.
//! - Plain-text bodies get every `\n` doubled; other formats pass through.
//! - Article writes always target a fresh path chosen by the namer.
//! - Existing metadata documents are never replaced.

use super::fs::ExportFs;
use super::namer::{article_file_stem, unique_article_path};
use super::timefmt::format_display_time;
use super::{ExportError, ExportOp, ExportResult, ExportUnit};
use crate::config::ExportConfig;
use crate::model::{Article, Folder};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Folder metadata document written as `meta.json`.
///
/// Fields are declared in key order of the emitted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMeta<'a> {
    pub created_time: String,
    pub description: &'a str,
    pub id: &'a str,
    pub name: &'a str,
    pub tags: &'a str,
}

impl<'a> FolderMeta<'a> {
    pub fn from_folder(folder: &'a Folder) -> Self {
        Self {
            created_time: format_display_time(folder.created_time),
            description: &folder.description,
            id: &folder.id,
            name: &folder.name,
            tags: &folder.tags,
        }
    }
}

/// Serializes folder metadata with 2-space indentation.
pub fn render_folder_meta(folder: &Folder) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&FolderMeta::from_folder(folder))
}

/// Writes the folder metadata document into `folder_dir`.
///
/// Returns the written path.
///
/// # Errors
/// - `ExportOp::Write` with `AlreadyExists` when a metadata file is already
///   there (for example a second folder sharing the directory).
pub fn write_folder_meta<F: ExportFs + ?Sized>(
    fs: &F,
    folder: &Folder,
    folder_dir: &Path,
    config: &ExportConfig,
) -> ExportResult<PathBuf> {
    let path = folder_dir.join(&config.meta_file_name);
    let document = render_folder_meta(folder).map_err(|err| {
        ExportError::new(
            ExportUnit::FolderMeta,
            &folder.name,
            ExportOp::Serialize,
            &path,
            io::Error::new(io::ErrorKind::InvalidData, err),
        )
    })?;
    fs.write_new(&path, document.as_bytes()).map_err(|err| {
        ExportError::new(ExportUnit::FolderMeta, &folder.name, ExportOp::Write, &path, err)
    })?;
    Ok(path)
}

/// Renders the `---` header block, or an empty string when disabled.
pub fn render_article_header(article: &Article, config: &ExportConfig) -> String {
    if !config.with_timestamps {
        return String::new();
    }
    format!(
        "---\ncreate: {}\nupdate: {}\n---\n\n",
        format_display_time(article.create_time),
        format_display_time(article.update_time)
    )
}

/// Applies the format-dependent body transform.
pub fn render_article_body(article: &Article) -> String {
    if article.format.is_plain_text() {
        article.content.replace('\n', "\n\n")
    } else {
        article.content.clone()
    }
}

/// Full file contents for one article.
pub fn render_article(article: &Article, config: &ExportConfig) -> String {
    let mut rendered = render_article_header(article, config);
    rendered.push_str(&render_article_body(article));
    rendered
}

/// Names, renders and writes one article into `dir`.
///
/// Returns the path actually written.
pub fn emit_article<F: ExportFs + ?Sized>(
    fs: &F,
    article: &Article,
    dir: &Path,
    config: &ExportConfig,
) -> ExportResult<PathBuf> {
    let stem = article_file_stem(article);
    let path = unique_article_path(fs, dir, &stem);
    let contents = render_article(article, config);
    fs.write_new(&path, contents.as_bytes())
        .map_err(|err| ExportError::new(ExportUnit::Article, stem, ExportOp::Write, &path, err))?;
    Ok(path)
}
