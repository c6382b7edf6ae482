//! Per-folder export driver.
//!
//! # Responsibility
//! - Create folder/category directories and pick flat vs. categorized layout.
//! - Run classifier -> sequencer -> emitter for every article group.
//!
//! # Invariants
//! - Folders are processed in snapshot order; categories by ascending rank,
//!   then the standalone group; articles in sequencer order.
//! - A failed folder directory skips that folder; a failed category
//!   directory skips that category; a failed article skips that article.
//! - Nothing is written outside the export root: `.` and `..` directory
//!   names are refused.
//! - Empty categories still get their directory.
//! - No retries and no rollback.

use super::classifier::classify;
use super::emitter::{emit_article, write_folder_meta};
use super::fs::ExportFs;
use super::namer::sanitize_name;
use super::sequencer::sequence;
use super::{ExportError, ExportOp, ExportResult, ExportUnit};
use crate::config::ExportConfig;
use crate::model::{Article, Folder, FolderLayout, Snapshot};
use log::{debug, error, info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome counters for one article group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct GroupOutcome {
    written: usize,
    failed: usize,
}

impl GroupOutcome {
    fn merge(&mut self, other: GroupOutcome) {
        self.written += other.written;
        self.failed += other.failed;
    }
}

/// Drives one export run over a destination filesystem.
pub struct Exporter<F: ExportFs> {
    fs: F,
    config: ExportConfig,
}

impl<F: ExportFs> Exporter<F> {
    pub fn new(fs: F, config: ExportConfig) -> Self {
        Self { fs, config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Exports every folder of `snapshot` under `root`.
    ///
    /// # Errors
    /// - Only when `root` itself cannot be created. Folder, category and
    ///   article failures are logged and skipped.
    pub fn export_snapshot(&self, snapshot: &Snapshot, root: &Path) -> ExportResult<()> {
        let started_at = Instant::now();
        info!(
            "event=export_run module=export status=start root={} folders={} with_timestamps={} rank_window={}",
            root.display(),
            snapshot.folders.len(),
            self.config.with_timestamps,
            self.config.rank_window
        );

        if let Err(err) = self.fs.create_dir_all(root) {
            let err = ExportError::new(
                ExportUnit::Root,
                root.display().to_string(),
                ExportOp::CreateDir,
                root,
                err,
            );
            error!(
                "event=export_run module=export status=error error_code=root_create_failed error={}",
                err
            );
            return Err(err);
        }

        for folder in &snapshot.folders {
            if let Err(err) = self.export_folder(folder, root) {
                error!(
                    "event=folder_export module=export status=error folder={} error={}",
                    folder.name, err
                );
            }
        }

        info!(
            "event=export_run module=export status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Exports one folder under `root` and returns its directory.
    ///
    /// # Errors
    /// - When the folder directory cannot be created; nothing else is
    ///   attempted for this folder.
    pub fn export_folder(&self, folder: &Folder, root: &Path) -> ExportResult<PathBuf> {
        info!(
            "event=folder_export module=export status=start folder={}",
            folder.name
        );

        let folder_component = sanitize_name(&folder.name);
        let folder_dir = root.join(&folder_component);
        self.create_unit_dir(&folder_component, &folder_dir).map_err(|err| {
            ExportError::new(
                ExportUnit::Folder,
                &folder.name,
                ExportOp::CreateDir,
                &folder_dir,
                err,
            )
        })?;

        if let Err(err) = write_folder_meta(&self.fs, folder, &folder_dir, &self.config) {
            warn!(
                "event=folder_meta module=export status=error folder={} error={}",
                folder.name, err
            );
        }

        let layout = folder.layout();
        let outcome = match layout {
            FolderLayout::Flat => self.emit_group(&folder.articles, &folder_dir),
            FolderLayout::Categorized => self.export_categorized(folder, &folder_dir),
        };

        info!(
            "event=folder_export module=export status=ok folder={} layout={:?} written={} failed={}",
            folder.name, layout, outcome.written, outcome.failed
        );
        Ok(folder_dir)
    }

    fn export_categorized(&self, folder: &Folder, folder_dir: &Path) -> GroupOutcome {
        if folder.categories.is_empty() {
            return self.emit_group(&folder.articles, folder_dir);
        }

        let mut categories = folder.categories.clone();
        categories.sort_by_key(|category| category.rank);

        let classification = classify(&folder.articles, &categories, self.config.rank_window);
        debug!(
            "event=classify module=export status=ok folder={} categorized={} standalone={}",
            folder.name,
            classification.categorized_count(),
            classification.standalone.len()
        );

        let mut outcome = GroupOutcome::default();
        for category in &categories {
            let category_component = sanitize_name(&category.name);
            let category_dir = folder_dir.join(&category_component);
            if let Err(err) = self.create_unit_dir(&category_component, &category_dir) {
                let err = ExportError::new(
                    ExportUnit::Category,
                    &category.name,
                    ExportOp::CreateDir,
                    &category_dir,
                    err,
                );
                error!(
                    "event=category_export module=export status=error folder={} category={} error={}",
                    folder.name, category.name, err
                );
                continue;
            }

            let assigned = classification.articles_for(&category.id);
            outcome.merge(self.emit_group(assigned.iter().copied(), &category_dir));
        }

        if !classification.standalone.is_empty() {
            outcome.merge(self.emit_group(classification.standalone.iter().copied(), folder_dir));
        }
        outcome
    }

    /// Creates the directory for one folder or category.
    ///
    /// `.` and `..` pass sanitization but would resolve outside the parent.
    fn create_unit_dir(&self, component: &str, dir: &Path) -> io::Result<()> {
        if matches!(component, "." | "..") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("directory name `{component}` leaves the export tree"),
            ));
        }
        self.fs.create_dir_all(dir)
    }

    fn emit_group<'a, I>(&self, articles: I, dir: &Path) -> GroupOutcome
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let mut outcome = GroupOutcome::default();
        for article in sequence(articles) {
            match emit_article(&self.fs, article, dir, &self.config) {
                Ok(path) => {
                    debug!(
                        "event=article_export module=export status=ok article_id={} path={}",
                        article.id,
                        path.display()
                    );
                    outcome.written += 1;
                }
                Err(err) => {
                    error!(
                        "event=article_export module=export status=error article_id={} error={}",
                        article.id, err
                    );
                    outcome.failed += 1;
                }
            }
        }
        outcome
    }
}
