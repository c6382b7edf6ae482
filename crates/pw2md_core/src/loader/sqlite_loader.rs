//! Pure Writer SQLite snapshot loader.
//!
//! # Responsibility
//! - Read folders, categories and articles from the source tables.
//! - Apply the source ordering contract while reading.
//!
//! # Invariants
//! - Folders exclude `PW_Trash` and rows with non-zero `deleted`.
//! - Folders keep source table order.
//! - Categories are ordered by `rank ASC`.
//! - Articles are ordered by `rank ASC, createTime ASC`.
//! - NULL text columns are read as empty strings.

use super::{LoadError, LoadResult, SnapshotLoader};
use crate::model::{Article, ArticleFormat, Category, Folder, Snapshot};
use log::{error, info};
use rusqlite::{Connection, Row};
use std::time::Instant;

/// Reserved id of the source trash folder.
pub const TRASH_FOLDER_ID: &str = "PW_Trash";

const FOLDER_SELECT_SQL: &str = "SELECT
    f.id AS id,
    COALESCE(f.name, '') AS name,
    COALESCE(f.createdTime, 0) AS createdTime,
    COALESCE(f.description, '') AS description,
    COALESCE(f.tags, '') AS tags,
    COALESCE(f.rank, 0) AS rank,
    COALESCE(f.rankMode, '') AS rankMode
FROM Folder f
WHERE f.id != ?1
  AND COALESCE(f.deleted, 0) = 0;";

const CATEGORY_SELECT_SQL: &str = "SELECT
    c.id AS id,
    COALESCE(c.name, '') AS name,
    c.folderId AS folderId,
    COALESCE(c.description, '') AS description,
    COALESCE(c.rank, 0) AS rank,
    COALESCE(c.updateTime, 0) AS updateTime,
    COALESCE(c.createdTime, 0) AS createdTime
FROM Category c
WHERE c.folderId = ?1
  AND COALESCE(c.deleted, 0) = 0
ORDER BY c.rank ASC;";

const ARTICLE_SELECT_SQL: &str = "SELECT
    a.id AS id,
    COALESCE(a.title, '') AS title,
    COALESCE(a.content, '') AS content,
    COALESCE(a.summary, '') AS summary,
    COALESCE(a.count, 0) AS count,
    COALESCE(a.extension, '') AS extension,
    a.folderId AS folderId,
    COALESCE(a.categoryId, '') AS categoryId,
    COALESCE(a.rank, 0) AS rank,
    COALESCE(a.updateTime, 0) AS updateTime,
    COALESCE(a.createTime, 0) AS createTime
FROM Article a
WHERE a.folderId = ?1
  AND COALESCE(a.deleted, 0) = 0
ORDER BY a.rank ASC, a.createTime ASC;";

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "Folder",
        &[
            "id",
            "name",
            "createdTime",
            "description",
            "tags",
            "rank",
            "rankMode",
            "deleted",
        ],
    ),
    (
        "Category",
        &[
            "id",
            "name",
            "folderId",
            "description",
            "rank",
            "updateTime",
            "createdTime",
            "deleted",
        ],
    ),
    (
        "Article",
        &[
            "id",
            "title",
            "content",
            "summary",
            "count",
            "extension",
            "folderId",
            "categoryId",
            "rank",
            "updateTime",
            "createTime",
            "deleted",
        ],
    ),
];

/// SQLite-backed snapshot loader.
pub struct SqliteSnapshotLoader<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotLoader<'conn> {
    /// Creates a loader after checking the source schema shape.
    ///
    /// # Errors
    /// - `LoadError::MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   connection does not look like a Pure Writer database.
    pub fn try_new(conn: &'conn Connection) -> LoadResult<Self> {
        ensure_source_schema(conn)?;
        Ok(Self { conn })
    }

    /// Loads active folders without their children.
    pub fn load_folders(&self) -> LoadResult<Vec<Folder>> {
        let mut stmt = self.conn.prepare(FOLDER_SELECT_SQL)?;
        let mut rows = stmt.query([TRASH_FOLDER_ID])?;
        let mut folders = Vec::new();
        while let Some(row) = rows.next()? {
            folders.push(parse_folder_row(row)?);
        }
        Ok(folders)
    }

    /// Loads active categories of one folder, `rank ASC`.
    pub fn load_categories(&self, folder_id: &str) -> LoadResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(CATEGORY_SELECT_SQL)?;
        let mut rows = stmt.query([folder_id])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    /// Loads active articles of one folder, `rank ASC, createTime ASC`.
    pub fn load_articles(&self, folder_id: &str) -> LoadResult<Vec<Article>> {
        let mut stmt = self.conn.prepare(ARTICLE_SELECT_SQL)?;
        let mut rows = stmt.query([folder_id])?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(parse_article_row(row)?);
        }
        Ok(articles)
    }

    fn load_all(&self) -> LoadResult<Snapshot> {
        let mut folders = self.load_folders()?;
        for folder in &mut folders {
            folder.categories = self.load_categories(&folder.id)?;
            folder.articles = self.load_articles(&folder.id)?;
        }
        Ok(Snapshot::new(folders))
    }
}

impl SnapshotLoader for SqliteSnapshotLoader<'_> {
    fn load_snapshot(&self) -> LoadResult<Snapshot> {
        let started_at = Instant::now();
        info!("event=snapshot_load module=loader status=start");

        match self.load_all() {
            Ok(snapshot) => {
                info!(
                    "event=snapshot_load module=loader status=ok duration_ms={} folders={} categories={} articles={}",
                    started_at.elapsed().as_millis(),
                    snapshot.folders.len(),
                    snapshot.category_count(),
                    snapshot.article_count()
                );
                Ok(snapshot)
            }
            Err(err) => {
                error!(
                    "event=snapshot_load module=loader status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn parse_folder_row(row: &Row<'_>) -> LoadResult<Folder> {
    Ok(Folder {
        id: read_id(row, "Folder.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        tags: row.get("tags")?,
        rank: row.get("rank")?,
        rank_mode: row.get("rankMode")?,
        created_time: row.get("createdTime")?,
        categories: Vec::new(),
        articles: Vec::new(),
    })
}

fn parse_category_row(row: &Row<'_>) -> LoadResult<Category> {
    Ok(Category {
        id: read_id(row, "Category.id")?,
        folder_id: row.get("folderId")?,
        name: row.get("name")?,
        rank: row.get("rank")?,
        description: row.get("description")?,
        created_time: row.get("createdTime")?,
        update_time: row.get("updateTime")?,
    })
}

fn parse_article_row(row: &Row<'_>) -> LoadResult<Article> {
    let extension: String = row.get("extension")?;
    Ok(Article {
        id: read_id(row, "Article.id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        summary: row.get("summary")?,
        count: row.get("count")?,
        folder_id: row.get("folderId")?,
        category_id: row.get("categoryId")?,
        rank: row.get("rank")?,
        create_time: row.get("createTime")?,
        update_time: row.get("updateTime")?,
        format: ArticleFormat::from_extension(&extension),
    })
}

fn read_id(row: &Row<'_>, column: &'static str) -> LoadResult<String> {
    let id: Option<String> = row.get("id")?;
    match id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(LoadError::InvalidData(format!("empty id in {column}"))),
    }
}

fn ensure_source_schema(conn: &Connection) -> LoadResult<()> {
    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(LoadError::MissingRequiredTable(table));
        }
        let present = table_columns(conn, table)?;
        for &column in columns {
            if !present
                .iter()
                .any(|current| current.eq_ignore_ascii_case(column))
            {
                return Err(LoadError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> LoadResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1 COLLATE NOCASE
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> LoadResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
