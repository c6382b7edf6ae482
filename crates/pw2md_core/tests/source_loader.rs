use pw2md_core::db::{open_source_db, open_source_db_in_memory, DbError};
use pw2md_core::{ArticleFormat, LoadError, SnapshotLoader, SqliteSnapshotLoader};
use rusqlite::{params, Connection};

const SCHEMA_SQL: &str = "
CREATE TABLE Folder (
    id TEXT PRIMARY KEY,
    name TEXT,
    createdTime INTEGER,
    description TEXT,
    tags TEXT,
    rank INTEGER,
    rankMode TEXT,
    deleted INTEGER
);
CREATE TABLE Category (
    id TEXT PRIMARY KEY,
    name TEXT,
    folderId TEXT,
    description TEXT,
    rank INTEGER,
    updateTime INTEGER,
    createdTime INTEGER,
    deleted INTEGER
);
CREATE TABLE Article (
    id TEXT PRIMARY KEY,
    title TEXT,
    content TEXT,
    summary TEXT,
    count INTEGER,
    extension TEXT,
    folderId TEXT,
    categoryId TEXT,
    rank INTEGER,
    updateTime INTEGER,
    createTime INTEGER,
    deleted INTEGER
);
";

fn setup() -> Connection {
    let conn = open_source_db_in_memory().unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn
}

fn insert_folder(conn: &Connection, id: &str, name: &str, rank_mode: Option<&str>, deleted: i64) {
    conn.execute(
        "INSERT INTO Folder (id, name, createdTime, description, tags, rank, rankMode, deleted)
         VALUES (?1, ?2, 1600000000000, NULL, NULL, 0, ?3, ?4);",
        params![id, name, rank_mode, deleted],
    )
    .unwrap();
}

fn insert_category(conn: &Connection, id: &str, folder_id: &str, rank: i64, deleted: i64) {
    conn.execute(
        "INSERT INTO Category (id, name, folderId, description, rank, updateTime, createdTime, deleted)
         VALUES (?1, ?1, ?2, NULL, ?3, 0, 0, ?4);",
        params![id, folder_id, rank, deleted],
    )
    .unwrap();
}

fn insert_article(
    conn: &Connection,
    id: &str,
    folder_id: &str,
    rank: i64,
    create_time: i64,
    deleted: Option<i64>,
) {
    conn.execute(
        "INSERT INTO Article (id, title, content, summary, count, extension, folderId, categoryId, rank, updateTime, createTime, deleted)
         VALUES (?1, NULL, 'body', NULL, NULL, 'txt', ?2, NULL, ?3, ?4, ?4, ?5);",
        params![id, folder_id, rank, create_time, deleted],
    )
    .unwrap();
}

#[test]
fn load_excludes_trash_and_deleted_folders() {
    let conn = setup();
    insert_folder(&conn, "f1", "Book", Some("RANK"), 0);
    insert_folder(&conn, "PW_Trash", "Trash", None, 0);
    insert_folder(&conn, "f2", "Gone", None, 1);

    let loader = SqliteSnapshotLoader::try_new(&conn).unwrap();
    let snapshot = loader.load_snapshot().unwrap();

    assert_eq!(snapshot.folders.len(), 1);
    assert_eq!(snapshot.folders[0].id, "f1");
    assert_eq!(snapshot.folders[0].rank_mode, "RANK");
    assert_eq!(snapshot.folders[0].description, "");
    assert_eq!(snapshot.folders[0].tags, "");
}

#[test]
fn load_orders_children_and_skips_deleted_rows() {
    let conn = setup();
    insert_folder(&conn, "f1", "Book", None, 0);
    insert_category(&conn, "late", "f1", 20_000, 0);
    insert_category(&conn, "early", "f1", 0, 0);
    insert_category(&conn, "removed", "f1", 10_000, 1);
    insert_article(&conn, "a3", "f1", 5, 300, Some(0));
    insert_article(&conn, "a1", "f1", 1, 900, None);
    insert_article(&conn, "a2", "f1", 5, 100, Some(0));
    insert_article(&conn, "gone", "f1", 0, 0, Some(1));

    let snapshot = SqliteSnapshotLoader::try_new(&conn)
        .unwrap()
        .load_snapshot()
        .unwrap();
    let folder = &snapshot.folders[0];

    let category_ids: Vec<&str> = folder.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(category_ids, vec!["early", "late"]);

    let article_ids: Vec<&str> = folder.articles.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(article_ids, vec!["a1", "a2", "a3"]);

    let first = &folder.articles[0];
    assert_eq!(first.title, "");
    assert_eq!(first.summary, "");
    assert_eq!(first.category_id, "");
    assert_eq!(first.count, 0);
    assert_eq!(first.format, ArticleFormat::PlainText);
    assert_eq!(snapshot.article_count(), 3);
    assert_eq!(snapshot.category_count(), 2);
}

#[test]
fn loader_rejects_foreign_schema() {
    let conn = open_source_db_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE Folder (id TEXT PRIMARY KEY, name TEXT);")
        .unwrap();

    let err = SqliteSnapshotLoader::try_new(&conn)
        .err()
        .expect("schema check should fail");
    assert!(matches!(err, LoadError::MissingRequiredColumn { table: "Folder", .. }));

    let empty = open_source_db_in_memory().unwrap();
    let err = SqliteSnapshotLoader::try_new(&empty)
        .err()
        .expect("schema check should fail");
    assert!(matches!(err, LoadError::MissingRequiredTable("Folder")));
}

#[test]
fn open_source_db_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.db");

    let err = open_source_db(&path).unwrap_err();
    assert!(matches!(err, DbError::NotFound(ref missing) if *missing == path));
    assert!(!path.exists());
}

#[test]
fn open_source_db_is_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA_SQL).unwrap();
        insert_folder(&conn, "f1", "Book", None, 0);
    }

    let conn = open_source_db(&path).unwrap();
    let snapshot = SqliteSnapshotLoader::try_new(&conn)
        .unwrap()
        .load_snapshot()
        .unwrap();
    assert_eq!(snapshot.folders.len(), 1);

    let write = conn.execute("DELETE FROM Folder;", []);
    assert!(write.is_err());
}
