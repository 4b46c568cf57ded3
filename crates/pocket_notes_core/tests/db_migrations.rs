use pocket_notes_core::db::migrations::latest_version;
use pocket_notes_core::db::{open_db, open_db_in_memory, DbError};
use pocket_notes_core::{KeyValueStorage, SqliteStorage, StorageError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().expect("in-memory db should open");

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_slots");
}

#[test]
fn opening_same_database_twice_keeps_slots() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("pocket-notes.sqlite3");

    {
        let conn = open_db(&path).expect("first open should succeed");
        let mut storage = SqliteStorage::try_new(&conn).expect("storage should be ready");
        storage.set_item("pocket-notes:v2", "[]").expect("first write");
        storage.set_item("pocket-notes:v2", "[1]").expect("overwrite");
    }

    let conn = open_db(&path).expect("second open should succeed");
    assert_eq!(schema_version(&conn), latest_version());
    let storage = SqliteStorage::try_new(&conn).expect("storage should be ready");
    assert_eq!(
        storage
            .get_item("pocket-notes:v2")
            .expect("slot read should succeed")
            .as_deref(),
        Some("[1]")
    );
    assert_eq!(storage.get_item("missing").expect("slot read"), None);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).expect("raw open should succeed");
    conn.execute_batch("PRAGMA user_version = 999;")
        .expect("pragma should apply");
    drop(conn);

    let err = open_db(&path).expect_err("newer schema must be rejected");
    assert_eq!(err.code(), "schema_too_new");
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failing_migration_reports_version_and_rolls_back() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("clash.db");

    let conn = Connection::open(&path).expect("raw open should succeed");
    conn.execute_batch(
        "CREATE TABLE other (x INTEGER);
         CREATE INDEX kv_slots ON other (x);",
    )
    .expect("name clash setup should apply");
    drop(conn);

    let err = open_db(&path).expect_err("clashing name must fail the migration");
    match err {
        DbError::Migration { version, .. } => assert_eq!(version, 1),
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).expect("raw reopen should succeed");
    assert_eq!(schema_version(&conn), 0);
}

#[test]
fn storage_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().expect("raw open should succeed");
    let err = SqliteStorage::try_new(&conn)
        .err()
        .expect("unmigrated connection must be rejected");
    assert!(matches!(err, StorageError::Unavailable(_)));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .expect("user_version should be readable")
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .expect("sqlite_master should be readable");
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
