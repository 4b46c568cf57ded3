//! SQLite-backed slot storage.
//!
//! # Invariants
//! - The connection must come from `open_db`/`open_db_in_memory` so the
//!   `kv_slots` table exists.
//! - Each `set_item` is a single upsert statement.

use super::{KeyValueStorage, StorageError, StorageResult};
use crate::db::migrations::latest_version;
use rusqlite::{params, Connection, OptionalExtension};

/// Slot storage persisted in the `kv_slots` table.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Constructs storage from a migrated/ready connection.
    ///
    /// # Errors
    /// - Returns `StorageError::Unavailable` when the connection schema is
    ///   not at the version this binary expects.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteStorage<'_> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> StorageResult<()> {
    let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected = latest_version();
    if version != expected {
        return Err(StorageError::Unavailable(format!(
            "connection schema version {version} does not match expected {expected}"
        )));
    }
    Ok(())
}
