//! Key-value slot storage.
//!
//! # Responsibility
//! - Define the string-keyed slot contract the note store persists through.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - `set_item` replaces the whole slot value; there are no partial writes.
//! - A missing slot reads as `Ok(None)`, never as an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused the operation (quota, read-only medium, ...).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed slot storage, modeled after browser local storage.
pub trait KeyValueStorage {
    /// Reads one slot. Returns `None` when the slot was never written.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Overwrites one slot.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
