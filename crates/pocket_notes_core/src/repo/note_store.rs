//! Persisted note collection with v1 -> v2 schema migration.
//!
//! # Responsibility
//! - Load the current (v2) note collection from slot storage.
//! - Upgrade legacy (v1) collections once, without touching the v1 slot.
//! - Save the full desired collection on every mutation.
//!
//! # Invariants
//! - `save` always overwrites the v2 slot with the complete sequence.
//! - Migration runs only when the v2 slot holds no entries.
//! - `load` never fails: unreadable or corrupt data reads as an empty list.
//! - The v1 slot is read-only from this module's perspective.
//! - Ids generated for id-less v2 records are written back on the same load.

use crate::model::note::{now_millis, Note, NoteId};
use crate::storage::{KeyValueStorage, StorageError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stored schema generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreVersion {
    /// `{text, ts}` records, no tags.
    V1,
    /// `{text, ts, tags}` records (plus `id` once written by this crate).
    V2,
}

impl StoreVersion {
    /// Version written by `NoteStore::save`.
    pub const CURRENT: Self = Self::V2;

    /// Slot key holding this generation.
    pub fn key(self) -> &'static str {
        match self {
            Self::V1 => "pocket-notes:v1",
            Self::V2 => "pocket-notes:v2",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Note store error. Only raised by writes; reads degrade to empty.
#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredNoteV2 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<NoteId>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    ts: Option<i64>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StoredNoteV1 {
    #[serde(default)]
    text: String,
    #[serde(default)]
    ts: Option<i64>,
}

impl From<&Note> for StoredNoteV2 {
    fn from(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            text: note.text.clone(),
            ts: Some(note.created_at),
            tags: note.tags.clone(),
        }
    }
}

/// Note collection persisted through a `KeyValueStorage`.
pub struct NoteStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> NoteStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrows the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store and returns the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Loads the current collection, migrating legacy data when needed.
    ///
    /// # Side effects
    /// - May write the v2 slot once when a v1 collection is migrated.
    /// - May write the v2 slot once when v2 records arrive without ids.
    pub fn load(&mut self) -> Vec<Note> {
        let current = self.read_entries(StoreVersion::V2);
        if !current.is_empty() {
            let (notes, assigned_ids) = decode_v2(current);
            info!(
                "event=store_load module=store status=ok source=v2 count={}",
                notes.len()
            );
            if assigned_ids > 0 {
                self.persist_assigned_ids(&notes, assigned_ids);
            }
            return notes;
        }

        self.migrate_legacy()
    }

    /// Overwrites the current slot with the full note sequence.
    pub fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let records = notes.iter().map(StoredNoteV2::from).collect::<Vec<_>>();
        let encoded = serde_json::to_string(&records)?;
        self.storage
            .set_item(StoreVersion::CURRENT.key(), encoded.as_str())?;
        debug!(
            "event=store_save module=store status=ok count={}",
            notes.len()
        );
        Ok(())
    }

    /// Writes back notes whose ids were generated during decoding so the
    /// same ids survive the next load.
    fn persist_assigned_ids(&mut self, notes: &[Note], assigned: usize) {
        match self.save(notes) {
            Ok(()) => info!(
                "event=store_assign_ids module=store status=ok assigned={assigned}"
            ),
            Err(err) => warn!(
                "event=store_assign_ids module=store status=error assigned={assigned} error={err}"
            ),
        }
    }

    fn migrate_legacy(&mut self) -> Vec<Note> {
        let legacy = self.read_entries(StoreVersion::V1);
        if legacy.is_empty() {
            debug!("event=store_load module=store status=ok source=empty count=0");
            return Vec::new();
        }

        let migrated = decode_v1(legacy);
        if let Err(err) = self.save(&migrated) {
            warn!(
                "event=store_migrate module=store status=error from=v1 to=v2 count={} error={}",
                migrated.len(),
                err
            );
        } else {
            info!(
                "event=store_migrate module=store status=ok from=v1 to=v2 count={}",
                migrated.len()
            );
        }
        migrated
    }

    /// Reads one slot as a list of raw JSON entries.
    ///
    /// Missing, unreadable, `null`, non-array or malformed values all read as
    /// an empty list.
    fn read_entries(&self, version: StoreVersion) -> Vec<Value> {
        let raw = match self.storage.get_item(version.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=store_read module=store status=error key={} error={}",
                    version.key(),
                    err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(raw.as_str()) {
            Ok(Value::Array(entries)) => entries,
            Ok(Value::Null) => Vec::new(),
            Ok(_) => {
                warn!(
                    "event=store_read module=store status=error key={} error_code=not_an_array",
                    version.key()
                );
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=store_read module=store status=error key={} error_code=invalid_json error={}",
                    version.key(),
                    err
                );
                Vec::new()
            }
        }
    }
}

/// Decodes v2 entries; also returns how many kept notes received a new id.
fn decode_v2(entries: Vec<Value>) -> (Vec<Note>, usize) {
    let now = now_millis();
    let assigned = Cell::new(0usize);
    let notes = decode_each(entries, |record: StoredNoteV2| {
        let id = record.id.unwrap_or_else(Uuid::new_v4);
        let note = Note::with_id(
            id,
            record.text.as_str(),
            record.ts.unwrap_or(now),
            record.tags,
        )
        .ok()?;
        if record.id.is_none() {
            assigned.set(assigned.get() + 1);
        }
        Some(note)
    });
    (notes, assigned.get())
}

fn decode_v1(entries: Vec<Value>) -> Vec<Note> {
    let now = now_millis();
    decode_each(entries, |record: StoredNoteV1| {
        Note::with_id(
            Uuid::new_v4(),
            record.text.as_str(),
            record.ts.unwrap_or(now),
            Vec::new(),
        )
        .ok()
    })
}

fn decode_each<R, F>(entries: Vec<Value>, convert: F) -> Vec<Note>
where
    R: for<'de> Deserialize<'de>,
    F: Fn(R) -> Option<Note>,
{
    let total = entries.len();
    let notes = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<R>(entry).ok())
        .filter_map(convert)
        .collect::<Vec<_>>();

    let dropped = total - notes.len();
    if dropped > 0 {
        warn!(
            "event=store_decode module=store status=partial dropped={dropped} kept={}",
            notes.len()
        );
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, StoreVersion};
    use crate::storage::{KeyValueStorage, MemoryStorage};

    #[test]
    fn null_and_non_array_slots_read_as_empty() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(StoreVersion::V2.key(), "null")
            .expect("memory write should succeed");
        storage
            .set_item(StoreVersion::V1.key(), "{\"text\":\"x\"}")
            .expect("memory write should succeed");

        let mut store = NoteStore::new(storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_entries_are_dropped_individually() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                StoreVersion::V2.key(),
                r#"[{"text":"kept","ts":3,"tags":["A"]},{"text":"   ","ts":4},42]"#,
            )
            .expect("memory write should succeed");

        let mut store = NoteStore::new(storage);
        let notes = store.load();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "kept");
        assert_eq!(notes[0].created_at, 3);
        assert_eq!(notes[0].tags, vec!["a".to_string()]);
    }
}
