//! Core domain logic for Pocket Notes.
//! This crate is the single source of truth for note, tag and store invariants.

pub mod cache;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;
pub mod view;

pub use cache::asset_cache::{
    AssetCache, AssetResponse, CacheError, CacheStorage, FetchError, Fetcher, ASSETS_TO_CACHE,
    CACHE_NAME,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::tag::{normalize_tags, parse_tags};
pub use repo::note_store::{NoteStore, StoreError, StoreResult, StoreVersion};
pub use search::query::{distinct_tags, visible_notes};
pub use service::app_state::{reduce, Action, AppState, Change};
pub use service::notes_app::NotesApp;
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use view::render::{
    render, render_text, ChipTarget, NoteRow, TagChip, ViewModel, ALL_CHIP_LABEL,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
