//! Persistence of the note collection.
//!
//! # Responsibility
//! - Map notes onto versioned JSON slots.
//! - Isolate legacy schema handling from the app layer.

pub mod note_store;
