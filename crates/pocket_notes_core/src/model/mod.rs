//! Domain model for pocket notes.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, query and view layers.
//! - Own tag normalization rules.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`, never by its timestamp.
//! - Note text is trimmed and never empty.
//! - Tags are lowercase, non-empty and deduplicated.

pub mod note;
pub mod tag;
