//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its construction-time validation.
//!
//! # Invariants
//! - `text` is trimmed and non-empty.
//! - `tags` never contains empty or duplicate tokens.
//! - `created_at` is sort/display metadata only; identity lives in `id`.

use crate::model::tag::normalize_tags;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Validation failure while building a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Text is empty after trimming.
    EmptyText,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "note text cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// One user-authored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    /// Unix epoch milliseconds at creation.
    pub created_at: i64,
    pub tags: Vec<String>,
}

impl Note {
    /// Creates a note with a generated id stamped with the current time.
    pub fn new(text: &str, tags: Vec<String>) -> Result<Self, NoteValidationError> {
        Self::with_id(Uuid::new_v4(), text, now_millis(), tags)
    }

    /// Creates a note with caller-provided identity and timestamp.
    ///
    /// Text is trimmed and tags are normalized; blank text is rejected.
    pub fn with_id(
        id: NoteId,
        text: &str,
        created_at: i64,
        tags: Vec<String>,
    ) -> Result<Self, NoteValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NoteValidationError::EmptyText);
        }

        Ok(Self {
            id,
            text: text.to_string(),
            created_at,
            tags: normalize_tags(&tags),
        })
    }

    /// Returns whether this note carries `tag` (exact, already-normalized match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// Falls back to `0` if the system clock is before the unix epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
