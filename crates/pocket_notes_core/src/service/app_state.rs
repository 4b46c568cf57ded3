//! Application state and its pure reducer.
//!
//! # Responsibility
//! - Hold notes plus transient UI state as one explicit value.
//! - Compute the next state for every user action without side effects.
//!
//! # Invariants
//! - New notes are prepended; deletes keep the relative order of the rest.
//! - Only `Submit` and `Delete` can change the note collection.
//! - Blank submissions and deletes of unknown ids leave state untouched.

use crate::model::note::{Note, NoteId};
use crate::model::tag::{normalize_tag, parse_tags};

/// Notes plus transient UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub notes: Vec<Note>,
    /// Free-text search, not persisted.
    pub search: String,
    /// Single active tag filter, not persisted.
    pub active_tag: Option<String>,
}

impl AppState {
    /// Creates state over a loaded collection with default UI state.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            ..Self::default()
        }
    }
}

/// User interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Form submission. `tags` is raw tag input.
    Submit {
        text: String,
        tags: String,
        id: NoteId,
        created_at: i64,
    },
    Delete(NoteId),
    Search(String),
    /// Tag chip click: toggles the active tag.
    ClickTag(String),
    /// "All" chip click.
    ClearTag,
}

/// What a reduction changed, used to decide persistence and repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    None,
    /// UI state changed; notes untouched.
    View,
    /// Note collection changed; must be persisted.
    Notes,
}

/// Computes the next state for `action`.
pub fn reduce(state: &AppState, action: Action) -> (AppState, Change) {
    match action {
        Action::Submit {
            text,
            tags,
            id,
            created_at,
        } => match Note::with_id(id, text.as_str(), created_at, parse_tags(tags.as_str())) {
            Ok(note) => {
                let mut notes = Vec::with_capacity(state.notes.len() + 1);
                notes.push(note);
                notes.extend(state.notes.iter().cloned());
                (
                    AppState {
                        notes,
                        ..state.clone()
                    },
                    Change::Notes,
                )
            }
            Err(_) => (state.clone(), Change::None),
        },
        Action::Delete(id) => match state.notes.iter().position(|note| note.id == id) {
            Some(index) => {
                let mut next = state.clone();
                next.notes.remove(index);
                (next, Change::Notes)
            }
            None => (state.clone(), Change::None),
        },
        Action::Search(search) => {
            if state.search == search {
                return (state.clone(), Change::None);
            }
            (
                AppState {
                    search,
                    ..state.clone()
                },
                Change::View,
            )
        }
        Action::ClickTag(tag) => {
            let Some(tag) = normalize_tag(tag.as_str()) else {
                return (state.clone(), Change::None);
            };
            let active_tag = if state.active_tag.as_deref() == Some(tag.as_str()) {
                None
            } else {
                Some(tag)
            };
            (
                AppState {
                    active_tag,
                    ..state.clone()
                },
                Change::View,
            )
        }
        Action::ClearTag => {
            if state.active_tag.is_none() {
                return (state.clone(), Change::None);
            }
            (
                AppState {
                    active_tag: None,
                    ..state.clone()
                },
                Change::View,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, Action, AppState, Change};
    use uuid::Uuid;

    fn submit(text: &str, tags: &str, created_at: i64) -> Action {
        Action::Submit {
            text: text.to_string(),
            tags: tags.to_string(),
            id: Uuid::new_v4(),
            created_at,
        }
    }

    #[test]
    fn submit_prepends_and_parses_tags() {
        let (state, _) = reduce(&AppState::default(), submit("first", "", 1));
        let (state, change) = reduce(&state, submit("  second ", "#Work", 2));
        assert_eq!(change, Change::Notes);
        assert_eq!(state.notes[0].text, "second");
        assert_eq!(state.notes[0].tags, vec!["work".to_string()]);
        assert_eq!(state.notes[1].text, "first");
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let (state, change) = reduce(&AppState::default(), submit(" \n ", "work", 1));
        assert_eq!(change, Change::None);
        assert!(state.notes.is_empty());
    }

    #[test]
    fn click_tag_toggles_and_clear_resets() {
        let (state, change) = reduce(&AppState::default(), Action::ClickTag("work".into()));
        assert_eq!(change, Change::View);
        assert_eq!(state.active_tag.as_deref(), Some("work"));

        let (state, _) = reduce(&state, Action::ClickTag("home".into()));
        assert_eq!(state.active_tag.as_deref(), Some("home"));

        let (state, _) = reduce(&state, Action::ClickTag("home".into()));
        assert_eq!(state.active_tag, None);

        let (state, _) = reduce(&state, Action::ClickTag("work".into()));
        let (state, change) = reduce(&state, Action::ClearTag);
        assert_eq!(change, Change::View);
        assert_eq!(state.active_tag, None);
    }

    #[test]
    fn search_updates_view_only() {
        let (state, change) = reduce(&AppState::default(), Action::Search("cat".into()));
        assert_eq!(change, Change::View);
        assert_eq!(state.search, "cat");

        let (_, change) = reduce(&state, Action::Search("cat".into()));
        assert_eq!(change, Change::None);
    }
}
