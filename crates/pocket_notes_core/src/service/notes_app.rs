//! Notes application driver.
//!
//! # Responsibility
//! - Load state from the note store on open.
//! - Thread actions through `reduce`, persist note changes, re-render.
//!
//! # Invariants
//! - Persistence happens only for `Change::Notes` and always writes the full
//!   collection.
//! - A failed save is logged; in-memory state still advances.

use crate::model::note::{now_millis, NoteId};
use crate::repo::note_store::NoteStore;
use crate::service::app_state::{reduce, Action, AppState, Change};
use crate::storage::KeyValueStorage;
use crate::view::render::{render, ViewModel};
use log::{debug, error};
use uuid::Uuid;

/// Stateful driver over a note store.
pub struct NotesApp<S: KeyValueStorage> {
    store: NoteStore<S>,
    state: AppState,
    view: ViewModel,
}

impl<S: KeyValueStorage> NotesApp<S> {
    /// Loads notes from `storage` (migrating legacy data) and renders once.
    pub fn open(storage: S) -> Self {
        let mut store = NoteStore::new(storage);
        let state = AppState::with_notes(store.load());
        let view = render(&state);
        Self { store, state, view }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Latest rendered view.
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    /// Applies one action and returns what changed.
    pub fn dispatch(&mut self, action: Action) -> Change {
        let (next, change) = reduce(&self.state, action);
        match change {
            Change::None => return change,
            Change::Notes => {
                if let Err(err) = self.store.save(&next.notes) {
                    error!(
                        "event=notes_persist module=app status=error count={} error={}",
                        next.notes.len(),
                        err
                    );
                }
            }
            Change::View => {}
        }

        self.state = next;
        self.view = render(&self.state);
        debug!(
            "event=render module=app status=ok change={:?} rows={} chips={}",
            change,
            self.view.rows.len(),
            self.view.chips.len()
        );
        change
    }

    /// Submits a new note stamped with a fresh id and the current time.
    ///
    /// Returns the id when a note was created, `None` for blank text.
    pub fn submit(&mut self, text: &str, tags: &str) -> Option<NoteId> {
        let id = Uuid::new_v4();
        let change = self.dispatch(Action::Submit {
            text: text.to_string(),
            tags: tags.to_string(),
            id,
            created_at: now_millis(),
        });
        (change == Change::Notes).then_some(id)
    }

    /// Deletes one note. Returns `false` when the id is unknown.
    pub fn delete(&mut self, id: NoteId) -> bool {
        self.dispatch(Action::Delete(id)) == Change::Notes
    }

    pub fn search(&mut self, text: &str) {
        self.dispatch(Action::Search(text.to_string()));
    }

    pub fn click_tag(&mut self, tag: &str) {
        self.dispatch(Action::ClickTag(tag.to_string()));
    }

    pub fn clear_tag(&mut self) {
        self.dispatch(Action::ClearTag);
    }
}
