//! View model rendering.

use crate::model::note::NoteId;
use crate::search::query::{distinct_tags, visible_notes};
use crate::service::app_state::AppState;

/// Label of the synthetic chip that clears the tag filter.
pub const ALL_CHIP_LABEL: &str = "All";
const TAG_MARKER: char = '#';

/// What clicking a chip does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipTarget {
    /// Clear the active tag.
    All,
    /// Toggle this tag as the active filter.
    Tag(String),
}

/// One tag filter chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub label: String,
    pub selected: bool,
    pub target: ChipTarget,
}

/// One visible note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    /// Delete action target.
    pub id: NoteId,
    pub text: String,
    pub created_at: i64,
    /// Tag labels with a leading `#`.
    pub tag_labels: Vec<String>,
}

/// Full display model for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    /// Empty when no note carries any tag.
    pub chips: Vec<TagChip>,
    pub rows: Vec<NoteRow>,
}

/// Projects the current state into a display model.
pub fn render(state: &AppState) -> ViewModel {
    ViewModel {
        chips: render_chips(state),
        rows: render_rows(state),
    }
}

fn render_chips(state: &AppState) -> Vec<TagChip> {
    let tags = distinct_tags(&state.notes);
    if tags.is_empty() {
        return Vec::new();
    }

    let active = state.active_tag.as_deref();
    let mut chips = Vec::with_capacity(tags.len() + 1);
    chips.push(TagChip {
        label: ALL_CHIP_LABEL.to_string(),
        selected: active.is_none(),
        target: ChipTarget::All,
    });
    chips.extend(tags.into_iter().map(|tag| TagChip {
        label: tag_label(&tag),
        selected: active == Some(tag.as_str()),
        target: ChipTarget::Tag(tag),
    }));
    chips
}

fn render_rows(state: &AppState) -> Vec<NoteRow> {
    visible_notes(&state.notes, &state.search, state.active_tag.as_deref())
        .into_iter()
        .map(|note| NoteRow {
            id: note.id,
            tag_labels: note.tags.iter().map(|tag| tag_label(tag)).collect(),
            text: note.text,
            created_at: note.created_at,
        })
        .collect()
}

fn tag_label(tag: &str) -> String {
    format!("{TAG_MARKER}{tag}")
}

/// Renders a view model as plain text.
///
/// Layout: one chip line (selected chip in brackets) when chips exist, then
/// one line per note: `<id> <text> <#tags...>`.
pub fn render_text(view: &ViewModel) -> String {
    let mut lines = Vec::with_capacity(view.rows.len() + 1);

    if !view.chips.is_empty() {
        let chips = view
            .chips
            .iter()
            .map(|chip| {
                if chip.selected {
                    format!("[{}]", chip.label)
                } else {
                    chip.label.clone()
                }
            })
            .collect::<Vec<_>>();
        lines.push(chips.join(" "));
    }

    if view.rows.is_empty() {
        lines.push("(no notes)".to_string());
    }

    lines.extend(view.rows.iter().map(|row| {
        let text = row.text.replace('\n', " ");
        if row.tag_labels.is_empty() {
            format!("{} {text}", row.id)
        } else {
            format!("{} {text} {}", row.id, row.tag_labels.join(" "))
        }
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::{render, render_text, ChipTarget};
    use crate::model::note::Note;
    use crate::service::app_state::AppState;
    use uuid::Uuid;

    fn state_with(notes: Vec<Note>) -> AppState {
        AppState {
            notes,
            ..AppState::default()
        }
    }

    #[test]
    fn chips_hidden_without_tags() {
        let note = Note::with_id(Uuid::new_v4(), "plain", 1, Vec::new()).expect("valid note");
        let view = render(&state_with(vec![note]));
        assert!(view.chips.is_empty());
        assert_eq!(view.rows.len(), 1);
    }

    #[test]
    fn text_projection_marks_selected_chip() {
        let note =
            Note::with_id(Uuid::new_v4(), "tagged", 1, vec!["work".to_string()])
                .expect("valid note");
        let mut state = state_with(vec![note.clone()]);
        state.active_tag = Some("work".to_string());

        let view = render(&state);
        assert_eq!(view.chips[1].target, ChipTarget::Tag("work".to_string()));
        let text = render_text(&view);
        assert!(text.starts_with("All [#work]\n"));
        assert!(text.contains(&format!("{} tagged #work", note.id)));
    }

    #[test]
    fn untagged_rows_have_no_trailing_labels() {
        let older = Note::with_id(Uuid::new_v4(), "line one\nline two", 1, Vec::new())
            .expect("valid note");
        let newer = Note::with_id(Uuid::new_v4(), "newer", 2, Vec::new()).expect("valid note");
        let text = render_text(&render(&state_with(vec![older.clone(), newer.clone()])));
        assert_eq!(
            text,
            format!("{} newer\n{} line one line two\n", newer.id, older.id)
        );
    }

    #[test]
    fn empty_view_says_so() {
        let text = render_text(&render(&AppState::default()));
        assert_eq!(text, "(no notes)\n");
    }
}
