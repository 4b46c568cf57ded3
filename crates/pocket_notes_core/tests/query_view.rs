use pocket_notes_core::{
    distinct_tags, render, visible_notes, AppState, ChipTarget, Note, ALL_CHIP_LABEL,
};
use uuid::Uuid;

fn note(text: &str, created_at: i64, tags: &[&str]) -> Note {
    Note::with_id(
        Uuid::new_v4(),
        text,
        created_at,
        tags.iter().map(|tag| tag.to_string()).collect(),
    )
    .expect("test note should be valid")
}

fn texts(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|note| note.text.as_str()).collect()
}

#[test]
fn search_matches_case_insensitive_substring() {
    let notes = vec![note("category", 1, &[]), note("dog", 2, &[])];
    assert_eq!(texts(&visible_notes(&notes, "cat", None)), vec!["category"]);
    assert_eq!(texts(&visible_notes(&notes, "CAT", None)), vec!["category"]);
}

#[test]
fn blank_search_keeps_everything() {
    let notes = vec![note("one", 1, &[]), note("two", 2, &[])];
    assert_eq!(visible_notes(&notes, "   ", None).len(), 2);
}

#[test]
fn active_tag_keeps_only_tagged_notes() {
    let notes = vec![note("first", 1, &["work"]), note("second", 2, &["home"])];
    assert_eq!(
        texts(&visible_notes(&notes, "", Some("work"))),
        vec!["first"]
    );
}

#[test]
fn text_and_tag_filters_combine() {
    let notes = vec![
        note("work call", 1, &["work"]),
        note("work lunch", 2, &["home"]),
        note("read", 3, &["work"]),
    ];
    assert_eq!(
        texts(&visible_notes(&notes, "work", Some("work"))),
        vec!["work call"]
    );
}

#[test]
fn results_are_newest_first() {
    let notes = vec![note("five", 5, &[]), note("ten", 10, &[]), note("one", 1, &[])];
    assert_eq!(
        texts(&visible_notes(&notes, "", None)),
        vec!["ten", "five", "one"]
    );
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(visible_notes(&[], "x", Some("y")).is_empty());
    assert!(distinct_tags(&[]).is_empty());
}

#[test]
fn distinct_tags_is_sorted_union() {
    let notes = vec![note("a", 1, &["work", "b"]), note("b", 2, &["a", "work"])];
    assert_eq!(distinct_tags(&notes), vec!["a", "b", "work"]);
}

#[test]
fn chips_start_with_all_then_sorted_tags() {
    let state = AppState::with_notes(vec![
        note("a", 1, &["work"]),
        note("b", 2, &["errands"]),
    ]);
    let view = render(&state);

    let labels = view
        .chips
        .iter()
        .map(|chip| chip.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec![ALL_CHIP_LABEL, "#errands", "#work"]);
    assert!(view.chips[0].selected);
    assert_eq!(view.chips[0].target, ChipTarget::All);
    assert!(view.chips[1..].iter().all(|chip| !chip.selected));
}

#[test]
fn active_tag_selects_its_chip_and_filters_rows() {
    let work = note("a", 1, &["work"]);
    let mut state = AppState::with_notes(vec![work.clone(), note("b", 2, &["errands"])]);
    state.active_tag = Some("work".to_string());
    let view = render(&state);

    assert!(!view.chips[0].selected);
    let selected = view
        .chips
        .iter()
        .filter(|chip| chip.selected)
        .map(|chip| chip.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(selected, vec!["#work"]);

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].id, work.id);
    assert_eq!(view.rows[0].tag_labels, vec!["#work".to_string()]);
}

#[test]
fn chip_vocabulary_ignores_filters() {
    let mut state = AppState::with_notes(vec![
        note("alpha", 1, &["x"]),
        note("beta", 2, &["y"]),
    ]);
    state.search = "alpha".to_string();
    let view = render(&state);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.chips.len(), 3);
}
