use std::fs;
use std::path::PathBuf;

use profile_terminal::state::{AppState, TrackId};
use profile_terminal::stats_load::parse_member_stats_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn loaded_state() -> AppState {
    let stats = parse_member_stats_json(&read_fixture("member_stats.json"))
        .expect("fixture should parse");
    let mut state = AppState::new();
    state.show_marathon = false;
    state.set_stats(stats, None);
    state
}

#[test]
fn rows_flatten_tracks_in_display_order() {
    let state = loaded_state();
    // COPILOT(1) + DEVELOP(2) + DESIGN(1) + DATA_SCIENCE(1).
    let rows = state.rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].track_idx, 0);
    assert_eq!(rows[4].track_idx, 3);
}

#[test]
fn selection_clamps_at_both_ends() {
    let mut state = loaded_state();
    state.select_prev();
    assert_eq!(state.selected, 0);

    for _ in 0..20 {
        state.select_next();
    }
    assert_eq!(state.selected, state.rows().len() - 1);
}

#[test]
fn marathon_toggle_recomputes_rows() {
    let mut state = loaded_state();
    let without = state.rows().len();

    state.toggle_marathon();
    // The fixture's zero-rated MARATHON_MATCH entry becomes visible.
    assert_eq!(state.rows().len(), without + 1);

    state.selected = state.rows().len() - 1;
    state.toggle_marathon();
    // Selection clamps when the forced row disappears.
    assert_eq!(state.selected, state.rows().len() - 1);
    assert_eq!(state.rows().len(), without);
}

#[test]
fn selected_entry_pairs_track_and_subtrack() {
    let mut state = loaded_state();
    state.selected = 0;
    let (track, sub) = state.selected_entry().expect("row should exist");
    assert_eq!(track.track, TrackId::Copilot);
    assert_eq!(sub.fulfillment, Some(94.0));

    state.selected = 1;
    let (track, sub) = state.selected_entry().expect("row should exist");
    assert_eq!(track.track, TrackId::Develop);
    // Develop sorts FIRST_2_FINISH (42 wins) ahead of CODE (14 wins).
    assert_eq!(sub.name, "FIRST_2_FINISH");
}

#[test]
fn empty_stats_have_no_selection() {
    let mut state = AppState::new();
    state.show_marathon = false;
    state.set_stats(Default::default(), None);
    assert!(state.rows().is_empty());
    assert!(state.selected_entry().is_none());
    assert_eq!(state.selected, 0);
}

#[test]
fn log_ring_is_bounded() {
    let mut state = AppState::new();
    for idx in 0..250 {
        state.push_log(format!("[INFO] message {idx}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] message 50"));
}
