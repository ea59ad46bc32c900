use std::fs;
use std::path::PathBuf;

use profile_terminal::state::Submissions;
use profile_terminal::stats_load::parse_member_stats_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_member_stats_fixture() {
    let raw = read_fixture("member_stats.json");
    let stats = parse_member_stats_json(&raw).expect("fixture should parse");

    let copilot = stats.copilot.as_ref().expect("copilot track should exist");
    assert_eq!(copilot.fulfillment, Some(94.0));

    let develop = stats.develop.as_ref().expect("develop track should exist");
    assert_eq!(develop.sub_tracks.len(), 4);

    let code = &develop.sub_tracks[0];
    assert_eq!(code.name, "CODE");
    assert_eq!(code.rating(), Some(1923.0));
    assert_eq!(code.submission_count(), Some(87.0));

    // FIRST_2_FINISH has a plain count and an explicit null rank.
    let f2f = &develop.sub_tracks[1];
    assert!(f2f.rank.is_none());
    assert!(matches!(&f2f.submissions, Some(Submissions::Count(n)) if *n == 133.0));

    let data_science = stats
        .data_science
        .as_ref()
        .expect("data science track should exist");
    assert_eq!(
        data_science.srm.as_ref().and_then(|s| s.rating()),
        Some(1448.0)
    );
    assert_eq!(
        data_science.marathon_match.as_ref().and_then(|s| s.rating()),
        Some(0.0)
    );
}

#[test]
fn array_payload_takes_first_element() {
    let raw = read_fixture("member_stats_array.json");
    let stats = parse_member_stats_json(&raw).expect("fixture should parse");
    assert!(stats.develop.is_some());
    // The second element's DESIGN track must not leak through.
    assert!(stats.design.is_none());
}

#[test]
fn null_and_empty_are_empty_records() {
    assert!(parse_member_stats_json("null").expect("null should parse").is_empty());
    assert!(parse_member_stats_json("").expect("empty should parse").is_empty());
    assert!(parse_member_stats_json("  \n ").expect("blank should parse").is_empty());
    assert!(parse_member_stats_json("[]").expect("empty array should parse").is_empty());
}

#[test]
fn unknown_fields_are_ignored() {
    let raw = r#"{"DEVELOP":{"subTracks":[],"totallyNew":true},"FUTURE_TRACK":{}}"#;
    let stats = parse_member_stats_json(raw).expect("unknown fields should parse");
    assert!(stats.develop.is_some());
}

#[test]
fn null_subtracks_is_empty_list() {
    let raw = r#"{"DEVELOP":{"subTracks":null}}"#;
    let stats = parse_member_stats_json(raw).expect("null subTracks should parse");
    assert!(stats.develop.expect("develop should exist").sub_tracks.is_empty());
}

#[test]
fn malformed_submissions_degrades_to_absent() {
    let raw = r#"{"DEVELOP":{"subTracks":[{"name":"CODE","submissions":"many"}]}}"#;
    let stats = parse_member_stats_json(raw).expect("odd submissions should still parse");
    let develop = stats.develop.expect("develop should exist");
    assert_eq!(develop.sub_tracks[0].submission_count(), None);
}
