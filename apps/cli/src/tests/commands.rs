use crate::commands::daemon::{assign, is_link, parse_value};
use crate::commands::inspect;
use crate::error::CliError;

use client_core::CoreError;

use models::{FieldSet, SessionSettingsMutator, TorrentMutator};

use serde_json::json;
use tempfile::TempDir;

#[test]
fn given_sources_when_classified_then_links_and_files_told_apart() {
    assert!(is_link("magnet:?xt=urn:btih:abc"));
    assert!(is_link("HTTPS://example.org/a.torrent"));
    assert!(!is_link("./downloads/a.torrent"));
    assert!(!is_link("magnet.torrent"));
}

/// **VALUE**: Verifies command-line values reach the mutator with the right JSON type.
///
/// **WHY THIS MATTERS**: `set 3 labels '["a","b"]'` must send an array, while
/// `session-set download-dir /srv` must send a plain string without quoting.
///
/// **BUG THIS CATCHES**: Would catch every value being sent as a string, which the
/// daemon rejects for numeric fields.
#[test]
fn given_raw_values_when_parsed_then_json_where_possible() {
    assert_eq!(parse_value("50"), json!(50));
    assert_eq!(parse_value("true"), json!(true));
    assert_eq!(parse_value(r#"["a","b"]"#), json!(["a", "b"]));
    assert_eq!(parse_value("/srv/downloads"), json!("/srv/downloads"));
}

#[test]
fn given_known_field_when_assigned_then_mutator_dirty_and_sparse() {
    let mut mutator = TorrentMutator::new();

    assign(&mut mutator, "uploadLimit", "50").unwrap();

    assert!(mutator.has_changes());
    assert_eq!(serde_json::to_value(&mutator).unwrap(), json!({"uploadLimit": 50}));
}

#[test]
fn given_unknown_field_when_assigned_then_input_error_lists_known_fields() {
    let mut mutator = SessionSettingsMutator::new();

    let error = assign(&mut mutator, "speed-limit-sideways", "1").unwrap_err();

    assert!(matches!(error, CliError::Input { .. }));
    assert!(error.to_string().contains("speed-limit-down"));
    assert!(!mutator.has_changes());
}

#[test]
fn given_value_of_wrong_type_when_assigned_then_model_error() {
    let mut mutator = TorrentMutator::new();

    let error = assign(&mut mutator, "uploadLimit", "fast").unwrap_err();

    assert!(matches!(error, CliError::Core(CoreError::Model(_))));
}

#[test]
fn given_corrupt_file_when_inspected_then_decode_error_and_no_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.torrent");
    std::fs::write(&path, b"d4:infoi1e").unwrap();
    let mut out = Vec::new();

    let error = inspect::run(&path, &mut out).unwrap_err();

    assert!(matches!(error, CliError::Core(CoreError::Decode(_))));
    assert!(out.is_empty());
}
