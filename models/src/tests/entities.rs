use crate::{FieldSet, Priority, SessionSettings, SessionStats, Torrent, TorrentStatus};

use std::sync::{Arc, Mutex};

use serde_json::json;

/// **VALUE**: Verifies torrent records tolerate unknown fields and missing fields.
///
/// **WHY THIS MATTERS**: `torrent-get` returns only requested fields, and newer daemons add
/// fields older clients have never heard of. Either case failing would blank the list.
///
/// **BUG THIS CATCHES**: Would catch `deny_unknown_fields` or a missing `#[serde(default)]`.
#[test]
fn given_partial_torrent_json_with_unknown_fields_when_deserialized_then_succeeds() {
    let value = json!({
        "id": 3,
        "name": "debian.iso",
        "status": 4,
        "sizeWhenDone": 1000,
        "leftUntilDone": 250,
        "someFutureField": {"nested": true},
        "peer-limit": 50,
        "fileStats": [{"bytesCompleted": 10, "wanted": true, "priority": 1}]
    });

    let torrent: Torrent = serde_json::from_value(value).unwrap();

    assert_eq!(torrent.id, 3);
    assert_eq!(torrent.peer_limit, 50);
    assert_eq!(torrent.status_kind(), TorrentStatus::Download);
    assert_eq!(torrent.file_stats[0].priority_kind(), Priority::High);
    assert!((torrent.percent_done() - 0.75).abs() < f64::EPSILON);
}

/// **VALUE**: Verifies a declared field with the wrong type fails the decode.
///
/// **BUG THIS CATCHES**: Would catch lenient parsing that turns `"name": 5` into an empty
/// name and hides a misbehaving daemon.
#[test]
fn given_wrong_type_for_declared_field_when_deserialized_then_fails() {
    let result: Result<Torrent, _> = serde_json::from_value(json!({"id": "three"}));

    assert!(result.is_err());
}

#[test]
fn given_zero_size_when_percent_done_computed_then_returns_zero() {
    let torrent = Torrent::default();

    assert_eq!(torrent.percent_done(), 0.0);
}

/// **VALUE**: Verifies setting the raw status notifies the derived enumerated view too.
///
/// **WHY THIS MATTERS**: The list shows the status label, bound to `statusKind`. If only
/// `status` is notified, the label never refreshes while the daemon moves from checking to
/// downloading.
///
/// **BUG THIS CATCHES**: Would catch a missing entry in the dependency table.
#[test]
fn given_live_torrent_when_status_set_then_status_and_status_kind_notified() {
    // GIVEN: A torrent with an observer recording notifications
    let mut torrent = Torrent::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    torrent.subscribe(move |field| sink.lock().unwrap().push(field.to_string()));

    // WHEN: Setting status from a string value
    let changed = torrent.set_field("status", "6").unwrap();

    // THEN: Value coerced, both fields notified exactly once
    assert!(changed);
    assert_eq!(torrent.status_kind(), TorrentStatus::Seed);
    assert_eq!(*seen.lock().unwrap(), vec!["status", "statusKind"]);
}

#[test]
fn given_live_torrent_when_left_until_done_set_then_percent_done_notified() {
    let mut torrent = Torrent::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    torrent.subscribe(move |field| sink.lock().unwrap().push(field.to_string()));

    torrent.set_field("leftUntilDone", 10).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["leftUntilDone", "percentDone"]);
}

#[test]
fn given_unknown_status_code_when_mapped_then_keeps_raw_value() {
    assert_eq!(TorrentStatus::from_raw(42), TorrentStatus::Unknown(42));
    assert!(TorrentStatus::Download.is_active());
    assert!(!TorrentStatus::Stopped.is_active());
}

#[test]
fn given_kebab_case_session_json_when_deserialized_then_maps_fields() {
    let settings: SessionSettings = serde_json::from_value(json!({
        "version": "4.0.5",
        "rpc-version": 17,
        "download-dir": "/data",
        "speed-limit-down": 500,
        "seedRatioLimit": 2.5,
        "encryption": "required"
    }))
    .unwrap();

    assert_eq!(settings.rpc_version, 17);
    assert_eq!(settings.download_dir, "/data");
    assert_eq!(settings.speed_limit_down, 500);
    assert_eq!(settings.seed_ratio_limit, 2.5);
    assert_eq!(settings.encryption_mode(), crate::EncryptionMode::Required);
}

#[test]
fn given_session_stats_json_when_deserialized_then_reads_nested_totals() {
    let stats: SessionStats = serde_json::from_value(json!({
        "activeTorrentCount": 2,
        "torrentCount": 5,
        "downloadSpeed": 1024,
        "cumulative-stats": {"uploadedBytes": 300, "downloadedBytes": 100},
        "current-stats": {"sessionCount": 1}
    }))
    .unwrap();

    assert_eq!(stats.torrent_count, 5);
    assert_eq!(stats.cumulative_stats.ratio(), Some(3.0));
    assert_eq!(stats.current_stats.ratio(), None);
}
