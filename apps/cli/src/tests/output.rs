use crate::output::{
    format_eta, format_ratio, format_size, write_metainfo, write_stats, write_torrent_details,
    write_torrent_list,
};

use client_core::MetaInfo;

use models::{SessionStats, Torrent};

use serde_json::json;

fn render(write: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
    let mut out = Vec::new();
    write(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn torrent(value: serde_json::Value) -> Torrent {
    serde_json::from_value(value).unwrap()
}

#[test]
fn given_byte_counts_when_formatted_then_binary_units() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(1023), "1023 B");
    assert_eq!(format_size(1536), "1.5 KiB");
    assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GiB");
    assert_eq!(format_size(-1), "?");
}

/// **VALUE**: Verifies the daemon's negative sentinels never render as durations.
///
/// **BUG THIS CATCHES**: Would catch `-1` (not available) being cast to a huge
/// unsigned duration and shown as "584942417355years".
#[test]
fn given_sentinel_values_when_formatted_then_dash() {
    assert_eq!(format_eta(-1), "-");
    assert_eq!(format_eta(-2), "-");
    assert_eq!(format_eta(90), "1m 30s");
    assert_eq!(format_ratio(-1.0), "-");
    assert_eq!(format_ratio(1.5), "1.50");
}

#[test]
fn given_torrents_when_listed_then_one_row_each_plus_totals() {
    // GIVEN: A healthy torrent and a failing one
    let torrents = vec![
        torrent(json!({
            "id": 1, "name": "debian.iso", "status": 4,
            "sizeWhenDone": 1000, "leftUntilDone": 250,
            "rateDownload": 2048, "rateUpload": 1024, "uploadRatio": 0.5
        })),
        torrent(json!({
            "id": 2, "name": "broken", "status": 0,
            "error": 3, "errorString": "No data found"
        })),
    ];

    // WHEN: Rendering
    let text = render(|out| write_torrent_list(out, &torrents));

    // THEN: Header, two rows, totals
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("75.0%"));
    assert!(lines[1].contains("Downloading"));
    assert!(lines[1].ends_with("debian.iso"));
    assert!(lines[2].contains("Error: No data found"));
    assert!(lines[3].starts_with("2 torrents, down 2.0 KiB/s, up 1.0 KiB/s"));
}

#[test]
fn given_torrent_with_files_when_detailed_then_unwanted_files_marked() {
    let torrent = torrent(json!({
        "id": 7, "name": "album", "status": 6,
        "files": [
            {"name": "album/01.flac", "length": 100, "bytesCompleted": 100},
            {"name": "album/cover.jpg", "length": 10, "bytesCompleted": 0}
        ],
        "fileStats": [
            {"bytesCompleted": 100, "wanted": true, "priority": 0},
            {"bytesCompleted": 0, "wanted": false, "priority": 0}
        ],
        "labels": ["music"]
    }));

    let text = render(|out| write_torrent_details(out, &torrent));

    assert!(text.contains("Status:    Seeding"));
    assert!(text.contains("Labels:    music"));
    assert!(text.contains("album/01.flac\n"));
    assert!(text.contains("album/cover.jpg  (skipped)"));
}

#[test]
fn given_stats_without_downloads_when_rendered_then_ratio_dash() {
    let stats: SessionStats = serde_json::from_value(json!({
        "torrentCount": 3, "activeTorrentCount": 1, "pausedTorrentCount": 2,
        "cumulative-stats": {"uploadedBytes": 2048, "downloadedBytes": 1024, "secondsActive": 3600},
        "current-stats": {"uploadedBytes": 10}
    }))
    .unwrap();

    let text = render(|out| write_stats(out, &stats));

    assert!(text.starts_with("Torrents: 3 (1 active, 2 paused)"));
    assert!(text.contains("  Ratio:      -"));
    assert!(text.contains("  Ratio:      2.00"));
    assert!(text.contains("  Active:     1h"));
}

#[test]
fn given_multi_file_torrent_when_inspected_then_files_and_hash_listed() {
    // GIVEN: d8:announce...4:infod5:filesl...e4:name...12:piece lengthi16384e6:pieces20:...ee
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"d8:announce23:http://tracker.test/ann4:infod5:filesl");
    bytes.extend_from_slice(b"d6:lengthi3e4:pathl1:aeed6:lengthi5e4:pathl3:sub1:beee");
    bytes.extend_from_slice(b"4:name3:dir12:piece lengthi16384e6:pieces20:");
    bytes.extend_from_slice(&[0u8; 20]);
    bytes.extend_from_slice(b"ee");
    let metainfo = MetaInfo::from_bytes(&bytes).unwrap();

    // WHEN: Rendering
    let text = render(|out| write_metainfo(out, &metainfo));

    // THEN: Name, size, both files, tracker
    assert!(text.contains("Name:         dir"));
    assert!(text.contains("Size:         8 B"));
    assert!(text.contains("Pieces:       1 x 16.0 KiB"));
    assert!(text.contains("  http://tracker.test/ann"));
    assert!(text.contains("sub/b"));
    assert!(text.contains(&metainfo.info_hash_hex()));
}
