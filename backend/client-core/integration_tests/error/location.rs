use client_core::bencode::decoder::decode_bytes;
use client_core::{CoreError, DecodeError, ErrorKind, MetaInfo, SessionError};

use common::HttpStatusCode;

use std::time::Duration;

/// **VALUE**: Verifies session errors carry the file/line where they were raised.
///
/// **WHY THIS MATTERS**: "Transport Error: connection refused" alone does not say whether
/// the probe, a mutation or a poll failed. The location does.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being dropped from a constructor
/// (the location would then point into the error module) or the Display impl losing
/// the location.
#[test]
fn given_session_error_constructed_here_when_formatted_then_location_points_here() {
    // GIVEN: Errors built through the public constructors
    let errors = [
        SessionError::transport(Some(HttpStatusCode(502)), "bad gateway"),
        SessionError::timeout(Duration::from_secs(3)),
        SessionError::authorization("rejected"),
        SessionError::handshake_exhausted(3),
    ];

    for error in errors {
        // WHEN: Formatting
        let text = error.to_string();

        // THEN: Names this file
        assert!(text.contains("location.rs"), "no location in: {text}");
    }
}

#[test]
fn given_each_session_error_when_classified_then_kind_and_fatality_consistent() {
    let cases = [
        (SessionError::tag_mismatch(1, Some(2)), ErrorKind::ProtocolMismatch, true),
        (SessionError::missing_session_token(), ErrorKind::ProtocolMismatch, true),
        (SessionError::rpc("torrent-add", "duplicate torrent"), ErrorKind::Rpc, false),
        (SessionError::configuration("bad path"), ErrorKind::Configuration, true),
        (SessionError::decode("expected value"), ErrorKind::Decode, false),
        (SessionError::transport(None, "reset"), ErrorKind::Transport, true),
    ];

    for (error, kind, fatal) in cases {
        assert_eq!(error.kind(), kind, "{error}");
        assert_eq!(error.is_fatal(), fatal, "{error}");
    }
}

/// **VALUE**: Verifies decode errors report the byte offset of the problem.
///
/// **BUG THIS CATCHES**: Would catch offsets being lost when errors bubble up from the
/// decoder through [`MetaInfo`] into [`CoreError`].
#[test]
fn given_corrupt_torrent_when_loaded_then_core_error_reports_offset() {
    // GIVEN: An integer with a leading zero at offset 3
    let corrupt = b"d1:ai01ee";

    // WHEN: Decoding directly and through MetaInfo
    let direct = decode_bytes(corrupt).unwrap_err();
    let wrapped: CoreError = MetaInfo::from_bytes(corrupt).unwrap_err().into();

    // THEN: Both are syntax errors naming the position
    assert!(matches!(direct, DecodeError::Syntax { offset, .. } if offset >= 4));
    assert!(matches!(wrapped, CoreError::Decode(DecodeError::Syntax { .. })));
    assert!(wrapped.to_string().contains("offset"));
}
