use crate::{HttpStatusCode, StatusClass};

/// **VALUE**: Verifies the status codes the session loop branches on are classified correctly.
///
/// **WHY THIS MATTERS**: A 409 misread as an ordinary failure would break the token
/// handshake; a 421 misread as transport noise would hide a misconfigured host whitelist.
///
/// **BUG THIS CATCHES**: Would catch any reshuffle of the classification table.
#[test]
fn given_protocol_status_codes_when_classified_then_map_to_expected_class() {
    assert_eq!(HttpStatusCode(200).classify(), StatusClass::Success);
    assert_eq!(HttpStatusCode(409).classify(), StatusClass::SessionConflict);
    assert_eq!(HttpStatusCode(401).classify(), StatusClass::Unauthorized);
    assert_eq!(HttpStatusCode(403).classify(), StatusClass::Misdirected);
    assert_eq!(HttpStatusCode(421).classify(), StatusClass::Misdirected);
    assert_eq!(HttpStatusCode(500).classify(), StatusClass::Unexpected);
    assert_eq!(HttpStatusCode(204).classify(), StatusClass::Unexpected);
}

#[test]
fn given_status_ranges_when_checked_then_client_and_server_errors_are_disjoint() {
    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(404).is_server_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(200).is_client_error());
}
