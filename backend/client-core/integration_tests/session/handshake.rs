use crate::daemon::helpers::{
    EchoTag, RPC_PATH, TEST_SESSION_ID, connection_for, connection_with_credentials, mount_daemon,
    received_bodies, session_for,
};

use client_core::transport::SESSION_ID_HEADER;
use client_core::{ErrorKind, RpcSession, SessionError, SessionState};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the 409 token handshake over real HTTP.
///
/// **WHY THIS MATTERS**: The token travels in a response header and must come back in a
/// request header with exactly the daemon's spelling. Scripted transports cannot catch
/// header-name typos.
///
/// **BUG THIS CATCHES**: Would catch the header being read from or written to the wrong
/// name, or the retry going out without it.
#[tokio::test]
async fn given_daemon_requiring_token_when_opened_then_handshake_completes() {
    // GIVEN: A daemon that answers 409 until the token is presented
    let server = MockServer::start().await;
    mount_daemon(&server, json!({"version": "4.0.6", "rpc-version": 18})).await;
    let session = session_for(&server);

    // WHEN: Opening the session
    let settings = session.open().await.expect("session should open");

    // THEN: Two requests, the second carrying the token, session open
    assert_eq!(settings.version, "4.0.6");
    assert_eq!(session.state(), SessionState::Open);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get(SESSION_ID_HEADER).is_none());
    assert_eq!(
        requests[1].headers.get(SESSION_ID_HEADER).unwrap(),
        TEST_SESSION_ID
    );
    assert_eq!(
        requests[1].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn given_open_session_when_more_requests_sent_then_no_further_409s() {
    let server = MockServer::start().await;
    mount_daemon(&server, json!({"torrents": []})).await;
    let session = session_for(&server);

    session.list_torrents().await.unwrap();
    session.list_torrents().await.unwrap();
    session.list_torrents().await.unwrap();

    // One 409 at the start, then one request per call
    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 4);
    let tags: Vec<_> = bodies.iter().map(|b| b["tag"].as_u64().unwrap()).collect();
    assert_eq!(tags, vec![1, 1, 2, 3]);
}

#[tokio::test]
async fn given_daemon_that_always_conflicts_when_sent_then_handshake_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(ResponseTemplate::new(409).insert_header(SESSION_ID_HEADER, "rotating"))
        .expect(3)
        .mount(&server)
        .await;
    let session = session_for(&server);

    let error = session.session_settings().await.unwrap_err();

    assert!(matches!(error, SessionError::HandshakeExhausted { attempts: 3, .. }));
}

/// **VALUE**: Verifies credentials go out as HTTP Basic auth.
///
/// **BUG THIS CATCHES**: Would catch credentials being dropped on the 409 retry, which
/// makes password-protected daemons answer 401 after every handshake.
#[tokio::test]
async fn given_credentials_when_sending_then_basic_auth_on_every_request() {
    // GIVEN: A daemon that only accepts admin:hunter2
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(basic_auth("admin", "hunter2"))
        .respond_with(EchoTag { arguments: json!({"port-is-open": true}) })
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .with_priority(10)
        .mount(&server)
        .await;

    // WHEN: Sending with the right credentials
    let session = RpcSession::new(connection_with_credentials(&server, "admin", "hunter2")).unwrap();
    let open = session.port_test().await;

    // THEN: Accepted
    assert!(open.unwrap());

    // AND: Wrong credentials map to an authorization failure
    let wrong = RpcSession::new(connection_with_credentials(&server, "admin", "nope")).unwrap();
    let error = wrong.port_test().await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Authorization);
}

#[tokio::test]
async fn given_whitelist_rejection_when_sending_then_configuration_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Unauthorized IP Address."))
        .mount(&server)
        .await;
    let session = session_for(&server);

    let error = session.session_stats().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Configuration);
    assert!(error.is_fatal());
}

#[tokio::test]
async fn given_wrong_rpc_path_when_sending_then_transport_error_with_404() {
    let server = MockServer::start().await;
    let session = session_for(&server);

    let error = session.session_stats().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Transport);
    assert_eq!(error.status().map(|s| s.0), Some(404));
}

#[tokio::test]
async fn given_html_instead_of_json_when_sending_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>router login</html>"))
        .mount(&server)
        .await;
    let session = session_for(&server);

    let error = session.session_stats().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Decode);
}

/// **VALUE**: Verifies a slow daemon is cut off by the configured deadline.
///
/// **BUG THIS CATCHES**: Would catch the deadline not reaching the HTTP call, leaving the
/// caller waiting for however long the daemon takes.
#[tokio::test]
async fn given_slow_daemon_when_sending_then_timeout() {
    // GIVEN: A daemon that needs 2s per answer
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let session = session_for(&server);

    // WHEN: Sending with a 100ms deadline
    let request = client_core::rpc::request::SessionGet::all();
    let error = session
        .send_with_timeout(&request, Duration::from_millis(100))
        .await
        .unwrap_err();

    // THEN: Timed out
    assert_eq!(error.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn given_unreachable_daemon_when_try_open_then_false_and_closed() {
    let server = MockServer::start().await;
    let connection = connection_for(&server);
    drop(server);
    let session = RpcSession::new(connection).unwrap();

    let opened = session.try_open().await;

    assert!(!opened);
    assert_eq!(session.state(), SessionState::Closed);
}
