use crate::daemon::helpers::{
    EchoTag, RPC_PATH, TEST_SESSION_ID, mount_daemon, received_bodies, session_for,
};

use client_core::rpc::Ids;
use client_core::rpc::request::AddOptions;
use client_core::rpc::response::AddOutcome;
use client_core::transport::SESSION_ID_HEADER;

use models::{FieldSet, TorrentMutator};

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn given_torrents_on_daemon_when_listed_then_typed_and_lenient() {
    let server = MockServer::start().await;
    mount_daemon(
        &server,
        json!({"torrents": [
            {"id": 1, "name": "debian.iso", "status": 4, "sizeWhenDone": 100, "leftUntilDone": 25},
            {"id": 2, "name": "new-field-daemon", "someFutureField": [1, 2]}
        ]}),
    )
    .await;
    let session = session_for(&server);

    let torrents = session.list_torrents().await.unwrap();

    assert_eq!(torrents.len(), 2);
    assert_eq!(torrents[0].percent_done(), 0.75);
    assert_eq!(torrents[1].name, "new-field-daemon");

    let bodies = received_bodies(&server).await;
    let request = bodies.last().unwrap();
    assert_eq!(request["method"], "torrent-get");
    assert!(request["arguments"].get("ids").is_none());
    let fields = request["arguments"]["fields"].as_array().unwrap();
    assert!(fields.contains(&json!("leftUntilDone")));
}

/// **VALUE**: Verifies a mutator reaches the daemon as a sparse `torrent-set`.
///
/// **WHY THIS MATTERS**: Sending untouched fields would overwrite settings another client
/// changed in the meantime.
///
/// **BUG THIS CATCHES**: Would catch unchanged fields being serialized, or the ids not
/// reaching the daemon.
#[tokio::test]
async fn given_dirty_mutator_when_applied_then_only_changed_fields_sent() {
    // GIVEN: A daemon expecting exactly these arguments
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header(SESSION_ID_HEADER, TEST_SESSION_ID))
        .and(body_partial_json(json!({
            "method": "torrent-set",
            "arguments": {"ids": [3, 4], "uploadLimit": 50, "uploadLimited": true}
        })))
        .respond_with(EchoTag { arguments: json!({}) })
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_daemon(&server, json!({})).await;
    let session = session_for(&server);

    let mut mutator = TorrentMutator::new();
    mutator.set_field("uploadLimit", 50).unwrap();
    mutator.set_field("uploadLimited", "true").unwrap();

    // WHEN: Applying
    let sent = session.mutate_torrents(vec![3, 4], &mut mutator).await.unwrap();

    // THEN: Sent once, mutator clean, no stray fields
    assert!(sent);
    assert!(!mutator.has_changes());
    let bodies = received_bodies(&server).await;
    let arguments = bodies.last().unwrap()["arguments"].as_object().unwrap().clone();
    let mut keys: Vec<_> = arguments.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["ids", "uploadLimit", "uploadLimited"]);
}

#[tokio::test]
async fn given_magnet_link_when_added_then_filename_sent_and_outcome_returned() {
    let server = MockServer::start().await;
    mount_daemon(
        &server,
        json!({"torrent-added": {"id": 9, "name": "ubuntu", "hashString": "abc"}}),
    )
    .await;
    let session = session_for(&server);

    let outcome = session
        .add_torrent_link(
            "magnet:?xt=urn:btih:abc",
            AddOptions::default().with_download_dir("/srv/downloads"),
        )
        .await
        .unwrap();

    assert!(matches!(outcome, AddOutcome::Added(ref t) if t.id == 9 && t.name == "ubuntu"));
    let bodies = received_bodies(&server).await;
    let arguments = &bodies.last().unwrap()["arguments"];
    assert_eq!(arguments["filename"], "magnet:?xt=urn:btih:abc");
    assert_eq!(arguments["download-dir"], "/srv/downloads");
}

#[tokio::test]
async fn given_actions_when_sent_then_method_names_and_ids_match() {
    let server = MockServer::start().await;
    mount_daemon(&server, json!({})).await;
    let session = session_for(&server);

    session.start_torrents(Ids::All).await.unwrap();
    session.stop_torrents(vec![1]).await.unwrap();
    session.verify_torrents(2_i64).await.unwrap();
    session.reannounce_torrents(Ids::RecentlyActive).await.unwrap();
    session.remove_torrents(vec![5], true).await.unwrap();
    session.set_location(vec![6], "/mnt/new", true).await.unwrap();

    let bodies = received_bodies(&server).await;
    let calls: Vec<_> = bodies
        .iter()
        .skip(1)
        .map(|b| (b["method"].as_str().unwrap().to_owned(), b["arguments"].clone()))
        .collect();

    assert_eq!(calls[0].0, "torrent-start");
    assert!(calls[0].1.get("ids").is_none());
    assert_eq!(calls[1], ("torrent-stop".to_owned(), json!({"ids": [1]})));
    assert_eq!(calls[2], ("torrent-verify".to_owned(), json!({"ids": [2]})));
    assert_eq!(
        calls[3],
        ("torrent-reannounce".to_owned(), json!({"ids": "recently-active"}))
    );
    assert_eq!(
        calls[4],
        ("torrent-remove".to_owned(), json!({"ids": [5], "delete-local-data": true}))
    );
    assert_eq!(
        calls[5],
        (
            "torrent-set-location".to_owned(),
            json!({"ids": [6], "location": "/mnt/new", "move": true})
        )
    );
}
