use tremote::cli::Command;
use tremote::commands::run;
use tremote::error::CliError;

use client_core::config::ClientConfig;

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers success with fixed arguments, echoing the request tag.
struct Daemon(Value);

impl Respond for Daemon {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "arguments": self.0,
            "tag": body["tag"],
        }))
    }
}

async fn daemon_answering(method_name: &str, arguments: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": method_name})))
        .respond_with(Daemon(arguments))
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.daemon.host = server.address().ip().to_string();
    config.daemon.port = server.address().port();
    config.daemon.timeout_secs = 5;
    config
}

async fn run_command(command: Command, server: &MockServer) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(&command, &config_for(server), &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

/// **VALUE**: Verifies `tremote list` end to end: config → session → HTTP → rendering.
///
/// **WHY THIS MATTERS**: Each layer is unit tested alone; this catches them disagreeing
/// (wrong URL from the config, arguments the renderer cannot use).
///
/// **BUG THIS CATCHES**: Would catch the CLI building its connection from something other
/// than the loaded config, or `list` asking for fields the table does not show.
#[tokio::test]
async fn given_daemon_with_torrents_when_list_run_then_table_printed() {
    // GIVEN: A daemon with one torrent
    let server = daemon_answering(
        "torrent-get",
        json!({"torrents": [{"id": 12, "name": "ubuntu.iso", "status": 6, "sizeWhenDone": 2048}]}),
    )
    .await;

    // WHEN: Listing
    let text = run_command(Command::List, &server).await.unwrap();

    // THEN: The torrent and the totals line
    assert!(text.contains("ubuntu.iso"));
    assert!(text.contains("Seeding"));
    assert!(text.contains("1 torrents"));
}

#[tokio::test]
async fn given_missing_torrent_when_show_run_then_input_error() {
    let server = daemon_answering("torrent-get", json!({"torrents": []})).await;

    let result = run_command(Command::Show { id: 99 }, &server).await;

    assert!(matches!(result, Err(CliError::Input { .. })));
}

#[tokio::test]
async fn given_session_set_when_run_then_sparse_session_set_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "session-set",
            "arguments": {"alt-speed-enabled": true}
        })))
        .respond_with(Daemon(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::SessionSet {
        field: "alt-speed-enabled".to_string(),
        value: "true".to_string(),
    };
    run_command(command, &server).await.unwrap();
}

#[tokio::test]
async fn given_port_test_when_run_then_state_printed() {
    let server = daemon_answering("port-test", json!({"port-is-open": false})).await;

    let text = run_command(Command::PortTest, &server).await.unwrap();

    assert_eq!(text, "Peer port is closed\n");
}

#[tokio::test]
async fn given_unreachable_daemon_when_command_run_then_core_error() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);
    let mut out = Vec::new();

    let result = run(&Command::Stats, &config, &mut out).await;

    assert!(matches!(result, Err(CliError::Core(_))));
    assert!(out.is_empty());
}
