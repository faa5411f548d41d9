//! A wiremock daemon that speaks just enough of the RPC protocol:
//! - hands out a session token on 409
//! - echoes the request tag in every answer
//! - records what arrived

use client_core::RpcSession;
use client_core::transport::SESSION_ID_HEADER;
use models::{ConnectionConfig, ConnectionConfigBuilder, Credentials};

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const RPC_PATH: &str = "/transmission/rpc";
pub const TEST_SESSION_ID: &str = "test-session-12345";

/// Answers with `result: success`, the given arguments and the request's tag.
pub struct EchoTag {
    pub arguments: Value,
}

impl Respond for EchoTag {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "arguments": self.arguments,
            "tag": body["tag"],
        }))
    }
}

/// Mount a daemon that wants [`TEST_SESSION_ID`] and answers every
/// tokened request with `arguments`.
pub async fn mount_daemon(server: &MockServer, arguments: Value) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header(SESSION_ID_HEADER, TEST_SESSION_ID))
        .respond_with(EchoTag { arguments })
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(ResponseTemplate::new(409).insert_header(SESSION_ID_HEADER, TEST_SESSION_ID))
        .with_priority(2)
        .mount(server)
        .await;
}

pub fn connection_for(server: &MockServer) -> ConnectionConfig {
    builder_for(server).build().expect("valid connection")
}

pub fn connection_with_credentials(
    server: &MockServer,
    username: &str,
    password: &str,
) -> ConnectionConfig {
    builder_for(server)
        .with_credentials(Credentials::new(username, password))
        .build()
        .expect("valid connection")
}

fn builder_for(server: &MockServer) -> ConnectionConfigBuilder {
    let address = server.address();
    ConnectionConfigBuilder::default()
        .with_host(address.ip().to_string())
        .with_port(address.port())
        .with_timeout(Duration::from_secs(5))
}

pub fn session_for(server: &MockServer) -> RpcSession {
    RpcSession::new(connection_for(server)).expect("HTTP client")
}

/// Parsed JSON bodies of every request the daemon received.
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).expect("JSON request body"))
        .collect()
}
