//! Simulated daemons and fixtures shared by the unit tests.

use crate::bencode::{Dictionary, Element, encode};
use crate::error::session::SessionError;
use crate::transport::{Transport, TransportRequest, TransportResponse};

use common::HttpStatusCode;
use models::{ConnectionConfig, ConnectionConfigBuilder};

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};

/// One scripted daemon reaction.
pub enum Reply {
    /// 200 with `result: success`, echoing the request's tag.
    Success(Value),
    /// 200 with the given result string, echoing the tag.
    Result(&'static str),
    /// 200 with a fixed body, tag not echoed.
    Body(Value),
    /// 409, optionally carrying a fresh token.
    Conflict(Option<&'static str>),
    Status(u16),
    /// Connection-level failure.
    Fail(&'static str),
    /// Never answers within any sane test timeout.
    Hang,
}

/// Plays back [`Reply`]s in order and records every request it saw.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Parsed JSON body of the `index`th request.
    pub fn body(&self, index: usize) -> Value {
        serde_json::from_slice(&self.seen.lock().unwrap()[index].body).unwrap()
    }
}

impl Transport for ScriptedTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, SessionError> {
        let tag = request_tag(&request);
        self.seen.lock().unwrap().push(request);

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more often than scripted");

        match reply {
            Reply::Success(arguments) => Ok(ok(json!({
                "result": "success",
                "arguments": arguments,
                "tag": tag,
            }))),
            Reply::Result(result) => Ok(ok(json!({ "result": result, "tag": tag }))),
            Reply::Body(body) => Ok(ok(body)),
            Reply::Conflict(token) => Ok(TransportResponse {
                status: HttpStatusCode::CONFLICT,
                session_id: token.map(str::to_owned),
                body: b"<h1>409: Conflict</h1>".to_vec(),
            }),
            Reply::Status(code) => Ok(TransportResponse {
                status: HttpStatusCode(code),
                session_id: None,
                body: Vec::new(),
            }),
            Reply::Fail(message) => Err(SessionError::transport(None, message)),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(SessionError::transport(None, "hang elapsed"))
            }
        }
    }
}

/// Answers every request with success after a delay, tracking overlap.
#[derive(Default)]
pub struct InstrumentedTransport {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
    tags: Mutex<Vec<u64>>,
}

impl InstrumentedTransport {
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tags(&self) -> Vec<u64> {
        self.tags.lock().unwrap().clone()
    }
}

impl Transport for InstrumentedTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, SessionError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        let tag = request_tag(&request);
        self.tags.lock().unwrap().push(tag);

        tokio::time::sleep(Duration::from_millis(15)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(ok(json!({ "result": "success", "arguments": {}, "tag": tag })))
    }
}

fn ok(body: Value) -> TransportResponse {
    TransportResponse {
        status: HttpStatusCode::OK,
        session_id: None,
        body: serde_json::to_vec(&body).unwrap(),
    }
}

fn request_tag(request: &TransportRequest) -> u64 {
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    body["tag"].as_u64().unwrap()
}

pub fn connection(host: &str) -> ConnectionConfig {
    ConnectionConfigBuilder::default()
        .with_host(host)
        .with_port(9091)
        .with_secure(false)
        .build()
        .unwrap()
}

pub fn bytes(text: &str) -> Element {
    Element::Bytes(text.as_bytes().to_vec())
}

pub fn dictionary(entries: Vec<(&str, Element)>) -> Element {
    let mut dictionary = Dictionary::new();
    for (key, value) in entries {
        dictionary.insert(key, value);
    }
    Element::Dictionary(dictionary)
}

pub fn single_file_info(name: &str, length: i64) -> Element {
    dictionary(vec![
        ("length", Element::Integer(length)),
        ("name", bytes(name)),
        ("piece length", Element::Integer(16384)),
        ("pieces", Element::Bytes(vec![0xab; 40])),
    ])
}

pub fn multi_file_info(name: &str, files: &[(&[&str], i64)]) -> Element {
    let files = files
        .iter()
        .map(|(path, length)| {
            dictionary(vec![
                ("length", Element::Integer(*length)),
                ("path", Element::List(path.iter().map(|p| bytes(p)).collect())),
            ])
        })
        .collect();

    dictionary(vec![
        ("files", Element::List(files)),
        ("name", bytes(name)),
        ("piece length", Element::Integer(32768)),
        ("pieces", Element::Bytes(vec![0x11; 20])),
    ])
}

/// A complete `.torrent` around `info`.
pub fn torrent_file(info: Element) -> Vec<u8> {
    encode(&dictionary(vec![
        ("announce", bytes("http://tracker.example/announce")),
        ("comment", bytes("test fixture")),
        ("creation date", Element::Integer(1_700_000_000)),
        ("info", info),
    ]))
}
