//! JSON request/response envelopes of the daemon's RPC protocol.
//!
//! Requests are `{method, arguments, tag}`; responses are
//! `{result, arguments, tag}`. Each request type names its method and the
//! type its response arguments decode into via [`RpcMethod`]; the envelope
//! only attaches the tag.

pub mod request;
pub mod response;

use crate::error::session::SessionError;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub const RESULT_SUCCESS: &str = "success";

/// A typed RPC call.
pub trait RpcMethod: Serialize + Sync {
    const METHOD: &'static str;

    type Output: DeserializeOwned + Send;
}

#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a, M: RpcMethod> {
    pub method: &'static str,
    pub arguments: &'a M,
    pub tag: u64,
}

impl<'a, M: RpcMethod> RequestEnvelope<'a, M> {
    pub fn new(arguments: &'a M, tag: u64) -> Self {
        Self {
            method: M::METHOD,
            arguments,
            tag,
        }
    }
}

/// A response before its arguments are bound to a type.
///
/// Unknown top-level keys are ignored; `arguments` stays untyped until
/// [`ResponseEnvelope::into_arguments`].
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    pub result: String,
    #[serde(default)]
    pub arguments: Option<Value>,
    #[serde(default)]
    pub tag: Option<u64>,
}

impl ResponseEnvelope {
    pub fn parse(body: &[u8]) -> Result<Self, SessionError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }

    /// Tag first, then result: a response for some other request is a
    /// protocol fault even when it reports success.
    pub fn verify(&self, expected_tag: u64, method: &'static str) -> Result<(), SessionError> {
        if self.tag != Some(expected_tag) {
            return Err(SessionError::tag_mismatch(expected_tag, self.tag));
        }
        if !self.is_success() {
            return Err(SessionError::rpc(method, self.result.clone()));
        }
        Ok(())
    }

    /// Decode `arguments` into `T`. Missing or null arguments decode as `{}`.
    pub fn into_arguments<T: DeserializeOwned>(self) -> Result<T, SessionError> {
        let arguments = match self.arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(arguments) => arguments,
        };
        Ok(serde_json::from_value(arguments)?)
    }
}

/// Response arguments for calls that return nothing of interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NoArguments {}

/// Which torrents a call applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Ids {
    /// Every torrent: `ids` is omitted.
    #[default]
    All,
    List(Vec<i64>),
    Hashes(Vec<String>),
    /// Torrents changed since the previous `recently-active` query.
    RecentlyActive,
}

impl Ids {
    pub fn is_all(&self) -> bool {
        matches!(self, Ids::All)
    }
}

impl From<&[i64]> for Ids {
    fn from(ids: &[i64]) -> Self {
        Ids::List(ids.to_vec())
    }
}

impl From<Vec<i64>> for Ids {
    fn from(ids: Vec<i64>) -> Self {
        Ids::List(ids)
    }
}

impl From<i64> for Ids {
    fn from(id: i64) -> Self {
        Ids::List(vec![id])
    }
}

impl Serialize for Ids {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ids::All => serializer.serialize_none(),
            Ids::List(ids) => ids.serialize(serializer),
            Ids::Hashes(hashes) => hashes.serialize(serializer),
            Ids::RecentlyActive => serializer.serialize_str("recently-active"),
        }
    }
}
