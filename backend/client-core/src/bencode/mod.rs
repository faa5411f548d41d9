//! Bencode: the four-token binary grammar used by `.torrent` files.
//!
//! [`Decoder`] reads from any [`std::io::Read`] one byte at a time and never
//! buffers more than the string currently being read. [`encode`] writes an
//! [`Element`] tree back out, keeping dictionary keys in the order they were
//! decoded so a re-encoded `info` dictionary hashes like the original.

pub mod decoder;
pub mod encoder;

pub use decoder::Decoder;
pub use encoder::encode;

use std::collections::HashMap;

/// Longest byte string the decoder will allocate for.
pub const MAX_STRING_LENGTH: u64 = 256 * 1024 * 1024;

/// Deepest list/dictionary nesting the decoder will follow.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Integer(i64),
    Bytes(Vec<u8>),
    List(Vec<Element>),
    Dictionary(Dictionary),
}

impl Element {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Element::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Element::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Element]> {
        match self {
            Element::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Element::Dictionary(dictionary) => Some(dictionary),
            _ => None,
        }
    }

    /// Byte string as text, replacing invalid UTF-8.
    pub fn as_text(&self) -> Option<String> {
        self.as_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Element::Integer(_) => "integer",
            Element::Bytes(_) => "byte string",
            Element::List(_) => "list",
            Element::Dictionary(_) => "dictionary",
        }
    }
}

/// Key/value pairs in encounter order.
///
/// Keys are not assumed sorted. When a key repeats, the first occurrence is
/// kept and later ones are dropped at insert time. Lookups go through a key
/// index, so decoding a dictionary stays linear in its size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<(Vec<u8>, Element)>,
    /// Key to position in `entries`.
    index: HashMap<Vec<u8>, usize>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless `key` is already present. Returns whether it was inserted.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: Element) -> bool {
        let key = key.into();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.get_raw(key.as_bytes())
    }

    pub fn get_raw(&self, key: &[u8]) -> Option<&Element> {
        self.index
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Element)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_slice(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
