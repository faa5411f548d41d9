//! Typed `.torrent` metadata on top of the bencode element tree.

use crate::bencode::{Decoder, Dictionary, Element, encode};
use crate::error::decode::DecodeError;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use sha1::{Digest, Sha1};

pub const PIECE_HASH_LENGTH: usize = 20;

/// One file of a multi-file torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path components joined with `/`, relative to the torrent's name.
    pub path: String,
    pub length: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLayout {
    Single { length: i64 },
    Multi { files: Vec<FileEntry> },
}

/// Decoded metadata of a `.torrent` file.
#[derive(Debug, Clone)]
pub struct MetaInfo {
    pub name: String,
    pub layout: FileLayout,
    pub piece_length: i64,
    pub pieces: Vec<u8>,
    /// Announce URLs grouped in tiers. A lone `announce` forms the only tier.
    pub trackers: Vec<Vec<String>>,
    pub private: bool,
    pub comment: Option<String>,
    pub created_by: Option<String>,
    /// Seconds since the Unix epoch.
    pub creation_date: Option<i64>,
    total_length: i64,
    info_hash: [u8; 20],
    /// The file as read, or the re-encoded root when built from an element tree.
    encoded: Vec<u8>,
    root: Element,
}

impl MetaInfo {
    /// Decode from a stream. Reads the root dictionary and nothing after it.
    ///
    /// The info-hash covers the `info` bytes exactly as they appear in the
    /// stream, duplicate keys included.
    pub fn from_reader(reader: impl Read) -> Result<Self, DecodeError> {
        let mut recording = Recording {
            inner: reader,
            consumed: Vec::new(),
        };
        let mut decoder = Decoder::new(&mut recording);
        let root = decoder.decode()?;
        let info_span = decoder.root_span("info");

        let mut metainfo = Self::from_element(root)?;
        let raw = recording.consumed;
        let info = info_span.and_then(|span| raw.get(span.start as usize..span.end as usize));
        if let Some(info) = info {
            metainfo.info_hash = sha1(info);
        }
        metainfo.encoded = raw;
        Ok(metainfo)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_reader(bytes)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        debug!("Decoding metadata from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Map a decoded root element into the typed record.
    ///
    /// Without the original bytes, the info-hash and [`MetaInfo::to_bytes`]
    /// use the re-encoded tree, which has any duplicate keys already dropped.
    pub fn from_element(root: Element) -> Result<Self, DecodeError> {
        let top = root
            .as_dictionary()
            .ok_or_else(|| DecodeError::schema(format!("root is a {}, expected a dictionary", root.kind())))?;

        let info_element = top
            .get("info")
            .ok_or_else(|| DecodeError::schema("missing 'info' dictionary"))?;
        let info = info_element
            .as_dictionary()
            .ok_or_else(|| DecodeError::schema("'info' is not a dictionary"))?;

        let name = preferred_text(info, "name.utf-8", "name")?
            .ok_or_else(|| DecodeError::schema("missing 'name'"))?;
        let (layout, total_length) = read_layout(info)?;

        let piece_length = optional_integer(info, "piece length")?.unwrap_or(0);
        if piece_length < 0 {
            return Err(DecodeError::schema("negative 'piece length'"));
        }

        let pieces = match info.get("pieces") {
            None => Vec::new(),
            Some(element) => element
                .as_bytes()
                .ok_or_else(|| DecodeError::schema("'pieces' is not a byte string"))?
                .to_vec(),
        };
        if pieces.len() % PIECE_HASH_LENGTH != 0 {
            return Err(DecodeError::schema(format!(
                "'pieces' length {} is not a multiple of {PIECE_HASH_LENGTH}",
                pieces.len()
            )));
        }

        let private = optional_integer(info, "private")?.is_some_and(|flag| flag != 0);

        let trackers = read_trackers(top)?;
        let comment = preferred_text(top, "comment.utf-8", "comment")?;
        let created_by = optional_text(top, "created by")?;
        let creation_date = optional_integer(top, "creation date")?;

        let info_hash = sha1(&encode(info_element));
        let encoded = encode(&root);

        Ok(MetaInfo {
            name,
            layout,
            piece_length,
            pieces,
            trackers,
            private,
            comment,
            created_by,
            creation_date,
            total_length,
            info_hash,
            encoded,
            root,
        })
    }

    /// Sum of all file lengths. Checked against overflow while decoding.
    pub fn total_length(&self) -> i64 {
        self.total_length
    }

    pub fn is_multi_file(&self) -> bool {
        matches!(self.layout, FileLayout::Multi { .. })
    }

    /// Files as listed by the daemon: a single-file torrent is one entry named after the torrent.
    pub fn files(&self) -> Vec<FileEntry> {
        match &self.layout {
            FileLayout::Single { length } => vec![FileEntry {
                path: self.name.clone(),
                length: *length,
            }],
            FileLayout::Multi { files } => files.clone(),
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len() / PIECE_HASH_LENGTH
    }

    pub fn piece_hashes(&self) -> impl Iterator<Item = &[u8]> {
        self.pieces.chunks_exact(PIECE_HASH_LENGTH)
    }

    /// SHA-1 of the bencoded `info` dictionary.
    pub fn info_hash(&self) -> [u8; 20] {
        self.info_hash
    }

    pub fn info_hash_hex(&self) -> String {
        hex::encode(self.info_hash)
    }

    /// Every announce URL once, in tier order.
    pub fn announce_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for url in self.trackers.iter().flatten() {
            if !urls.contains(&url.as_str()) {
                urls.push(url);
            }
        }
        urls
    }

    /// The `info` sub-dictionary as decoded.
    pub fn info(&self) -> Option<&Element> {
        self.root.as_dictionary().and_then(|top| top.get("info"))
    }

    /// The file's bytes, as sent in `torrent-add`'s `metainfo` argument.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encoded.clone()
    }

    /// Base64 of [`MetaInfo::to_bytes`].
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.encoded)
    }
}

/// Copies every byte read into `consumed`.
struct Recording<R> {
    inner: R,
    consumed: Vec<u8>,
}

impl<R: Read> Read for Recording<R> {
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buffer)?;
        self.consumed.extend_from_slice(&buffer[..read]);
        Ok(read)
    }
}

fn sha1(bytes: &[u8]) -> [u8; 20] {
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&Sha1::digest(bytes));
    hash
}

/// The layout and its total length.
fn read_layout(info: &Dictionary) -> Result<(FileLayout, i64), DecodeError> {
    let Some(files) = info.get("files") else {
        let length = optional_integer(info, "length")?
            .ok_or_else(|| DecodeError::schema("'info' has neither 'length' nor 'files'"))?;
        if length < 0 {
            return Err(DecodeError::schema("negative 'length'"));
        }
        return Ok((FileLayout::Single { length }, length));
    };

    let entries = files
        .as_list()
        .ok_or_else(|| DecodeError::schema("'files' is not a list"))?;
    if entries.is_empty() {
        return Err(DecodeError::schema("'files' is empty"));
    }

    let files = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| read_file_entry(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let total = files
        .iter()
        .try_fold(0i64, |total, file| total.checked_add(file.length))
        .ok_or_else(|| DecodeError::schema("total length overflows"))?;

    Ok((FileLayout::Multi { files }, total))
}

fn read_file_entry(index: usize, entry: &Element) -> Result<FileEntry, DecodeError> {
    let entry = entry
        .as_dictionary()
        .ok_or_else(|| DecodeError::schema(format!("file {index} is not a dictionary")))?;

    let length = optional_integer(entry, "length")?
        .ok_or_else(|| DecodeError::schema(format!("file {index} has no 'length'")))?;
    if length < 0 {
        return Err(DecodeError::schema(format!("file {index} has a negative 'length'")));
    }

    let components = entry
        .get("path.utf-8")
        .or_else(|| entry.get("path"))
        .ok_or_else(|| DecodeError::schema(format!("file {index} has no 'path'")))?
        .as_list()
        .ok_or_else(|| DecodeError::schema(format!("file {index} 'path' is not a list")))?;

    let path = components
        .iter()
        .map(|component| {
            component.as_text().ok_or_else(|| {
                DecodeError::schema(format!("file {index} has a non-string path component"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?
        .join("/");

    Ok(FileEntry { path, length })
}

fn read_trackers(top: &Dictionary) -> Result<Vec<Vec<String>>, DecodeError> {
    if let Some(list) = top.get("announce-list") {
        let tiers = list
            .as_list()
            .ok_or_else(|| DecodeError::schema("'announce-list' is not a list"))?;

        let mut result = Vec::with_capacity(tiers.len());
        for tier in tiers {
            let urls = tier
                .as_list()
                .ok_or_else(|| DecodeError::schema("'announce-list' tier is not a list"))?
                .iter()
                .map(|url| {
                    url.as_text()
                        .ok_or_else(|| DecodeError::schema("announce URL is not a string"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !urls.is_empty() {
                result.push(urls);
            }
        }
        if !result.is_empty() {
            return Ok(result);
        }
    }

    Ok(optional_text(top, "announce")?
        .map(|url| vec![vec![url]])
        .unwrap_or_default())
}

fn optional_integer(dictionary: &Dictionary, key: &str) -> Result<Option<i64>, DecodeError> {
    dictionary
        .get(key)
        .map(|element| {
            element
                .as_integer()
                .ok_or_else(|| DecodeError::schema(format!("'{key}' is a {}, expected an integer", element.kind())))
        })
        .transpose()
}

fn optional_text(dictionary: &Dictionary, key: &str) -> Result<Option<String>, DecodeError> {
    dictionary
        .get(key)
        .map(|element| {
            element
                .as_text()
                .ok_or_else(|| DecodeError::schema(format!("'{key}' is a {}, expected a byte string", element.kind())))
        })
        .transpose()
}

fn preferred_text(
    dictionary: &Dictionary,
    preferred: &str,
    fallback: &str,
) -> Result<Option<String>, DecodeError> {
    match optional_text(dictionary, preferred)? {
        Some(text) => Ok(Some(text)),
        None => optional_text(dictionary, fallback),
    }
}
