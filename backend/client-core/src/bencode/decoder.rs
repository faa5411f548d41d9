use crate::bencode::{Dictionary, Element, MAX_DEPTH, MAX_STRING_LENGTH};
use crate::error::decode::DecodeError;

use std::io::{ErrorKind, Read};
use std::ops::Range;

/// Integers are at most `-9223372036854775808`: 20 characters.
const MAX_INTEGER_CHARS: usize = 20;

/// Digits in a length prefix; enough for any value under the string cap.
const MAX_LENGTH_DIGITS: usize = 10;

enum Token {
    Element(Element),
    /// The `e` that closes a list or dictionary.
    End,
}

/// Recursive-descent bencode reader over a byte stream.
///
/// Wrap unbuffered sources (files, sockets) in a [`std::io::BufReader`]:
/// the decoder issues one-byte reads.
pub struct Decoder<R> {
    reader: R,
    offset: u64,
    depth: usize,
    /// Input range of each root dictionary value, first occurrence per key.
    root_spans: Vec<(Vec<u8>, Range<u64>)>,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            depth: 0,
            root_spans: Vec::new(),
        }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Where the value of `key` sat in the input, if the root is a dictionary
    /// holding it. Offsets are relative to the first byte this decoder read.
    pub fn root_span(&self, key: &str) -> Option<Range<u64>> {
        self.root_spans
            .iter()
            .find(|(candidate, _)| candidate.as_slice() == key.as_bytes())
            .map(|(_, span)| span.clone())
    }

    /// Read exactly one element. Bytes after it are left unread.
    pub fn decode(&mut self) -> Result<Element, DecodeError> {
        self.root_spans.clear();
        match self.next_token()? {
            Token::Element(element) => Ok(element),
            Token::End => Err(DecodeError::syntax(
                self.offset - 1,
                "end marker outside of a list or dictionary",
            )),
        }
    }

    fn next_token(&mut self) -> Result<Token, DecodeError> {
        let start = self.offset;
        let byte = self.require_byte()?;

        match byte {
            b'i' => self.read_integer().map(|value| Token::Element(Element::Integer(value))),
            b'l' => self.nested(Self::read_list).map(Token::Element),
            b'd' => self.nested(Self::read_dictionary).map(Token::Element),
            b'e' => Ok(Token::End),
            b'0'..=b'9' => self
                .read_string(byte)
                .map(|bytes| Token::Element(Element::Bytes(bytes))),
            other => Err(DecodeError::syntax(
                start,
                format!("unexpected byte 0x{other:02x}"),
            )),
        }
    }

    fn nested(
        &mut self,
        read: fn(&mut Self) -> Result<Element, DecodeError>,
    ) -> Result<Element, DecodeError> {
        if self.depth >= MAX_DEPTH {
            return Err(DecodeError::limit(
                self.offset,
                format!("nesting deeper than {MAX_DEPTH}"),
            ));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    fn read_list(&mut self) -> Result<Element, DecodeError> {
        let mut items = Vec::new();
        loop {
            match self.next_token()? {
                Token::Element(element) => items.push(element),
                Token::End => return Ok(Element::List(items)),
            }
        }
    }

    fn read_dictionary(&mut self) -> Result<Element, DecodeError> {
        let mut dictionary = Dictionary::new();
        loop {
            let key_offset = self.offset;
            let key = match self.next_token()? {
                Token::End => return Ok(Element::Dictionary(dictionary)),
                Token::Element(Element::Bytes(key)) => key,
                Token::Element(other) => {
                    return Err(DecodeError::syntax(
                        key_offset,
                        format!("dictionary key must be a byte string, found {}", other.kind()),
                    ));
                }
            };

            let value_offset = self.offset;
            let value = match self.next_token()? {
                Token::Element(value) => value,
                Token::End => {
                    return Err(DecodeError::syntax(
                        value_offset,
                        "dictionary key without a value",
                    ));
                }
            };

            let span = value_offset..self.offset;
            if self.depth == 1 && !dictionary.contains_key(&key) {
                self.root_spans.push((key.clone(), span));
            }
            dictionary.insert(key, value);
        }
    }

    /// `i` already consumed; reads through the closing `e`.
    fn read_integer(&mut self) -> Result<i64, DecodeError> {
        let start = self.offset;
        let mut text = String::new();

        loop {
            let byte = self.require_byte()?;
            match byte {
                b'e' => break,
                b'-' if text.is_empty() => text.push('-'),
                b'0'..=b'9' => text.push(char::from(byte)),
                other => {
                    return Err(DecodeError::syntax(
                        self.offset - 1,
                        format!("unexpected byte 0x{other:02x} in integer"),
                    ));
                }
            }
            if text.len() > MAX_INTEGER_CHARS {
                return Err(DecodeError::limit(start, "integer does not fit in 64 bits"));
            }
        }

        let digits = text.strip_prefix('-').unwrap_or(&text);
        if digits.is_empty() {
            return Err(DecodeError::syntax(start, "integer has no digits"));
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(DecodeError::syntax(start, "integer has a leading zero"));
        }
        if text == "-0" {
            return Err(DecodeError::syntax(start, "negative zero"));
        }

        text.parse::<i64>()
            .map_err(|_| DecodeError::limit(start, "integer does not fit in 64 bits"))
    }

    /// First length digit already consumed; reads `<len>:<bytes>`.
    fn read_string(&mut self, first_digit: u8) -> Result<Vec<u8>, DecodeError> {
        let start = self.offset - 1;
        let mut length = u64::from(first_digit - b'0');
        let mut digits = 1;

        loop {
            let byte = self.require_byte()?;
            match byte {
                b':' => break,
                b'0'..=b'9' => {
                    if length == 0 {
                        return Err(DecodeError::syntax(start, "length prefix has a leading zero"));
                    }
                    digits += 1;
                    if digits > MAX_LENGTH_DIGITS {
                        return Err(DecodeError::limit(start, "length prefix too long"));
                    }
                    length = length * 10 + u64::from(byte - b'0');
                }
                other => {
                    return Err(DecodeError::syntax(
                        self.offset - 1,
                        format!("unexpected byte 0x{other:02x} in length prefix"),
                    ));
                }
            }
        }

        if length > MAX_STRING_LENGTH {
            return Err(DecodeError::limit(
                start,
                format!("byte string of {length} bytes exceeds {MAX_STRING_LENGTH}"),
            ));
        }

        // Grows with the data actually present, so a lying prefix on a short
        // input fails at EOF instead of allocating up front.
        let mut bytes = Vec::new();
        let read = (&mut self.reader).take(length).read_to_end(&mut bytes)?;
        self.offset += read as u64;

        if (read as u64) < length {
            return Err(DecodeError::eof(self.offset));
        }

        Ok(bytes)
    }

    fn require_byte(&mut self) -> Result<u8, DecodeError> {
        self.next_byte()?.ok_or_else(|| DecodeError::eof(self.offset))
    }

    fn next_byte(&mut self) -> Result<Option<u8>, DecodeError> {
        let mut buffer = [0u8; 1];
        loop {
            match self.reader.read(&mut buffer) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(buffer[0]));
                }
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(error.into()),
            }
        }
    }
}

/// Decode one element from an in-memory buffer.
pub fn decode_bytes(bytes: &[u8]) -> Result<Element, DecodeError> {
    Decoder::new(bytes).decode()
}
