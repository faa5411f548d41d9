use crate::bencode::decoder::decode_bytes;
use crate::bencode::{Decoder, Dictionary, Element, MAX_DEPTH, encode};
use crate::error::decode::DecodeError;

use proptest::prelude::*;

#[test]
fn given_each_token_kind_when_decoded_then_yields_matching_element() {
    assert_eq!(decode_bytes(b"i42e").unwrap(), Element::Integer(42));
    assert_eq!(decode_bytes(b"i-7e").unwrap(), Element::Integer(-7));
    assert_eq!(decode_bytes(b"4:spam").unwrap(), Element::Bytes(b"spam".to_vec()));
    assert_eq!(decode_bytes(b"0:").unwrap(), Element::Bytes(Vec::new()));
    assert_eq!(
        decode_bytes(b"l4:spami1ee").unwrap(),
        Element::List(vec![Element::Bytes(b"spam".to_vec()), Element::Integer(1)])
    );
}

/// **VALUE**: Verifies dictionaries keep encounter order and first-wins duplicates.
///
/// **WHY THIS MATTERS**: The info-hash is computed from the re-encoded `info` dictionary.
/// Sorting keys on decode would change the bytes, and therefore the hash, of any file
/// whose keys were not sorted to begin with.
///
/// **BUG THIS CATCHES**: Would catch a switch to a sorted map or last-wins insertion.
#[test]
fn given_unsorted_dictionary_with_duplicate_when_decoded_then_order_kept_and_first_wins() {
    // GIVEN: Keys out of order, "a" repeated
    let input = b"d1:zi1e1:ai2e1:ai3ee";

    // WHEN: Decoding
    let element = decode_bytes(input).unwrap();

    // THEN: Encounter order, first value of "a"
    let dictionary = element.as_dictionary().unwrap();
    let keys: Vec<&[u8]> = dictionary.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![b"z".as_slice(), b"a".as_slice()]);
    assert_eq!(dictionary.get("a"), Some(&Element::Integer(2)));
    assert_eq!(encode(&element), b"d1:zi1e1:ai2ee".to_vec());
}

/// **VALUE**: Verifies the decoder stops at the end of the root element.
///
/// **BUG THIS CATCHES**: Would catch a reader that slurps the rest of the stream,
/// which breaks callers decoding several values from one socket or file.
#[test]
fn given_trailing_bytes_when_decoded_then_root_returned_and_rest_unread() {
    let input: &[u8] = b"i1egarbage";
    let mut decoder = Decoder::new(input);

    let element = decoder.decode().unwrap();

    assert_eq!(element, Element::Integer(1));
    assert_eq!(decoder.offset(), 3);
}

/// **VALUE**: Verifies the malformed inputs named in the format contract fail cleanly.
///
/// **WHY THIS MATTERS**: `.torrent` files come from the internet. Any panic here takes the
/// whole client down when a user opens a corrupt download.
///
/// **BUG THIS CATCHES**: Would catch panics on truncated prefixes, unterminated containers,
/// or a non-numeric length field.
#[test]
fn given_malformed_inputs_when_decoded_then_each_fails_with_decode_error() {
    let cases: &[(&[u8], &str)] = &[
        (b"", "empty input"),
        (b"12", "truncated length prefix"),
        (b"5:abc", "string shorter than its prefix"),
        (b"l4:spam", "unterminated list"),
        (b"d3:keyi1e", "unterminated dictionary"),
        (b"d3:keye", "key without value"),
        (b"x3:abc", "non-numeric length field"),
        (b"3x:abc", "garbage inside length prefix"),
        (b"i12", "unterminated integer"),
        (b"ie", "empty integer"),
        (b"i-0e", "negative zero"),
        (b"i03e", "leading zero"),
        (b"i1-2e", "minus inside integer"),
        (b"i99999999999999999999e", "integer overflow"),
        (b"01:a", "length with leading zero"),
        (b"di1ei2ee", "integer dictionary key"),
        (b"e", "stray end marker"),
    ];

    for (input, description) in cases {
        assert!(decode_bytes(input).is_err(), "Expected failure for {description}");
    }
}

#[test]
fn given_input_ending_mid_token_when_decoded_then_reports_eof_offset() {
    let result = decode_bytes(b"l4:sp");

    match result {
        Err(DecodeError::UnexpectedEof { offset, .. }) => assert_eq!(offset, 5),
        other => panic!("Expected UnexpectedEof, got {other:?}"),
    }
}

/// **VALUE**: Verifies hostile length prefixes are refused before allocating.
///
/// **BUG THIS CATCHES**: Would catch `Vec::with_capacity(len)` on an attacker-chosen length.
#[test]
fn given_huge_length_prefix_when_decoded_then_limit_error() {
    let result = decode_bytes(b"9999999999:x");

    assert!(matches!(result, Err(DecodeError::Limit { .. })));
}

#[test]
fn given_nesting_beyond_limit_when_decoded_then_limit_error() {
    let mut input = vec![b'l'; MAX_DEPTH + 1];
    input.extend(vec![b'e'; MAX_DEPTH + 1]);

    let result = decode_bytes(&input);

    assert!(matches!(result, Err(DecodeError::Limit { .. })));
}

#[test]
fn given_nesting_at_limit_when_decoded_then_succeeds() {
    let mut input = vec![b'l'; MAX_DEPTH];
    input.extend(vec![b'e'; MAX_DEPTH]);

    assert!(decode_bytes(&input).is_ok());
}

#[test]
fn given_root_dictionary_when_decoded_then_value_spans_point_into_input() {
    let input: &[u8] = b"d1:ai1e4:infod1:xi2ee4:infoi3ee";
    let mut decoder = Decoder::new(input);

    decoder.decode().unwrap();

    let span = decoder.root_span("info").unwrap();
    assert_eq!(&input[span.start as usize..span.end as usize], b"d1:xi2ee");
    assert_eq!(decoder.root_span("a"), Some(4..7));
    assert_eq!(decoder.root_span("x"), None);
}

#[test]
fn given_dictionary_insert_when_key_exists_then_rejected() {
    let mut dictionary = Dictionary::new();

    assert!(dictionary.insert("k", Element::Integer(1)));
    assert!(!dictionary.insert("k", Element::Integer(2)));
    assert_eq!(dictionary.len(), 1);
}

/// **VALUE**: Verifies a dictionary with a very large number of keys decodes in linear time.
///
/// **WHY THIS MATTERS**: A small hostile `.torrent` with one flat dictionary of tens of
/// thousands of keys must not stall the decoder for minutes.
///
/// **BUG THIS CATCHES**: Would catch duplicate detection or lookup scanning every earlier
/// key, which makes decoding quadratic in the key count.
#[test]
fn given_dictionary_with_many_keys_when_decoded_then_fast_and_first_wins() {
    // GIVEN: 100,000 distinct keys followed by a repeat of the first
    const KEYS: usize = 100_000;
    let mut input = b"d".to_vec();
    for n in 0..KEYS {
        let key = format!("k{n:06}");
        input.extend(format!("{}:{key}i{n}e", key.len()).into_bytes());
    }
    input.extend(b"7:k000000i-1ee");

    // WHEN: Decoding
    let started = std::time::Instant::now();
    let element = decode_bytes(&input).unwrap();
    let elapsed = started.elapsed();

    // THEN: Every key present, the repeat dropped, well within a quadratic run's time
    let dictionary = element.as_dictionary().unwrap();
    assert_eq!(dictionary.len(), KEYS);
    assert_eq!(dictionary.get("k000000"), Some(&Element::Integer(0)));
    assert_eq!(dictionary.get("k099999"), Some(&Element::Integer(99_999)));
    assert!(!dictionary.contains_key(b"k100000"));
    assert!(
        elapsed < std::time::Duration::from_secs(10),
        "Decoding {KEYS} keys took {elapsed:?}"
    );
}

fn element_strategy() -> impl Strategy<Value = Element> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Element::Integer),
        proptest::collection::vec(any::<u8>(), 0..24).prop_map(Element::Bytes),
    ];

    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Element::List),
            proptest::collection::vec((proptest::collection::vec(any::<u8>(), 0..8), inner), 0..6)
                .prop_map(|entries| {
                    let mut dictionary = Dictionary::new();
                    for (key, value) in entries {
                        dictionary.insert(key, value);
                    }
                    Element::Dictionary(dictionary)
                }),
        ]
    })
}

proptest! {
    /// Encoding any element tree and decoding it gives the same tree back.
    #[test]
    fn prop_encoded_element_decodes_to_itself(element in element_strategy()) {
        let encoded = encode(&element);
        let decoded = decode_bytes(&encoded).unwrap();
        prop_assert_eq!(decoded, element);
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn prop_arbitrary_bytes_never_panic(input in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_bytes(&input);
    }

    /// Every strict prefix of a valid encoding fails.
    #[test]
    fn prop_truncated_encoding_fails(element in element_strategy(), cut in any::<prop::sample::Index>()) {
        let encoded = encode(&element);
        let cut = cut.index(encoded.len());
        prop_assert!(decode_bytes(&encoded[..cut]).is_err());
    }
}
