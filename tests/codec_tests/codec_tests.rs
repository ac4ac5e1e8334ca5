//! Tests for snapshot codecs
//!
//! These tests verify:
//! - Round-trips for both formats
//! - Empty input decodes to an empty cache
//! - Malformed, truncated and over-long input is rejected
//! - Unrepresentable keys/values fail to encode
//! - Deterministic output

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use snapkv::{BinaryCodec, Cache, Codec, Format, JsonCodec, SnapError, SnapshotCodec};

// =============================================================================
// Helper Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u32,
    tags: Vec<String>,
    nickname: Option<String>,
}

/// A value whose serialization always fails
struct Unsupported;

impl Serialize for Unsupported {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("unsupported value"))
    }
}

fn sample_profiles() -> Cache<String, Profile> {
    let mut cache = Cache::new();
    cache.insert(
        "alice".to_string(),
        Profile {
            name: "Alice".to_string(),
            age: 30,
            tags: vec!["admin".to_string(), "ops".to_string()],
            nickname: None,
        },
    );
    cache.insert(
        "bob".to_string(),
        Profile {
            name: "Bob".to_string(),
            age: 25,
            tags: Vec::new(),
            nickname: Some("bobby".to_string()),
        },
    );
    cache
}

fn all_codecs() -> Vec<SnapshotCodec> {
    vec![
        SnapshotCodec::from(BinaryCodec),
        SnapshotCodec::from(JsonCodec::compact()),
        SnapshotCodec::from(JsonCodec::pretty()),
    ]
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_roundtrip_struct_values() {
    let cache = sample_profiles();

    for codec in all_codecs() {
        let bytes = codec.encode(&cache).unwrap();
        let decoded: Cache<String, Profile> = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, cache, "codec {}", codec.name());
    }
}

#[test]
fn test_roundtrip_integer_keys() {
    let mut cache: Cache<i64, String> = Cache::new();
    cache.insert(-5, "negative".to_string());
    cache.insert(0, "zero".to_string());
    cache.insert(10, "value".to_string());

    for codec in all_codecs() {
        let bytes = codec.encode(&cache).unwrap();
        let decoded: Cache<i64, String> = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, cache, "codec {}", codec.name());
    }
}

#[test]
fn test_roundtrip_empty_cache() {
    let cache: Cache<String, String> = Cache::new();

    for codec in all_codecs() {
        let bytes = codec.encode(&cache).unwrap();
        assert!(!bytes.is_empty());
        let decoded: Cache<String, String> = codec.decode(&bytes).unwrap();
        assert!(decoded.is_empty());
    }
}

#[test]
fn test_binary_roundtrip_tuple_keys() {
    let mut cache: Cache<(u8, u8), Vec<u8>> = Cache::new();
    cache.insert((1, 2), vec![1, 2, 3]);
    cache.insert((0, 9), Vec::new());

    let bytes = BinaryCodec.encode(&cache).unwrap();
    let decoded: Cache<(u8, u8), Vec<u8>> = BinaryCodec.decode(&bytes).unwrap();

    assert_eq!(decoded, cache);
}

// =============================================================================
// Empty Input Tests
// =============================================================================

#[test]
fn test_decode_empty_input_is_empty_cache() {
    for codec in all_codecs() {
        let decoded: Cache<String, u64> = codec.decode(&[]).unwrap();
        assert!(decoded.is_empty(), "codec {}", codec.name());
    }
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_binary_rejects_trailing_bytes() {
    let mut cache = Cache::new();
    cache.insert("k".to_string(), "v".to_string());

    let mut bytes = BinaryCodec.encode(&cache).unwrap();
    bytes.extend_from_slice(b"stale");

    let result: snapkv::Result<Cache<String, String>> = BinaryCodec.decode(&bytes);
    assert!(matches!(result, Err(SnapError::Decoding(_))));
}

#[test]
fn test_json_rejects_trailing_bytes() {
    let mut cache = Cache::new();
    cache.insert("k".to_string(), "v".to_string());

    let mut bytes = JsonCodec::compact().encode(&cache).unwrap();
    bytes.extend_from_slice(b"\"old\":\"x\"}");

    let result: snapkv::Result<Cache<String, String>> = JsonCodec::compact().decode(&bytes);
    assert!(matches!(result, Err(SnapError::Decoding(_))));
}

#[test]
fn test_binary_rejects_truncated_input() {
    let cache = sample_profiles();
    let bytes = BinaryCodec.encode(&cache).unwrap();

    let result: snapkv::Result<Cache<String, Profile>> =
        BinaryCodec.decode(&bytes[..bytes.len() - 1]);
    assert!(matches!(result, Err(SnapError::Decoding(_))));
}

#[test]
fn test_json_rejects_garbage() {
    let result: snapkv::Result<Cache<String, String>> =
        JsonCodec::compact().decode(b"not json at all");
    assert!(matches!(result, Err(SnapError::Decoding(_))));
}

#[test]
fn test_decode_type_mismatch() {
    let mut cache = Cache::new();
    cache.insert("a".to_string(), "hello".to_string());

    for codec in all_codecs() {
        let bytes = codec.encode(&cache).unwrap();
        let result: snapkv::Result<Cache<String, u64>> = codec.decode(&bytes);
        match result {
            Err(e) => assert!(e.is_codec(), "codec {}: {}", codec.name(), e),
            Ok(_) => panic!("codec {} accepted mismatched types", codec.name()),
        }
    }
}

// =============================================================================
// Encoding Failure Tests
// =============================================================================

#[test]
fn test_encode_unsupported_value() {
    let mut cache = Cache::new();
    cache.insert("bad".to_string(), Unsupported);

    for codec in all_codecs() {
        let result = codec.encode(&cache);
        assert!(
            matches!(result, Err(SnapError::Encoding(_))),
            "codec {}",
            codec.name()
        );
    }
}

#[test]
fn test_json_rejects_non_scalar_keys() {
    let mut cache: Cache<(u8, u8), String> = Cache::new();
    cache.insert((1, 2), "pair".to_string());

    let result = JsonCodec::compact().encode(&cache);
    assert!(matches!(result, Err(SnapError::Encoding(_))));
}

// =============================================================================
// Determinism / Formatting Tests
// =============================================================================

#[test]
fn test_encoding_independent_of_insertion_order() {
    let mut forward = Cache::new();
    let mut backward = Cache::new();
    for i in 0..50u32 {
        forward.insert(format!("key{:03}", i), i);
        backward.insert(format!("key{:03}", 49 - i), 49 - i);
    }

    for codec in all_codecs() {
        assert_eq!(
            codec.encode(&forward).unwrap(),
            codec.encode(&backward).unwrap(),
            "codec {}",
            codec.name()
        );
    }
}

#[test]
fn test_json_pretty_and_compact() {
    let mut cache = Cache::new();
    cache.insert("k".to_string(), "v".to_string());

    let compact = JsonCodec::compact().encode(&cache).unwrap();
    let pretty = JsonCodec::pretty().encode(&cache).unwrap();

    assert_eq!(compact, br#"{"k":"v"}"#.to_vec());
    assert!(pretty.contains(&b'\n'));
    assert!(JsonCodec::pretty().is_pretty());
    assert!(!JsonCodec::compact().is_pretty());

    // Pretty output decodes with either codec
    let decoded: Cache<String, String> = JsonCodec::compact().decode(&pretty).unwrap();
    assert_eq!(decoded, cache);
}

#[test]
fn test_binary_layout_fixed_width() {
    let mut cache = Cache::new();
    cache.insert(1u32, 2u32);

    let bytes = BinaryCodec.encode(&cache).unwrap();

    // u64 entry count + u32 key + u32 value, little endian
    assert_eq!(bytes, vec![1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]);
}

// =============================================================================
// Format Tests
// =============================================================================

#[test]
fn test_format_from_str() {
    assert_eq!("binary".parse::<Format>().unwrap(), Format::Binary);
    assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
    assert!(matches!("xml".parse::<Format>(), Err(SnapError::Config(_))));
}

#[test]
fn test_format_to_codec() {
    assert_eq!(SnapshotCodec::from(Format::Binary).format(), Format::Binary);
    assert_eq!(SnapshotCodec::from(Format::Json).format(), Format::Json);
    assert_eq!(SnapshotCodec::default().format(), Format::Binary);
    assert_eq!(Format::Json.to_string(), "json");
}
