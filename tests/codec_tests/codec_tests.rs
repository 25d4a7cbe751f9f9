//! Tests for the map codec
//!
//! These tests verify:
//! - Empty and populated maps decode back to equal maps
//! - Unicode and whitespace survive
//! - Frame validation (magic, version, checksum, truncation)

use std::collections::HashMap;

use vstore::codec::{decode_map, encode_map};
use vstore::VStoreError;

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_map() -> HashMap<String, String> {
    HashMap::from([
        ("a".to_string(), "the quick fox".to_string()),
        ("ключ".to_string(), "значение\twith\ttabs".to_string()),
        ("multi line".to_string(), "first\nsecond\r\nthird".to_string()),
        ("empty".to_string(), String::new()),
    ])
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_empty_map() {
    let map = HashMap::new();

    let bytes = encode_map(&map).unwrap();

    assert_eq!(&bytes[0..4], b"VSKV");
    assert!(decode_map(&bytes).unwrap().is_empty());
}

#[test]
fn test_populated_map() {
    let map = sample_map();

    let decoded = decode_map(&encode_map(&map).unwrap()).unwrap();

    assert_eq!(decoded, map);
}

#[test]
fn test_large_value() {
    let map = HashMap::from([("big".to_string(), "x".repeat(1 << 20))]);

    let decoded = decode_map(&encode_map(&map).unwrap()).unwrap();

    assert_eq!(decoded["big"].len(), 1 << 20);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_bad_magic() {
    let mut bytes = encode_map(&sample_map()).unwrap();
    bytes[0] = b'X';

    assert!(matches!(decode_map(&bytes), Err(VStoreError::Serialization(_))));
}

#[test]
fn test_unknown_version() {
    let mut bytes = encode_map(&sample_map()).unwrap();
    bytes[4] = 99;

    assert!(matches!(decode_map(&bytes), Err(VStoreError::Serialization(_))));
}

#[test]
fn test_checksum_mismatch() {
    let mut bytes = encode_map(&sample_map()).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;

    assert!(matches!(decode_map(&bytes), Err(VStoreError::Serialization(_))));
}

#[test]
fn test_truncated_frame() {
    let bytes = encode_map(&sample_map()).unwrap();

    assert!(matches!(decode_map(&bytes[..bytes.len() - 3]), Err(VStoreError::Serialization(_))));
    assert!(matches!(decode_map(&bytes[..5]), Err(VStoreError::Serialization(_))));
    assert!(matches!(decode_map(&[]), Err(VStoreError::Serialization(_))));
}
