//! Tests for StorePipeline
//!
//! These tests verify:
//! - Missing file loads as an empty map
//! - Save then load reproduces the map
//! - Saves replace the file atomically and leave no temp files behind
//! - Failures surface as typed errors and keep the previous file

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use vstore::compression::compress;
use vstore::crypto::CryptoProvider;
use vstore::storage::StorePipeline;
use vstore::VStoreError;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_pipeline() -> (TempDir, StorePipeline, CryptoProvider) {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = StorePipeline::new(temp_dir.path().join("store.data"), 6);
    let crypto = CryptoProvider::from_password("password").unwrap();
    (temp_dir, pipeline, crypto)
}

fn sample_map() -> HashMap<String, String> {
    (0..100)
        .map(|i| (format!("key{:03}", i), format!("value number {} with some text", i)))
        .collect()
}

fn dir_entries(path: &std::path::Path) -> Vec<PathBuf> {
    fs::read_dir(path)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_empty() {
    let (_temp, pipeline, crypto) = setup_pipeline();

    let data = pipeline.load(&crypto).unwrap();

    assert!(data.is_empty());
    assert!(!pipeline.file_path().exists());
}

#[test]
fn test_save_load_roundtrip() {
    let (_temp, pipeline, crypto) = setup_pipeline();
    let map = sample_map();

    let written = pipeline.save(&map, &crypto).unwrap();

    assert_eq!(fs::metadata(pipeline.file_path()).unwrap().len() as usize, written);
    assert_eq!(pipeline.load(&crypto).unwrap(), map);
}

#[test]
fn test_save_empty_map() {
    let (_temp, pipeline, crypto) = setup_pipeline();

    pipeline.save(&HashMap::new(), &crypto).unwrap();

    assert!(pipeline.file_path().exists());
    assert!(pipeline.load(&crypto).unwrap().is_empty());
}

#[test]
fn test_file_is_not_plaintext() {
    let (_temp, pipeline, crypto) = setup_pipeline();
    let map = HashMap::from([("needle".to_string(), "haystack".to_string())]);

    pipeline.save(&map, &crypto).unwrap();

    let bytes = fs::read(pipeline.file_path()).unwrap();
    assert!(!bytes.windows(6).any(|w| w == b"needle"));
}

// =============================================================================
// Atomic Write Tests
// =============================================================================

#[test]
fn test_save_overwrites_and_leaves_no_temp_files() {
    let (temp, pipeline, crypto) = setup_pipeline();

    pipeline.save(&sample_map(), &crypto).unwrap();
    let smaller = HashMap::from([("only".to_string(), "one".to_string())]);
    pipeline.save(&smaller, &crypto).unwrap();

    assert_eq!(pipeline.load(&crypto).unwrap(), smaller);
    assert_eq!(dir_entries(temp.path()), vec![pipeline.file_path().to_path_buf()]);
}

#[test]
fn test_save_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("deeper").join("store.data");
    let pipeline = StorePipeline::new(&path, 6);
    let crypto = CryptoProvider::from_password("password").unwrap();

    pipeline.save(&sample_map(), &crypto).unwrap();

    assert!(path.exists());
}

#[test]
fn test_failed_save_keeps_previous_file() {
    let (temp, pipeline, crypto) = setup_pipeline();
    pipeline.save(&sample_map(), &crypto).unwrap();
    let before = fs::read(pipeline.file_path()).unwrap();

    // Destination's directory is replaced by a file so the temp file cannot be created
    let blocked = StorePipeline::new(pipeline.file_path().join("child.data"), 6);
    let result = blocked.save(&sample_map(), &crypto);

    assert!(matches!(result, Err(VStoreError::Io(_))));
    assert_eq!(fs::read(pipeline.file_path()).unwrap(), before);
    assert_eq!(dir_entries(temp.path()).len(), 1);
}

// =============================================================================
// Load Failure Tests
// =============================================================================

#[test]
fn test_load_with_wrong_key() {
    let (_temp, pipeline, crypto) = setup_pipeline();
    pipeline.save(&sample_map(), &crypto).unwrap();

    let wrong = CryptoProvider::from_password("not the password").unwrap();

    assert!(matches!(pipeline.load(&wrong), Err(VStoreError::Authentication)));
}

#[test]
fn test_load_bad_compressed_stream() {
    let (_temp, pipeline, crypto) = setup_pipeline();
    let blob = crypto.encrypt(b"this is not gzip").unwrap();
    fs::write(pipeline.file_path(), blob).unwrap();

    assert!(matches!(pipeline.load(&crypto), Err(VStoreError::Compression(_))));
}

#[test]
fn test_load_bad_encoded_map() {
    let (_temp, pipeline, crypto) = setup_pipeline();
    let compressed = compress(b"not a framed map", 6).unwrap();
    let blob = crypto.encrypt(&compressed).unwrap();
    fs::write(pipeline.file_path(), blob).unwrap();

    assert!(matches!(pipeline.load(&crypto), Err(VStoreError::Serialization(_))));
}

#[test]
fn test_load_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = StorePipeline::new(temp_dir.path(), 6);
    let crypto = CryptoProvider::from_password("password").unwrap();

    assert!(matches!(pipeline.load(&crypto), Err(VStoreError::Io(_))));
}
