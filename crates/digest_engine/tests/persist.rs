use std::fs;

use digest_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn ensure_output_dir_creates_missing_directories() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("digest").join("2024-03-15");

    ensure_output_dir(&nested).unwrap();

    assert!(nested.is_dir());
}

#[test]
fn ensure_output_dir_rejects_a_file_path() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("occupied");
    fs::write(&file_path, "not a directory").unwrap();

    let err = ensure_output_dir(&file_path).unwrap_err();

    assert!(matches!(err, PersistError::OutputDir { .. }));
}

#[test]
fn write_replaces_an_existing_file_in_place() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("digest.csv", b"hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "digest.csv");
    assert_eq!(fs::read(&first).unwrap(), b"hello");

    let second = writer.write("digest.csv", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"world");
}

#[test]
fn failed_write_leaves_no_partial_file() {
    let temp = TempDir::new().unwrap();
    let missing_dir = temp.path().join("never-created");
    let writer = AtomicFileWriter::new(missing_dir.clone());

    let err = writer.write("digest.csv", b"hello").unwrap_err();

    assert!(matches!(err, PersistError::Io(_)));
    assert!(!missing_dir.join("digest.csv").exists());
}
