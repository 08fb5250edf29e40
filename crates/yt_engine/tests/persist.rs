use std::fs;

use yt_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads/nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn chunks_land_in_target_only_after_commit() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let mut pending = writer.begin("song.mpa").unwrap();
    pending.write_chunk(b"abc").unwrap();
    pending.write_chunk(b"def").unwrap();
    assert_eq!(pending.bytes_written(), 6);
    assert!(!pending.target().exists());

    let path = pending.commit().unwrap();
    assert_eq!(path, temp.path().join("song.mpa"));
    assert_eq!(fs::read(&path).unwrap(), b"abcdef");
}

#[test]
fn dropped_pending_file_is_discarded() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let mut pending = writer.begin("video.mp4").unwrap();
    pending.write_chunk(b"partial").unwrap();
    drop(pending);

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn redownload_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("video.mp4", b"old").unwrap();
    let second = writer.write("video.mp4", b"new").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"new");
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("video.mp4", b"data").is_err());
    assert!(!file_path.with_file_name("video.mp4").exists());
}

#[test]
fn existing_download_dir_is_accepted_as_is() {
    let temp = TempDir::new().unwrap();
    ensure_output_dir(temp.path()).unwrap();
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
