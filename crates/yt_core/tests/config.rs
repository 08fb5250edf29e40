use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use yt_core::{DownloadConfig, MediaKind, Phase};

#[test]
fn relative_path_is_made_absolute() {
    let cwd = Path::new("/home/user");
    let config = DownloadConfig::resolve(Some(Path::new("music")), ".mpa", cwd);
    assert_eq!(config.download_path, PathBuf::from("/home/user/music"));
    assert_eq!(config.extension, ".mpa");
}

#[test]
fn missing_or_empty_path_defaults_to_cwd() {
    let cwd = Path::new("/srv/media");
    let none = DownloadConfig::resolve(None, ".mp4", cwd);
    let empty = DownloadConfig::resolve(Some(Path::new("")), ".mp4", cwd);
    assert_eq!(none.download_path, PathBuf::from("/srv/media"));
    assert_eq!(none, empty);
}

#[test]
fn absolute_path_is_kept() {
    let config = DownloadConfig::resolve(Some(Path::new("/tmp/out")), ".mp4", Path::new("/x"));
    assert_eq!(config.download_path, PathBuf::from("/tmp/out"));
}

#[test]
fn extension_gains_a_leading_dot() {
    let cwd = Path::new("/x");
    assert_eq!(DownloadConfig::resolve(None, "webm", cwd).extension, ".webm");
    assert_eq!(DownloadConfig::resolve(None, "", cwd).extension, "");
    let config = DownloadConfig::resolve(None, ".m4a", cwd);
    assert_eq!(config.target_path("song"), PathBuf::from("/x/song.m4a"));
}

#[test]
fn media_kinds_have_default_extensions() {
    assert_eq!(MediaKind::Video.default_extension(), ".mp4");
    assert_eq!(MediaKind::Audio.default_extension(), ".mpa");
    assert_eq!(MediaKind::Audio.to_string(), "audio");
}

#[test]
fn phase_follows_the_lifecycle() {
    let phase = Phase::default();
    assert_eq!(phase, Phase::Idle);
    let phase = phase.advance(Phase::Dispatched).unwrap();
    let phase = phase.advance(Phase::Running).unwrap();
    let phase = phase.advance(Phase::Completed).unwrap();
    assert!(phase.is_terminal());

    let err = phase.advance(Phase::Running).unwrap_err();
    assert_eq!((err.from, err.to), (Phase::Completed, Phase::Running));
    assert!(Phase::Idle.advance(Phase::Completed).is_err());
    assert_eq!(Phase::Dispatched.advance(Phase::Completed), Ok(Phase::Completed));
}
