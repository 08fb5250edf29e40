use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Which stream of a media item gets downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Video,
    Audio,
}

impl MediaKind {
    pub fn default_extension(self) -> &'static str {
        match self {
            MediaKind::Video => ".mp4",
            MediaKind::Audio => ".mpa",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for one command invocation: where files go and what they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    pub download_path: PathBuf,
    pub extension: String,
}

impl DownloadConfig {
    /// Builds a config whose `download_path` is absolute, resolving relative
    /// (or empty) paths against `cwd`.
    pub fn resolve(path: Option<&Path>, extension: &str, cwd: &Path) -> Self {
        let download_path = match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) if !p.as_os_str().is_empty() => cwd.join(p),
            _ => cwd.to_path_buf(),
        };
        Self {
            download_path,
            extension: normalize_extension(extension),
        }
    }

    /// Same as [`DownloadConfig::resolve`] against the process working directory.
    pub fn from_current_dir(path: Option<&Path>, extension: &str) -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::resolve(path, extension, &cwd))
    }

    pub fn target_file_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.extension)
    }

    pub fn target_path(&self, stem: &str) -> PathBuf {
        self.download_path.join(self.target_file_name(stem))
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_path: PathBuf::from("."),
            extension: MediaKind::Video.default_extension().to_string(),
        }
    }
}

/// Accepts `mp4` as well as `.mp4`; an empty extension stays empty.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}
