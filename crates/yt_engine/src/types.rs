use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use yt_core::MediaKind;

/// A resolved media item, ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub length_seconds: Option<u64>,
    /// Filesystem-safe stem derived from the title, without extension.
    pub file_name: String,
    pub formats: Vec<StreamFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFormat {
    pub itag: u32,
    pub url: String,
    pub mime_type: String,
    pub bitrate: u64,
    pub content_length: Option<u64>,
    /// Adaptive formats carry a single track; progressive ones carry both.
    pub adaptive: bool,
}

impl StreamFormat {
    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    pub fn is_audio_only(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }
}

impl MediaHandle {
    /// Picks the stream to download for `kind`.
    ///
    /// Video prefers progressive formats (audio included) and falls back to
    /// adaptive video. Audio takes the best adaptive audio track.
    pub fn select_stream(&self, kind: MediaKind) -> Option<&StreamFormat> {
        let formats = self.formats.as_slice();
        match kind {
            MediaKind::Video => best_format(formats, false, StreamFormat::is_video)
                .or_else(|| best_format(formats, true, StreamFormat::is_video)),
            MediaKind::Audio => best_format(formats, true, StreamFormat::is_audio_only)
                .or_else(|| best_format(formats, false, StreamFormat::is_audio_only)),
        }
    }
}

fn best_format(
    formats: &[StreamFormat],
    adaptive: bool,
    pred: fn(&StreamFormat) -> bool,
) -> Option<&StreamFormat> {
    formats
        .iter()
        .filter(|f| f.adaptive == adaptive && pred(*f))
        .max_by_key(|f| f.bitrate)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A media item was written to disk.
    Downloaded {
        identifier: String,
        file_name: String,
        path: PathBuf,
        bytes: u64,
    },
}

/// Result of one fetch job inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub identifier: String,
    pub error: Option<FetchError>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole batch: the first recorded error plus every job outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchResult {
    pub error: Option<FetchError>,
    pub outcomes: Vec<JobOutcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn into_result(self) -> Result<(), FetchError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{identifier}: {kind}: {message}")]
    Resolution {
        identifier: String,
        kind: ResolveFailure,
        message: String,
    },
    #[error("{identifier}: {kind}: {message}")]
    Processing {
        identifier: String,
        kind: ProcessFailure,
        message: String,
    },
    #[error("internal error: {0}")]
    Internal(String),
}

impl FetchError {
    pub fn resolution(
        identifier: impl Into<String>,
        kind: ResolveFailure,
        message: impl Into<String>,
    ) -> Self {
        FetchError::Resolution {
            identifier: identifier.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn processing(
        identifier: impl Into<String>,
        kind: ProcessFailure,
        message: impl Into<String>,
    ) -> Self {
        FetchError::Processing {
            identifier: identifier.into(),
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    InvalidIdentifier,
    NotFound,
    Unplayable,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for ResolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveFailure::InvalidIdentifier => write!(f, "invalid identifier"),
            ResolveFailure::NotFound => write!(f, "not found"),
            ResolveFailure::Unplayable => write!(f, "unplayable"),
            ResolveFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ResolveFailure::Timeout => write!(f, "timeout"),
            ResolveFailure::Network => write!(f, "network error"),
            ResolveFailure::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessFailure {
    NoMatchingStream,
    HttpStatus(u16),
    Network,
    Incomplete,
    Io,
    Other,
}

impl fmt::Display for ProcessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessFailure::NoMatchingStream => write!(f, "no matching stream"),
            ProcessFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ProcessFailure::Network => write!(f, "network error"),
            ProcessFailure::Incomplete => write!(f, "incomplete transfer"),
            ProcessFailure::Io => write!(f, "io error"),
            ProcessFailure::Other => write!(f, "processing failed"),
        }
    }
}
