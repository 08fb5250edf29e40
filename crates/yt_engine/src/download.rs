use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use yt_core::{DownloadConfig, MediaKind};
use yt_logging::{yt_debug, yt_info};

use crate::persist::{AtomicFileWriter, PersistError};
use crate::process::{ProgressSink, Processor};
use crate::{EngineEvent, FetchError, MediaHandle, ProcessFailure};

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub connect_timeout: Duration,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Downloads the stream matching `kind` into the configured directory.
pub struct MediaDownloader {
    kind: MediaKind,
    client: reqwest::Client,
    sink: Arc<dyn ProgressSink>,
}

impl MediaDownloader {
    pub fn new(
        kind: MediaKind,
        settings: DownloadSettings,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<Self, FetchError> {
        // No overall timeout: transfers of large items legitimately run long.
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| FetchError::Internal(format!("http client: {err}")))?;
        Ok(Self { kind, client, sink })
    }
}

#[async_trait::async_trait]
impl Processor for MediaDownloader {
    async fn process(&self, handle: MediaHandle, config: &DownloadConfig) -> Result<(), FetchError> {
        let id = handle.id.as_str();
        let stream = handle.select_stream(self.kind).ok_or_else(|| {
            FetchError::processing(
                id,
                ProcessFailure::NoMatchingStream,
                format!("no downloadable {} stream", self.kind),
            )
        })?;
        yt_debug!(
            "{id}: itag {} ({}, {} bps)",
            stream.itag,
            stream.mime_type,
            stream.bitrate
        );

        let file_name = config.target_file_name(&handle.file_name);
        let writer = AtomicFileWriter::new(config.download_path.clone());
        let mut pending = writer
            .begin(&file_name)
            .map_err(|err| persist_error(id, err))?;

        let response = self
            .client
            .get(&stream.url)
            .send()
            .await
            .map_err(|err| network_error(id, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::processing(
                id,
                ProcessFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|err| network_error(id, err))?;
            pending
                .write_chunk(&chunk)
                .map_err(|err| persist_error(id, err))?;
        }

        let bytes = pending.bytes_written();
        if let Some(expected) = stream.content_length.filter(|&len| len != bytes) {
            return Err(FetchError::processing(
                id,
                ProcessFailure::Incomplete,
                format!("received {bytes} of {expected} bytes"),
            ));
        }
        let path = pending.commit().map_err(|err| persist_error(id, err))?;
        yt_info!("{id}: wrote {bytes} bytes to {}", path.display());

        self.sink.emit(EngineEvent::Downloaded {
            identifier: handle.id.clone(),
            file_name,
            path,
            bytes,
        });
        Ok(())
    }
}

fn network_error(identifier: &str, err: reqwest::Error) -> FetchError {
    FetchError::processing(identifier, ProcessFailure::Network, err.to_string())
}

fn persist_error(identifier: &str, err: PersistError) -> FetchError {
    FetchError::processing(identifier, ProcessFailure::Io, err.to_string())
}
