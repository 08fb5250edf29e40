use yt_core::DownloadConfig;

use crate::{EngineEvent, FetchError, MediaHandle};

/// Work performed on every resolved handle, e.g. downloading it.
#[async_trait::async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, handle: MediaHandle, config: &DownloadConfig) -> Result<(), FetchError>;
}

/// Adapts a plain closure into a [`Processor`].
pub struct FnProcessor<F> {
    func: F,
}

impl<F> FnProcessor<F>
where
    F: Fn(MediaHandle, &DownloadConfig) -> Result<(), FetchError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait::async_trait]
impl<F> Processor for FnProcessor<F>
where
    F: Fn(MediaHandle, &DownloadConfig) -> Result<(), FetchError> + Send + Sync,
{
    async fn process(&self, handle: MediaHandle, config: &DownloadConfig) -> Result<(), FetchError> {
        (self.func)(handle, config)
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}
