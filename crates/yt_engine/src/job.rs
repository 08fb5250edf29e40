use yt_core::{normalize_identifier, DownloadConfig};
use yt_logging::yt_trace;

use crate::process::Processor;
use crate::resolve::Resolver;
use crate::{FetchError, ResolveFailure};

/// Resolves one identifier and hands the handle to `processor`.
///
/// URLs are reduced to their bare identifier first. Every failure is returned
/// unchanged; nothing is retried.
pub async fn run_job(
    raw: &str,
    resolver: &dyn Resolver,
    processor: &dyn Processor,
    config: &DownloadConfig,
) -> Result<(), FetchError> {
    let normalized = normalize_identifier(raw).map_err(|err| {
        FetchError::resolution(raw, ResolveFailure::InvalidIdentifier, err.to_string())
    })?;
    if normalized.was_url {
        yt_trace!("{raw} -> {}", normalized.identifier);
    }

    let handle = resolver.resolve(normalized.identifier.as_str()).await?;
    yt_trace!("{}: resolved {:?}", handle.id, handle.title);
    processor.process(handle, config).await
}
