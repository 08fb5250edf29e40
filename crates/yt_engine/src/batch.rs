use std::sync::{Arc, Mutex, PoisonError};

use yt_core::DownloadConfig;
use yt_logging::{yt_error, yt_info};

use crate::job::run_job;
use crate::process::Processor;
use crate::resolve::Resolver;
use crate::{BatchResult, FetchError, JobOutcome};

/// Write-once error slot shared by all workers of a batch.
#[derive(Debug, Default)]
struct FirstError {
    slot: Mutex<Option<FetchError>>,
}

impl FirstError {
    /// Keeps `err` only if no other worker got there first.
    fn record(&self, err: &FetchError) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err.clone());
        }
    }

    fn take(&self) -> Option<FetchError> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Runs one task per identifier and waits for all of them.
///
/// A failure is logged where it happens and never cancels sibling tasks. The
/// returned error is whichever failure took the slot first, which is not
/// necessarily the first identifier. Must be called inside a tokio runtime.
pub async fn run_batch(
    identifiers: &[String],
    resolver: Arc<dyn Resolver>,
    processor: Arc<dyn Processor>,
    config: Arc<DownloadConfig>,
) -> BatchResult {
    let first_error = Arc::new(FirstError::default());

    let mut workers = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        let resolver = resolver.clone();
        let processor = processor.clone();
        let config = config.clone();
        let first_error = first_error.clone();
        let owned = identifier.clone();
        let worker = tokio::spawn(async move {
            let result = run_job(&owned, resolver.as_ref(), processor.as_ref(), &config).await;
            if let Err(err) = &result {
                yt_error!("{err}");
                first_error.record(err);
            }
            JobOutcome {
                identifier: owned,
                error: result.err(),
            }
        });
        workers.push((identifier, worker));
    }

    let mut outcomes = Vec::with_capacity(workers.len());
    for (identifier, worker) in workers {
        let outcome = match worker.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                let err = FetchError::Internal(format!("worker for {identifier} failed: {join_err}"));
                yt_error!("{err}");
                first_error.record(&err);
                JobOutcome {
                    identifier: identifier.clone(),
                    error: Some(err),
                }
            }
        };
        outcomes.push(outcome);
    }

    let result = BatchResult {
        error: first_error.take(),
        outcomes,
    };
    yt_info!(
        "{} of {} items fetched",
        result.succeeded(),
        result.outcomes.len()
    );
    result
}
