use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use yt_core::{DownloadConfig, Phase};
use yt_logging::{yt_debug, yt_warn};

use crate::batch::run_batch;
use crate::cursor::{CrosstermCursor, CursorGuard, TerminalCursor};
use crate::job::run_job;
use crate::process::Processor;
use crate::resolve::Resolver;
use crate::signal::completion_signal;
use crate::spinner::{Spinner, SpinnerSettings};
use crate::FetchError;

pub const NO_ARGUMENTS: &str =
    "no Arguments\n\nUse \"yt [command] --help\" for more information about a command";

/// Entry point for one user command: runs the fetch jobs on a background
/// thread while the calling thread animates the spinner.
pub struct Orchestrator {
    config: Arc<DownloadConfig>,
    resolver: Arc<dyn Resolver>,
    cursor: Box<dyn TerminalCursor>,
    out: Box<dyn Write + Send>,
    spinner: SpinnerSettings,
}

impl Orchestrator {
    pub fn new(config: DownloadConfig, resolver: Arc<dyn Resolver>) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
            cursor: Box::new(CrosstermCursor::stdout()),
            out: Box::new(io::stdout()),
            spinner: SpinnerSettings::default(),
        }
    }

    pub fn with_cursor(mut self, cursor: impl TerminalCursor + 'static) -> Self {
        self.cursor = Box::new(cursor);
        self
    }

    /// Where spinner frames are written.
    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    pub fn with_spinner(mut self, settings: SpinnerSettings) -> Self {
        self.spinner = settings;
        self
    }

    /// Fetches every identifier and hands each handle to `processor`.
    ///
    /// One identifier runs as a single job and its error comes back as is.
    /// More than one runs as a batch and the first recorded failure is
    /// returned. An empty list fails before anything touches the terminal.
    pub fn download(
        &mut self,
        identifiers: &[String],
        processor: Arc<dyn Processor>,
    ) -> Result<(), FetchError> {
        if identifiers.is_empty() {
            return Err(FetchError::InvalidArgument(NO_ARGUMENTS.to_string()));
        }

        let mut phase = Phase::Idle;
        let _guard = CursorGuard::acquire(self.cursor.as_mut());

        let (done, mut signal) = completion_signal();
        let identifiers = identifiers.to_vec();
        let resolver = self.resolver.clone();
        let config = self.config.clone();
        let dispatcher = thread::Builder::new()
            .name("yt-dispatch".to_string())
            .spawn(move || {
                let result = match tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .thread_name("yt-worker")
                    .build()
                {
                    Ok(runtime) => runtime.block_on(dispatch(identifiers, resolver, processor, config)),
                    Err(err) => Err(FetchError::Internal(format!("starting runtime: {err}"))),
                };
                done.fire(result);
            })
            .map_err(|err| FetchError::Internal(format!("spawning dispatcher: {err}")))?;
        advance(&mut phase, Phase::Dispatched)?;

        if signal.is_fired() {
            advance(&mut phase, Phase::Completed)?;
        } else {
            advance(&mut phase, Phase::Running)?;
            let frames = Spinner::new(self.spinner.clone(), &mut self.out).run(&mut signal);
            advance(&mut phase, Phase::Completed)?;
            yt_debug!("spinner stopped after {frames} frames");
            if frames > 0 {
                if let Err(err) = finish_line(self.out.as_mut()) {
                    yt_debug!("could not clear spinner line: {err}");
                }
            }
        }

        if dispatcher.join().is_err() {
            yt_warn!("dispatcher thread panicked");
        }
        signal
            .take()
            .unwrap_or_else(|| Err(FetchError::Internal("completion was never signalled".to_string())))
    }
}

async fn dispatch(
    identifiers: Vec<String>,
    resolver: Arc<dyn Resolver>,
    processor: Arc<dyn Processor>,
    config: Arc<DownloadConfig>,
) -> Result<(), FetchError> {
    match identifiers.as_slice() {
        [single] => run_job(single, resolver.as_ref(), processor.as_ref(), &config).await,
        many => run_batch(many, resolver, processor, config).await.into_result(),
    }
}

/// Wipes the last spinner frame and leaves the cursor at column 0.
fn finish_line(out: &mut dyn Write) -> io::Result<()> {
    out.write_all(b"\r")?;
    out.queue(Clear(ClearType::CurrentLine))?;
    out.flush()
}

fn advance(phase: &mut Phase, to: Phase) -> Result<(), FetchError> {
    let next = phase
        .advance(to)
        .map_err(|err| FetchError::Internal(err.to_string()))?;
    yt_debug!("orchestrator {:?} -> {:?}", phase, next);
    *phase = next;
    Ok(())
}
