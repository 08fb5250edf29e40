//! yt engine: the concurrent fetch orchestrator and its collaborators.
mod batch;
mod cursor;
mod download;
mod filename;
mod job;
mod orchestrator;
mod persist;
mod process;
mod resolve;
mod signal;
mod spinner;
mod types;

pub use batch::run_batch;
pub use cursor::{CrosstermCursor, CursorGuard, TerminalCursor};
pub use download::{DownloadSettings, MediaDownloader};
pub use filename::media_file_stem;
pub use job::run_job;
pub use orchestrator::{Orchestrator, NO_ARGUMENTS};
pub use persist::{ensure_output_dir, AtomicFileWriter, PendingFile, PersistError};
pub use process::{FnProcessor, Processor, ProgressSink};
pub use resolve::{PlayerResolver, Resolver, ResolverSettings};
pub use signal::{completion_signal, CompletionSender, CompletionSignal};
pub use spinner::{glyph, Spinner, SpinnerSettings, DEFAULT_INTERVAL, GLYPHS};
pub use types::{
    BatchResult, EngineEvent, FetchError, JobOutcome, MediaHandle, ProcessFailure,
    ResolveFailure, StreamFormat,
};
