//! `yt`: download videos or their audio track, several at a time.
mod cli;
mod platform;

use std::process::ExitCode;

use clap::Parser;

use cli::Args;
use platform::logging::{self, LogDestination};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::initialize(
        LogDestination::from_log_file(args.log_file.as_deref()),
        yt_logging::level_for_verbosity(args.verbose),
    );

    match platform::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
