use std::io::{self, Write};
use std::sync::Mutex;
use std::thread;

use colored::Colorize;
use yt_engine::{CrosstermCursor, EngineEvent, ProgressSink, TerminalCursor};
use yt_logging::{yt_debug, yt_warn};

/// Exit status used when the user interrupts a download.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

pub fn spinner_label() -> String {
    format!("{}...", "Downloading".red())
}

/// `\r` overwrites whatever the spinner left on the line.
pub fn confirmation_line(file_name: &str) -> String {
    format!("\r{} \"{}\"", "Downloaded".green(), file_name)
}

/// Prints one confirmation line per downloaded item.
pub struct TerminalSink<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> ProgressSink for TerminalSink<W> {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::Downloaded { file_name, .. } => {
                let mut out = self
                    .out
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                let _ = writeln!(out, "{}", confirmation_line(&file_name));
                let _ = out.flush();
            }
        }
    }
}

/// Shows the cursor again and exits when the user presses Ctrl-C, since the
/// cursor guard cannot run once the process is being torn down by a signal.
pub fn restore_cursor_on_interrupt() {
    let spawned = thread::Builder::new()
        .name("yt-interrupt".to_string())
        .spawn(|| {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    yt_warn!("interrupt handler unavailable: {err}");
                    return;
                }
            };
            if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
                let _ = CrosstermCursor::stdout().show();
                println!();
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        });
    if let Err(err) = spawned {
        yt_debug!("could not spawn interrupt handler: {err}");
    }
}
