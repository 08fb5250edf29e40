use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::ExecutableCommand;
use yt_logging::yt_debug;

/// Terminal cursor visibility control.
pub trait TerminalCursor: Send {
    fn hide(&mut self) -> io::Result<()>;
    fn show(&mut self) -> io::Result<()>;
}

/// Emits the cursor escape sequences to a writer (stdout by default).
pub struct CrosstermCursor<W: Write + Send> {
    out: W,
}

impl CrosstermCursor<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> CrosstermCursor<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> TerminalCursor for CrosstermCursor<W> {
    fn hide(&mut self) -> io::Result<()> {
        self.out.execute(Hide).map(|_| ())
    }

    fn show(&mut self) -> io::Result<()> {
        self.out.execute(Show).map(|_| ())
    }
}

/// Hides the cursor for its lifetime. Dropping the guard shows the cursor
/// again, including during unwinding.
pub struct CursorGuard<'a> {
    cursor: &'a mut dyn TerminalCursor,
}

impl<'a> CursorGuard<'a> {
    pub fn acquire(cursor: &'a mut dyn TerminalCursor) -> Self {
        if let Err(err) = cursor.hide() {
            yt_debug!("hiding cursor failed: {err}");
        }
        Self { cursor }
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.cursor.show() {
            yt_debug!("restoring cursor failed: {err}");
        }
    }
}
