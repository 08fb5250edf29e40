//! A cooperative terminal spinner driven by the orchestrator's calling thread.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::signal::CompletionSignal;

/// Glyph cycle, one per frame.
pub const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct SpinnerSettings {
    pub interval: Duration,
    pub label: String,
}

impl Default for SpinnerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            label: "Downloading...".to_string(),
        }
    }
}

pub fn glyph(frame_index: usize) -> char {
    GLYPHS[frame_index % GLYPHS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpinnerState {
    frame_index: usize,
    active: bool,
}

impl SpinnerState {
    fn start() -> Self {
        Self {
            frame_index: 0,
            active: true,
        }
    }
}

/// Renders `\r{label}  {glyph}` every interval until the signal fires.
pub struct Spinner<W: Write> {
    settings: SpinnerSettings,
    out: W,
}

impl<W: Write> Spinner<W> {
    pub fn new(settings: SpinnerSettings, out: W) -> Self {
        Self { settings, out }
    }

    /// Runs until `signal` fires and returns the number of frames rendered.
    ///
    /// The signal is checked before every frame, so nothing is drawn once it
    /// has fired. The last frame stays on the line; clearing it is up to the
    /// caller.
    pub fn run(&mut self, signal: &mut CompletionSignal) -> usize {
        let mut state = SpinnerState::start();
        while state.active {
            if signal.is_fired() {
                state.active = false;
                continue;
            }
            // A broken terminal must not stop the wait for the work itself.
            let _ = write!(
                self.out,
                "\r{}  {}",
                self.settings.label,
                glyph(state.frame_index)
            );
            let _ = self.out.flush();
            state.frame_index += 1;
            thread::sleep(self.settings.interval);
        }
        state.frame_index
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::completion_signal;

    #[test]
    fn glyphs_cycle_every_four_frames() {
        let rendered: String = (0..6).map(glyph).collect();
        assert_eq!(rendered, "|/-\\|/");
    }

    #[test]
    fn fired_signal_renders_nothing() {
        let (tx, mut signal) = completion_signal();
        tx.fire(Ok(()));
        let mut spinner = Spinner::new(SpinnerSettings::default(), Vec::new());
        assert_eq!(spinner.run(&mut signal), 0);
        assert!(spinner.into_inner().is_empty());
    }

    #[test]
    fn renders_frames_until_signal() {
        let (tx, mut signal) = completion_signal();
        let settings = SpinnerSettings {
            interval: Duration::from_millis(10),
            label: "Working".to_string(),
        };
        let firing = thread::spawn(move || {
            thread::sleep(Duration::from_millis(55));
            tx.fire(Ok(()));
        });
        let mut spinner = Spinner::new(settings, Vec::new());
        let frames = spinner.run(&mut signal);
        firing.join().unwrap();

        let output = String::from_utf8(spinner.into_inner()).unwrap();
        assert!(frames >= 1);
        assert_eq!(output.matches("\rWorking  ").count(), frames);
        assert!(output.starts_with("\rWorking  |"));
    }
}
