use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};

use crate::FetchError;

/// Creates a one-shot completion channel carrying the dispatched work's result.
pub fn completion_signal() -> (CompletionSender, CompletionSignal) {
    let (tx, rx) = mpsc::sync_channel(1);
    (
        CompletionSender { tx },
        CompletionSignal {
            rx,
            state: SignalState::Pending,
        },
    )
}

/// Producer half. Firing consumes it, so the signal fires at most once.
#[derive(Debug)]
pub struct CompletionSender {
    tx: SyncSender<Result<(), FetchError>>,
}

impl CompletionSender {
    pub fn fire(self, result: Result<(), FetchError>) {
        // The receiver only disappears if the orchestrator is already gone.
        let _ = self.tx.send(result);
    }
}

#[derive(Debug)]
enum SignalState {
    Pending,
    Fired(Result<(), FetchError>),
}

/// Consumer half, polled by the display loop.
#[derive(Debug)]
pub struct CompletionSignal {
    rx: Receiver<Result<(), FetchError>>,
    state: SignalState,
}

impl CompletionSignal {
    /// Non-blocking check. Once fired, every later call returns the same result.
    ///
    /// A sender dropped without firing (its thread panicked) counts as fired
    /// with an internal error.
    pub fn poll(&mut self) -> Option<&Result<(), FetchError>> {
        if let SignalState::Pending = self.state {
            match self.rx.try_recv() {
                Ok(result) => self.state = SignalState::Fired(result),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    self.state = SignalState::Fired(Err(FetchError::Internal(
                        "dispatched work ended without reporting a result".to_string(),
                    )));
                }
            }
        }
        match &self.state {
            SignalState::Fired(result) => Some(result),
            SignalState::Pending => None,
        }
    }

    pub fn is_fired(&mut self) -> bool {
        self.poll().is_some()
    }

    /// Takes the result out, if the signal has fired.
    pub fn take(mut self) -> Option<Result<(), FetchError>> {
        self.poll();
        match self.state {
            SignalState::Fired(result) => Some(result),
            SignalState::Pending => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_until_fired_then_stable() {
        let (tx, mut signal) = completion_signal();
        assert!(signal.poll().is_none());
        tx.fire(Err(FetchError::InvalidArgument("x".into())));
        for _ in 0..3 {
            assert_eq!(
                signal.poll(),
                Some(&Err(FetchError::InvalidArgument("x".into())))
            );
        }
        assert_eq!(
            signal.take(),
            Some(Err(FetchError::InvalidArgument("x".into())))
        );
    }

    #[test]
    fn dropped_sender_reports_internal_error() {
        let (tx, mut signal) = completion_signal();
        drop(tx);
        assert!(matches!(signal.poll(), Some(Err(FetchError::Internal(_)))));
    }

    #[test]
    fn take_before_fire_is_none() {
        let (_tx, signal) = completion_signal();
        assert_eq!(signal.take(), None);
    }
}
