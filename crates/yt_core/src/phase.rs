use thiserror::Error;

/// Lifecycle of one orchestrator call. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dispatched,
    Running,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid phase transition {from:?} -> {to:?}")]
pub struct PhaseError {
    pub from: Phase,
    pub to: Phase,
}

impl Phase {
    /// Moves to `to` if that is the next step in the lifecycle.
    ///
    /// The only shortcut is `Dispatched -> Completed`, taken when the work
    /// has already finished before the spinner would start.
    pub fn advance(self, to: Phase) -> Result<Phase, PhaseError> {
        let allowed = matches!(
            (self, to),
            (Phase::Idle, Phase::Dispatched)
                | (Phase::Dispatched, Phase::Running)
                | (Phase::Dispatched, Phase::Completed)
                | (Phase::Running, Phase::Completed)
        );
        if allowed {
            Ok(to)
        } else {
            Err(PhaseError { from: self, to })
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Completed
    }
}
