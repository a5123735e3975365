//! Replay of an envelope sequence onto an aggregate
//!
//! ```text
//! Unapplied --ok--> PartiallyApplied(1) --ok--> ... --end--> FullyApplied(n)
//!     |                    |
//!     +------err-----------+-----> Failed { applied, error }
//! ```
//!
//! Envelopes are applied strictly in input order. The first failure is
//! terminal: nothing after it is touched and nothing before it is undone.

use crate::envelope::Envelope;
use crate::error::EventError;

/// Progress of one replay
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplayState {
    /// Nothing applied yet
    #[default]
    Unapplied,
    /// The first `k` envelopes were applied
    PartiallyApplied(usize),
    /// Every envelope was applied; carries their count
    FullyApplied(usize),
    /// Applying envelope number `applied + 1` failed
    Failed { applied: usize, error: EventError },
}

impl ReplayState {
    /// Number of envelopes applied successfully
    pub fn applied(&self) -> usize {
        match self {
            ReplayState::Unapplied => 0,
            ReplayState::PartiallyApplied(applied)
            | ReplayState::FullyApplied(applied)
            | ReplayState::Failed { applied, .. } => *applied,
        }
    }

    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReplayState::FullyApplied(_) | ReplayState::Failed { .. }
        )
    }

    /// Transition on the outcome of applying the next envelope
    pub fn record(self, outcome: Result<(), EventError>) -> Self {
        if self.is_terminal() {
            return self;
        }
        let applied = self.applied();
        match outcome {
            Ok(()) => ReplayState::PartiallyApplied(applied + 1),
            Err(error) => ReplayState::Failed { applied, error },
        }
    }

    /// Transition at the end of the input
    pub fn finish(self) -> Self {
        match self {
            ReplayState::Unapplied => ReplayState::FullyApplied(0),
            ReplayState::PartiallyApplied(applied) => ReplayState::FullyApplied(applied),
            terminal => terminal,
        }
    }

    /// The applied count, or the error that stopped the replay
    pub fn into_result(self) -> Result<usize, EventError> {
        match self {
            ReplayState::Failed { error, .. } => Err(error),
            other => Ok(other.applied()),
        }
    }
}

/// Apply `envelopes` in order, stopping at the first failure.
pub fn replay<'a, I, F>(envelopes: I, mut apply: F) -> ReplayState
where
    I: IntoIterator<Item = &'a Envelope>,
    F: FnMut(&Envelope) -> Result<(), EventError>,
{
    let mut state = ReplayState::Unapplied;
    for envelope in envelopes {
        state = state.record(apply(envelope));
        if let ReplayState::Failed { applied, error } = &state {
            tracing::debug!(
                "Replay stopped after {} envelope(s) at {} #{}: {}",
                applied,
                envelope.event_type_name,
                envelope.sequence_number,
                error
            );
            return state;
        }
    }
    state.finish()
}
