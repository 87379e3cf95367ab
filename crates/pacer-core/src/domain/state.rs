//! Per-slot lifecycle inside a run.

use serde::{Deserialize, Serialize};

use super::outcome::OutcomeKind;

/// Lifecycle of one job slot.
///
/// State transitions:
/// - Queued -> Running -> Succeeded
/// - Queued -> Running -> Failed
///
/// No retry edge: a failed slot stays failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    /// Waiting in the admission queue.
    Queued,

    /// Dispatched, not yet terminal.
    Running,

    /// Outcome recorded as success.
    Succeeded,

    /// Outcome recorded as failure (error, panic, or abort).
    Failed,
}

impl JobState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }

    /// Terminal state for an outcome of the given kind.
    pub fn finished(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::Success => JobState::Succeeded,
            OutcomeKind::Failure => JobState::Failed,
        }
    }
}
