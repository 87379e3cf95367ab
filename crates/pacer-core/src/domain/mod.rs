//! Domain model (IDs, jobs, outcomes, slot state, events).

pub mod events;
pub mod ids;
pub mod job;
pub mod outcome;
pub mod state;

pub use events::{RunEvent, RunEventKind};
pub use ids::{JobIndex, RunId};
pub use job::{Job, JobFuture, QueueEntry};
pub use outcome::{JobFailure, Outcome, OutcomeKind};
pub use state::JobState;
