//! RunState - one batch's bookkeeping, owned by the coordinator.
//!
//! All transitions go through methods; the coordinator never touches the
//! counters directly. Nothing here is shared, so no locks.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use thiserror::Error;

use crate::domain::{Job, JobFailure, JobIndex, JobState, Outcome, QueueEntry};
use crate::observability::RunCounts;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("job {0} is not part of this run")]
    UnknownJob(JobIndex),

    #[error("job {index} cannot be recorded while {state:?}")]
    NotRunning { index: JobIndex, state: JobState },
}

/// Bookkeeping for one `run` call.
///
/// Invariants:
/// - `0 <= in_flight <= limit`
/// - `completed <= total`
/// - each result slot is written at most once
#[derive(Debug)]
pub struct RunState<T, E> {
    limit: NonZeroUsize,
    in_flight: usize,
    completed: usize,
    states: Vec<JobState>,
    results: Vec<Option<Outcome<T, E>>>,
    queue: VecDeque<QueueEntry<T, E>>,
}

impl<T, E> RunState<T, E> {
    /// Queue every job in submission order.
    pub fn new(limit: NonZeroUsize, jobs: Vec<Job<T, E>>) -> Self {
        let total = jobs.len();
        let queue = jobs
            .into_iter()
            .enumerate()
            .map(|(i, job)| QueueEntry::new(JobIndex::new(i), job))
            .collect();

        Self {
            limit,
            in_flight: 0,
            completed: 0,
            states: vec![JobState::Queued; total],
            results: std::iter::repeat_with(|| None).take(total).collect(),
            queue,
        }
    }

    pub fn total(&self) -> usize {
        self.states.len()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn state_of(&self, index: JobIndex) -> Option<JobState> {
        self.states.get(index.get()).copied()
    }

    pub fn has_capacity(&self) -> bool {
        self.in_flight < self.limit.get()
    }

    /// One admission step: take the head of the queue if a slot is free.
    ///
    /// Returns `None` when the queue is empty or the cap is reached. The
    /// caller must start the returned job.
    pub fn admit(&mut self) -> Option<QueueEntry<T, E>> {
        if !self.has_capacity() {
            return None;
        }
        let entry = self.queue.pop_front()?;
        self.in_flight += 1;
        self.states[entry.index.get()] = JobState::Running;
        Some(entry)
    }

    /// Record a dispatched job's outcome and free its slot.
    ///
    /// Rejects anything but the first completion of a running job, so a slot
    /// can never be overwritten.
    pub fn record(&mut self, index: JobIndex, outcome: Outcome<T, E>) -> Result<(), StateError> {
        let state = self
            .state_of(index)
            .ok_or(StateError::UnknownJob(index))?;
        if state != JobState::Running {
            return Err(StateError::NotRunning { index, state });
        }

        self.states[index.get()] = JobState::finished(outcome.kind());
        self.results[index.get()] = Some(outcome);
        self.in_flight -= 1;
        self.completed += 1;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total()
    }

    pub fn counts(&self) -> RunCounts {
        let mut counts = RunCounts::default();
        for state in &self.states {
            counts.record(*state);
        }
        counts
    }

    /// Outcomes in submission order, one per job.
    ///
    /// A slot that never got an outcome comes back as `JobFailure::Aborted`,
    /// so the length always matches the submitted batch.
    pub fn into_outcomes(self) -> Vec<Outcome<T, E>> {
        self.results
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Outcome::Failure(JobFailure::Aborted)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(n: usize) -> Vec<Job<usize, String>> {
        (0..n).map(|i| Job::new(move || async move { Ok(i) })).collect()
    }

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn admit_respects_limit_and_fifo() {
        let mut state = RunState::new(limit(2), jobs(4));

        let a = state.admit().unwrap();
        let b = state.admit().unwrap();
        assert_eq!(a.index, JobIndex::new(0));
        assert_eq!(b.index, JobIndex::new(1));
        assert!(state.admit().is_none());
        assert_eq!(state.in_flight(), 2);
        assert_eq!(state.queued(), 2);
    }

    #[test]
    fn record_frees_a_slot() {
        let mut state = RunState::new(limit(1), jobs(2));
        let a = state.admit().unwrap();
        assert!(state.admit().is_none());

        state.record(a.index, Outcome::Success(0)).unwrap();
        assert_eq!(state.in_flight(), 0);
        assert_eq!(state.completed(), 1);
        assert_eq!(state.state_of(a.index), Some(JobState::Succeeded));

        let b = state.admit().unwrap();
        assert_eq!(b.index, JobIndex::new(1));
    }

    #[test]
    fn slot_cannot_be_written_twice() {
        let mut state = RunState::new(limit(1), jobs(1));
        let a = state.admit().unwrap();
        state.record(a.index, Outcome::Success(0)).unwrap();

        let err = state
            .record(a.index, Outcome::Success(99))
            .unwrap_err();
        assert_eq!(
            err,
            StateError::NotRunning {
                index: a.index,
                state: JobState::Succeeded
            }
        );
        assert_eq!(state.completed(), 1);
        assert_eq!(state.into_outcomes(), vec![Outcome::Success(0)]);
    }

    #[test]
    fn queued_job_cannot_be_recorded() {
        let mut state: RunState<usize, String> = RunState::new(limit(1), jobs(2));
        let err = state
            .record(JobIndex::new(1), Outcome::Success(1))
            .unwrap_err();
        assert!(matches!(err, StateError::NotRunning { state: JobState::Queued, .. }));
        assert_eq!(
            state.record(JobIndex::new(7), Outcome::Success(7)),
            Err(StateError::UnknownJob(JobIndex::new(7)))
        );
    }

    #[test]
    fn outcomes_come_back_in_index_order() {
        let mut state = RunState::new(limit(3), jobs(3));
        let entries: Vec<_> = std::iter::from_fn(|| state.admit()).collect();
        assert_eq!(entries.len(), 3);

        // finish in reverse
        state
            .record(JobIndex::new(2), Outcome::Success(20))
            .unwrap();
        state
            .record(JobIndex::new(1), Outcome::Failure(JobFailure::Error("E".into())))
            .unwrap();
        state
            .record(JobIndex::new(0), Outcome::Success(0))
            .unwrap();

        assert!(state.is_complete());
        let counts = state.counts();
        assert_eq!((counts.succeeded, counts.failed), (2, 1));
        assert_eq!(
            state.into_outcomes(),
            vec![
                Outcome::Success(0),
                Outcome::Failure(JobFailure::Error("E".into())),
                Outcome::Success(20),
            ]
        );
    }

    #[test]
    fn unrecorded_slots_come_back_aborted() {
        let mut state = RunState::new(limit(1), jobs(3));
        let a = state.admit().unwrap();
        state.record(a.index, Outcome::Success(0)).unwrap();
        let _b = state.admit().unwrap();
        // job 1 running, job 2 still queued, neither recorded
        assert!(!state.is_complete());

        assert_eq!(
            state.into_outcomes(),
            vec![
                Outcome::Success(0),
                Outcome::Failure(JobFailure::Aborted),
                Outcome::Failure(JobFailure::Aborted),
            ]
        );
    }

    #[test]
    fn empty_run_is_complete_immediately() {
        let state: RunState<usize, String> = RunState::new(limit(5), Vec::new());
        assert!(state.is_complete());
        assert_eq!(state.counts().total(), 0);
        assert!(state.into_outcomes().is_empty());
    }
}
