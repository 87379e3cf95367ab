//! BoundedRunner - 同時実行数を制限してジョブを実行する
//!
//! # フロー
//! 1. 全ジョブを index 付きで admission queue に積む
//! 2. dispatch: queue が空でなく in_flight < limit の間、先頭を spawn
//! 3. 完了ごとに results[index] に記録し、空いた枠をすぐ埋める（2 に戻る）
//! 4. completed == total で結果を返す
//!
//! coordinator（`run` の future）だけが RunState を持つ。ジョブは JoinSet 上の
//! tokio task として走り、完了は `join_next_with_id` で coordinator に戻る。

use std::any::Any;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::task::{self, JoinError, JoinSet};
use tracing::{Instrument, debug, error, info, warn};

use super::builder::RunnerBuilder;
use super::state::RunState;
use crate::config::RunRequest;
use crate::domain::{Job, JobFailure, JobIndex, Outcome, RunEvent, RunEventKind, RunId};
use crate::error::ConfigError;
use crate::observability::RunCounts;
use crate::ports::{Clock, EventSink};

/// Runs batches of jobs with at most `limit` executing at once.
///
/// A runner holds no per-batch state; each `run` call gets a fresh
/// [`RunState`], so one runner can serve many batches, even concurrently.
pub struct BoundedRunner {
    limit: NonZeroUsize,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
}

impl BoundedRunner {
    /// Runner with the given cap and default sink/clock.
    ///
    /// Fails with [`ConfigError::InvalidLimit`] when `limit == 0`.
    pub fn new(limit: usize) -> Result<Self, ConfigError> {
        RunnerBuilder::new().limit(limit).build()
    }

    pub fn builder() -> RunnerBuilder {
        RunnerBuilder::new()
    }

    pub(crate) fn from_parts(
        limit: NonZeroUsize,
        sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { limit, sink, clock }
    }

    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Run every job and return one outcome per job, in submission order.
    ///
    /// Never fails as a whole: job errors and panics are recorded at their
    /// index and the remaining jobs still run.
    pub async fn run<T, E>(&self, jobs: Vec<Job<T, E>>) -> Vec<Outcome<T, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let run_id = RunId::generate();
        let span = tracing::info_span!(
            "run",
            %run_id,
            total = jobs.len(),
            limit = self.limit.get()
        );
        self.coordinate(run_id, jobs).instrument(span).await
    }

    async fn coordinate<T, E>(&self, run_id: RunId, jobs: Vec<Job<T, E>>) -> Vec<Outcome<T, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let mut state = RunState::new(self.limit, jobs);

        if state.is_complete() {
            debug!("empty batch");
            self.finish(run_id, state.total(), state.counts()).await;
            return state.into_outcomes();
        }

        let mut running: JoinSet<Result<T, E>> = JoinSet::new();
        let mut slots: HashMap<task::Id, JobIndex> = HashMap::new();

        loop {
            self.dispatch(run_id, &mut state, &mut running, &mut slots)
                .await;

            let Some(joined) = running.join_next_with_id().await else {
                // nothing running and nothing admitted: only reachable once complete
                break;
            };

            let (task_id, outcome) = match joined {
                Ok((task_id, result)) => (task_id, Outcome::from_result(result)),
                Err(err) => (err.id(), Outcome::Failure(failure_from_join(err))),
            };

            let Some(index) = slots.remove(&task_id) else {
                error!(%task_id, "completion for a task this run never spawned");
                continue;
            };

            let kind = outcome.kind();
            if let Err(e) = state.record(index, outcome) {
                error!(%index, error = %e, "dropping completion");
                continue;
            }

            debug!(
                %index,
                ?kind,
                in_flight = state.in_flight(),
                completed = state.completed(),
                "job finished"
            );
            self.emit(run_id, RunEventKind::Finished { index, kind })
                .await;

            if state.is_complete() {
                break;
            }
        }

        self.finish(run_id, state.total(), state.counts()).await;
        state.into_outcomes()
    }

    /// Admission loop: start queued jobs until the queue is empty or the cap
    /// is reached. Never waits on a job.
    async fn dispatch<T, E>(
        &self,
        run_id: RunId,
        state: &mut RunState<T, E>,
        running: &mut JoinSet<Result<T, E>>,
        slots: &mut HashMap<task::Id, JobIndex>,
    ) where
        T: Send + 'static,
        E: Send + 'static,
    {
        while let Some(entry) = state.admit() {
            let index = entry.index;
            let handle = running.spawn(entry.job.start());
            slots.insert(handle.id(), index);

            debug!(
                %index,
                in_flight = state.in_flight(),
                queued = state.queued(),
                "job dispatched"
            );
            self.emit(run_id, RunEventKind::Dispatched { index }).await;
        }
    }

    async fn finish(&self, run_id: RunId, total: usize, counts: RunCounts) {
        info!(
            succeeded = counts.succeeded,
            failed = counts.failed,
            "batch completed"
        );
        self.emit(
            run_id,
            RunEventKind::BatchCompleted { total, counts },
        )
        .await;
    }

    async fn emit(&self, run_id: RunId, kind: RunEventKind) {
        self.sink
            .emit(RunEvent::new(run_id, self.clock.now(), kind))
            .await;
    }
}

/// Run a `{ limit, tasks }` request.
///
/// The only error is a bad `limit`, raised before any task is started.
pub async fn run_limited<T, E>(request: RunRequest<T, E>) -> Result<Vec<Outcome<T, E>>, ConfigError>
where
    T: Send + 'static,
    E: Send + 'static,
{
    let runner = BoundedRunner::builder().config(request.config()).build()?;
    Ok(runner.run(request.tasks).await)
}

fn failure_from_join<E>(err: JoinError) -> JobFailure<E> {
    if err.is_panic() {
        let message = panic_message(err.into_panic());
        warn!(%message, "job panicked");
        JobFailure::Panicked(message)
    } else {
        warn!("job task aborted");
        JobFailure::Aborted
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(s) => *s,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(s) => (*s).to_string(),
            Err(_) => "non-string panic payload".to_string(),
        },
    }
}
