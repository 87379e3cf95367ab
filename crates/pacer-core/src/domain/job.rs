//! Job: a zero-argument async unit of work.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use super::ids::JobIndex;

/// The future a job produces once invoked.
pub type JobFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// A zero-argument asynchronous operation.
///
/// The closure is `FnOnce`, so a job can be started at most once. The runner
/// never looks inside it; the caller owns whatever I/O the job wraps.
///
/// ```ignore
/// let job = Job::new(|| async { Ok::<_, String>(42) });
/// ```
pub struct Job<T, E> {
    start: Box<dyn FnOnce() -> JobFuture<T, E> + Send + 'static>,
}

impl<T, E> Job<T, E> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            start: Box::new(move || Box::pin(f())),
        }
    }

    /// Invoke the job. Consumes it.
    pub fn start(self) -> JobFuture<T, E> {
        (self.start)()
    }
}

impl<T, E> fmt::Debug for Job<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job").finish_non_exhaustive()
    }
}

/// A job waiting in the admission queue, tagged with its submission index.
#[derive(Debug)]
pub struct QueueEntry<T, E> {
    pub index: JobIndex,
    pub job: Job<T, E>,
}

impl<T, E> QueueEntry<T, E> {
    pub fn new(index: JobIndex, job: Job<T, E>) -> Self {
        Self { index, job }
    }
}
