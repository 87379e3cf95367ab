//! Outcome model: the per-index result of a job.
//!
//! A job's failure is data, not control flow. The runner stores it at the
//! job's index and keeps going.

use serde::{Deserialize, Serialize};

/// Success / failure classification.
///
/// Serialized as SCREAMING_SNAKE_CASE: SUCCESS / FAILURE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Success,
    Failure,
}

/// Why a job did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum JobFailure<E> {
    /// The job returned `Err`.
    Error(E),

    /// The job panicked. Holds the panic message when it was a string.
    Panicked(String),

    /// The job's task was torn down by the runtime before finishing.
    Aborted,
}

impl<E> JobFailure<E> {
    pub fn error(&self) -> Option<&E> {
        match self {
            JobFailure::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for JobFailure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobFailure::Error(e) => write!(f, "{e}"),
            JobFailure::Panicked(msg) => write!(f, "job panicked: {msg}"),
            JobFailure::Aborted => write!(f, "job aborted"),
        }
    }
}

/// Tagged result of one job, aligned with its submission index.
///
/// Example shape: `{"kind":"SUCCESS","value":10}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome<T, E> {
    Success(T),
    Failure(JobFailure<E>),
}

impl<T, E> Outcome<T, E> {
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(JobFailure::Error(e)),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success(_) => OutcomeKind::Success,
            Outcome::Failure(_) => OutcomeKind::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&JobFailure<E>> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(f) => Some(f),
        }
    }

    /// Back to a plain `Result`, for callers that want `?`.
    pub fn into_result(self) -> Result<T, JobFailure<E>> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(f) => Err(f),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_kind_serializes_as_required_names() {
        let s = serde_json::to_string(&OutcomeKind::Success).unwrap();
        assert_eq!(s, "\"SUCCESS\"");

        let s = serde_json::to_string(&OutcomeKind::Failure).unwrap();
        assert_eq!(s, "\"FAILURE\"");
    }

    #[test]
    fn outcome_is_tagged_enum() {
        let o: Outcome<u32, String> = Outcome::Success(10);
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["kind"], "SUCCESS");
        assert_eq!(v["value"], 10);

        let o: Outcome<u32, String> = Outcome::Failure(JobFailure::Error("boom".to_string()));
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["kind"], "FAILURE");
        assert_eq!(v["value"]["reason"], "error");
        assert_eq!(v["value"]["detail"], "boom");
    }

    #[test]
    fn from_result_maps_err_to_failure() {
        let o: Outcome<u32, &str> = Err("E").into();
        assert_eq!(o.kind(), OutcomeKind::Failure);
        assert_eq!(o.failure().and_then(JobFailure::error), Some(&"E"));
        assert!(o.value().is_none());
    }

    #[test]
    fn into_result_roundtrips() {
        let o: Outcome<u32, &str> = Outcome::Success(1);
        assert_eq!(o.into_result(), Ok(1));

        let o: Outcome<u32, &str> = Outcome::Failure(JobFailure::Aborted);
        assert_eq!(o.into_result(), Err(JobFailure::Aborted));
    }

    #[test]
    fn failure_display() {
        let f: JobFailure<String> = JobFailure::Panicked("index out of bounds".into());
        assert_eq!(f.to_string(), "job panicked: index out of bounds");
    }
}
