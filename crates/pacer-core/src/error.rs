use thiserror::Error;

/// Rejected runner input. Raised before any job is dispatched.
///
/// Job failures never show up here; they are recorded per index as
/// [`crate::domain::JobFailure`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("concurrency limit must be at least 1 (got {limit})")]
    InvalidLimit { limit: usize },

    #[error("invalid runner config: {0}")]
    Parse(#[from] serde_json::Error),
}
