//! Runner configuration.
//!
//! `RunnerConfig` is the serializable part (JSON via serde). `RunRequest`
//! adds the job list, which is code and cannot be deserialized.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::domain::Job;
use crate::error::ConfigError;

/// Concurrency cap used when none is given.
pub const DEFAULT_LIMIT: usize = 5;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Maximum number of jobs executing at once. Must be >= 1.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl RunnerConfig {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Parse from JSON. Missing fields take their defaults; the limit is
    /// validated here too so a bad file fails at load time.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: RunnerConfig = serde_json::from_str(s)?;
        cfg.validated_limit()?;
        Ok(cfg)
    }

    pub fn validated_limit(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.limit).ok_or(ConfigError::InvalidLimit { limit: self.limit })
    }
}

/// A batch to run: the config value `{ limit, tasks }`.
///
/// Defaults: `limit = 5`, `tasks = []`.
pub struct RunRequest<T, E> {
    pub limit: usize,
    pub tasks: Vec<Job<T, E>>,
}

impl<T, E> Default for RunRequest<T, E> {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            tasks: Vec::new(),
        }
    }
}

impl<T, E> RunRequest<T, E> {
    pub fn new(tasks: Vec<Job<T, E>>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn config(&self) -> RunnerConfig {
        RunnerConfig::new(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_json_gets_default_limit() {
        let cfg = RunnerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg.limit, 5);
    }

    #[test]
    fn explicit_limit_is_kept() {
        let cfg = RunnerConfig::from_json_str(r#"{ "limit": 2 }"#).unwrap();
        assert_eq!(cfg, RunnerConfig::new(2));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = RunnerConfig::from_json_str(r#"{ "limit": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLimit { limit: 0 }));
    }

    #[rstest]
    #[case(r#"{ "limit": -1 }"#)]
    #[case(r#"{ "limit": "five" }"#)]
    #[case("not json")]
    fn malformed_config_is_a_parse_error(#[case] json: &str) {
        let err = RunnerConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn run_request_defaults() {
        let req: RunRequest<(), ()> = RunRequest::default();
        assert_eq!(req.limit, 5);
        assert!(req.tasks.is_empty());
        assert_eq!(req.with_limit(3).config().limit, 3);
    }
}
