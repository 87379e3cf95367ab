//! pacer-core
//!
//! Bounded-concurrency task runner: run a batch of async jobs with at most
//! `limit` in flight, and get every job's outcome back at its original index.
//!
//! ```ignore
//! use pacer_core::{BoundedRunner, Job};
//!
//! let runner = BoundedRunner::new(2)?;
//! let outcomes = runner
//!     .run(vec![
//!         Job::new(|| async { Ok::<_, String>(1) }),
//!         Job::new(|| async { Err("down".to_string()) }),
//!     ])
//!     .await;
//! ```
//!
//! # モジュール構成
//! - **domain**: Job, Outcome, JobState, RunEvent, ids
//! - **ports**: EventSink, Clock
//! - **app**: RunnerBuilder, BoundedRunner, RunState
//! - **impls**: MemoryEventSink
//! - config / error / logging / observability

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod logging;
pub mod observability;
pub mod ports;

pub use app::{BoundedRunner, RunnerBuilder, run_limited};
pub use config::{RunRequest, RunnerConfig};
pub use domain::{Job, JobFailure, Outcome, OutcomeKind};
pub use error::ConfigError;
pub use observability::RunCounts;
