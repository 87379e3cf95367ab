//! Events - runner のブックキーピングを外に見せるためのイベント
//!
//! coordinator だけが emit するので、イベント順 = ブックキーピング順。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{JobIndex, RunId};
use super::outcome::OutcomeKind;
use crate::observability::RunCounts;

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEventKind {
    /// A job left the admission queue and started.
    Dispatched { index: JobIndex },

    /// A job's outcome was recorded.
    Finished { index: JobIndex, kind: OutcomeKind },

    /// Every job is terminal; emitted once per run.
    BatchCompleted { total: usize, counts: RunCounts },
}

/// A run event stamped with its run and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEvent {
    pub run_id: RunId,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: RunEventKind,
}

impl RunEvent {
    pub fn new(run_id: RunId, at: DateTime<Utc>, kind: RunEventKind) -> Self {
        Self { run_id, at, kind }
    }

    /// Index of the job this event is about, if any.
    pub fn index(&self) -> Option<JobIndex> {
        match &self.kind {
            RunEventKind::Dispatched { index } | RunEventKind::Finished { index, .. } => {
                Some(*index)
            }
            RunEventKind::BatchCompleted { .. } => None,
        }
    }
}
