//! MemoryEventSink - イベントをメモリに溜める（テスト・デモ用）

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{RunEvent, RunEventKind};
use crate::ports::EventSink;

/// Collects every event it receives.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<RunEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far, in arrival order.
    pub fn events(&self) -> Vec<RunEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Just the event kinds, handy for asserting on ordering.
    pub fn kinds(&self) -> Vec<RunEventKind> {
        self.events().into_iter().map(|e| e.kind).collect()
    }
}

#[async_trait]
impl EventSink for MemoryEventSink {
    async fn emit(&self, event: RunEvent) {
        // std Mutex: never held across an await
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
