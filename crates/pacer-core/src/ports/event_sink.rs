//! EventSink port - run イベントの受け口
//!
//! デフォルトは NoopEventSink（何もしない）。

use async_trait::async_trait;

use crate::domain::RunEvent;

/// Receives run events from the coordinator, in bookkeeping order.
///
/// `emit` is awaited inline by the coordinator, so a slow sink slows
/// admission. Keep it cheap.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: RunEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

#[async_trait]
impl EventSink for NoopEventSink {
    async fn emit(&self, _event: RunEvent) {}
}
