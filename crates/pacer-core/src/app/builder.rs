//! RunnerBuilder - BoundedRunner の構築とワイヤリング
//!
//! build() 時に limit を検証する（Fail-fast）。ジョブが一つも走らないうちに
//! ConfigError を返す。

use std::sync::Arc;

use super::runner::BoundedRunner;
use crate::config::RunnerConfig;
use crate::error::ConfigError;
use crate::ports::{Clock, EventSink, NoopEventSink, SystemClock};

/// Builds a [`BoundedRunner`].
///
/// ```ignore
/// let runner = BoundedRunner::builder()
///     .limit(4)
///     .event_sink(Arc::new(MemoryEventSink::new()))
///     .build()?;
/// ```
pub struct RunnerBuilder {
    config: RunnerConfig,
    sink: Option<Arc<dyn EventSink>>,
    clock: Option<Arc<dyn Clock>>,
}

impl RunnerBuilder {
    pub fn new() -> Self {
        Self {
            config: RunnerConfig::default(),
            sink: None,
            clock: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Take settings from a loaded config. Replaces any earlier `limit`.
    pub fn config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<BoundedRunner, ConfigError> {
        let limit = self.config.validated_limit()?;
        let sink = self.sink.unwrap_or_else(|| Arc::new(NoopEventSink));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Ok(BoundedRunner::from_parts(limit, sink, clock))
    }
}

impl Default for RunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Job, RunEventKind};
    use crate::impls::MemoryEventSink;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn default_limit_is_five() {
        let runner = RunnerBuilder::new().build().unwrap();
        assert_eq!(runner.limit(), 5);
    }

    #[test]
    fn zero_limit_fails_fast() {
        let err = RunnerBuilder::new().limit(0).build().err().unwrap();
        assert!(matches!(err, ConfigError::InvalidLimit { limit: 0 }));
    }

    #[test]
    fn config_replaces_limit() {
        let runner = RunnerBuilder::new()
            .limit(9)
            .config(RunnerConfig::new(3))
            .build()
            .unwrap();
        assert_eq!(runner.limit(), 3);
    }

    #[tokio::test]
    async fn events_use_the_configured_clock() {
        let at = Utc.with_ymd_and_hms(2026, 1, 7, 9, 0, 0).unwrap();
        let sink = Arc::new(MemoryEventSink::new());
        let runner = RunnerBuilder::new()
            .limit(1)
            .event_sink(sink.clone())
            .clock(Arc::new(FixedClock::new(at)))
            .build()
            .unwrap();

        runner
            .run(vec![Job::new(|| async { Ok::<_, String>(1) })])
            .await;

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.at == at));
        assert!(matches!(events[0].kind, RunEventKind::Dispatched { .. }));
    }
}
