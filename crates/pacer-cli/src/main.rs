use std::sync::Arc;

use serde::Serialize;
use tokio::time::{Duration, sleep};
use tracing::{error, info};

use pacer_core::impls::MemoryEventSink;
use pacer_core::logging::init_logging;
use pacer_core::{BoundedRunner, Job, Outcome, RunCounts, RunnerConfig};

/// One simulated request: sleeps `latency_ms`, then answers or fails.
#[derive(Debug, Clone)]
struct FakeRequest {
    url: String,
    latency_ms: u64,
    fail: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    limit: usize,
    counts: RunCounts,
    outcomes: Vec<Outcome<String, String>>,
}

fn demo_requests() -> Vec<FakeRequest> {
    (0..8)
        .map(|i| FakeRequest {
            url: format!("https://example.test/items/{i}"),
            // 後ろほど速い: 完了順と結果順が違うことが見える
            latency_ms: 40 * (8 - i),
            fail: i == 3,
        })
        .collect()
}

fn into_job(req: FakeRequest) -> Job<String, String> {
    Job::new(move || async move {
        sleep(Duration::from_millis(req.latency_ms)).await;
        if req.fail {
            Err(format!("GET {}: 503 Service Unavailable", req.url))
        } else {
            Ok(format!("GET {}: 200 OK ({}ms)", req.url, req.latency_ms))
        }
    })
}

/// `pacer [CONFIG_JSON]`, e.g. `pacer '{"limit": 3}'`.
fn load_config() -> Result<RunnerConfig, pacer_core::ConfigError> {
    match std::env::args().nth(1) {
        Some(json) => RunnerConfig::from_json_str(&json),
        None => Ok(RunnerConfig::default()),
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "bad config");
            std::process::exit(2);
        }
    };

    let sink = Arc::new(MemoryEventSink::new());
    let runner = match BoundedRunner::builder()
        .config(config)
        .event_sink(sink.clone())
        .build()
    {
        Ok(runner) => runner,
        Err(e) => {
            error!(error = %e, "cannot build runner");
            std::process::exit(2);
        }
    };

    let jobs: Vec<_> = demo_requests().into_iter().map(into_job).collect();
    let outcomes = runner.run(jobs).await;
    info!(events = sink.events().len(), "run finished");

    let report = Report {
        limit: runner.limit(),
        counts: RunCounts::from_outcomes(&outcomes),
        outcomes,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(error = %e, "cannot encode report");
            std::process::exit(1);
        }
    }
}
