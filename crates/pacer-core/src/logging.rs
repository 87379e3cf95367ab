//! Logging init: `tracing-subscriber` fmt layer on stderr.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,pacer=debug,pacer_core=debug";

/// Initialize structured logging to stderr.
///
/// Honors `RUST_LOG`; falls back to [`DEFAULT_FILTER`]. Calling it twice is
/// harmless: the second subscriber is not installed.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("logging initialized");
    }
}
