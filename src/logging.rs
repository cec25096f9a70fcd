//! Log subscriber setup
//!
//! Logs go to stderr so plot output on stdout stays clean. The filter comes
//! from `BANKER_LOG`, then `RUST_LOG`, and defaults to `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BANKER_LOG";

const DEFAULT_FILTER: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
