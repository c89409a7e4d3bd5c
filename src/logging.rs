//! Process-wide `tracing` setup shared by both binaries.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `taskjson=trace`).
pub const LOG_ENV: &str = "TASKJSON_LOG";

/// Install a stderr subscriber filtered by [`LOG_ENV`], falling back to `default_filter`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
