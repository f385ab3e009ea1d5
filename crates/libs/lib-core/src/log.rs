//! # Logging Setup
//!
//! Tracing subscriber shared by the admin binaries. Logs go to stderr so that
//! stdout only carries the tools' own output.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The level comes from `LOG_LEVEL` (trace|debug|info|warn|error, default info).
/// Returns the level in use. Installing twice is a no-op.
pub fn init_tracing() -> String {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" => EnvFilter::new("trace"),
        "debug" => EnvFilter::new("debug"),
        "info" => EnvFilter::new("info"),
        "warn" => EnvFilter::new("warn"),
        "error" => EnvFilter::new("error"),
        _ => EnvFilter::new("info"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    log_level
}
