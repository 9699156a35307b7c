//! Logging setup
//!
//! Installs a `tracing-subscriber` formatter writing to stderr. `RUST_LOG`
//! wins over the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Build the filter: `RUST_LOG` if set, otherwise `level`
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(settings: &LoggingSettings) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(&settings.level))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
