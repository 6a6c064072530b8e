//! Logging setup for the provider process
//!
//! Stdout belongs to the plugin host handshake, so logs go to stderr.
//! `RUST_LOG` takes precedence over the default level.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Fails if one is already installed.
pub fn try_init_logging(debug: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
