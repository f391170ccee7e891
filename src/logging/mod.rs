//! Tracing setup for agent processes.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber with an env-filtered fmt
/// layer. Defaults to `info` when `RUST_LOG` is unset. Calling it more
/// than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
