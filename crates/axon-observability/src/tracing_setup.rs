//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

use axon_core::config::defaults;

/// Initialize the global tracing subscriber. `RUST_LOG` wins when set;
/// otherwise the default level applies. Returns false when a subscriber
/// was already installed (tests install their own).
pub fn init() -> bool {
    init_with_default(defaults::DEFAULT_LOG_LEVEL)
}

/// Initialize with an explicit fallback filter.
pub fn init_with_default(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
