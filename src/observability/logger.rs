//! Log subscriber setup
//!
//! - Filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
//! - Output goes to stderr, stdout is reserved for command responses
//! - One log line = one event

use std::io;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Install the global fmt subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
