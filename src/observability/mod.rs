//! Observability for storedesk
//!
//! Logging goes through `tracing`. The CLI installs the subscriber once at
//! startup; the HTTP router adds a per-request span via `tower-http`.
//!
//! # Usage
//!
//! ```ignore
//! storedesk::observability::init_logging();
//! tracing::info!(port = 8000, "listening");
//! ```

mod logger;

pub use logger::{init_logging, DEFAULT_FILTER};
