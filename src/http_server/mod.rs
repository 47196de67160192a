//! # storedesk HTTP Server Module
//!
//! Axum server exposing the customer, item and order records.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/customers/*` - Customer CRUD
//! - `/items/*` - Item CRUD
//! - `/orders/*` - Order CRUD
//! - `/upload-orders/` - Atomic bulk order import

pub mod config;
pub mod customer_routes;
pub mod errors;
pub mod item_routes;
pub mod observability_routes;
pub mod order_routes;
pub mod params;
pub mod response;
pub mod server;
pub mod state;
pub mod upload_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use state::AppState;
