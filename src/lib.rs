//! storedesk - customers, items and orders over HTTP, stored in SQLite

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod seed;
pub mod store;
