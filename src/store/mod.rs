//! # Store
//!
//! SQLite persistence for customers, items and orders.
//!
//! Every operation here is synchronous and takes a borrowed connection.
//! Async callers go through [`Database::run`], which acquires a connection
//! on a blocking thread and releases it when the operation returns.

pub mod customers;
pub mod database;
pub mod errors;
pub mod import;
pub mod items;
pub mod orders;
pub mod schema;

pub use customers::{Customer, CustomerFilter, NewCustomer};
pub use database::Database;
pub use errors::{Entity, StoreError, StoreResult};
pub use items::{Item, ItemFilter, NewItem};
pub use orders::{NewOrder, Order, OrderFilter};
