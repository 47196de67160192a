//! # Seed Loader
//!
//! One-shot bootstrap run by `storedesk init`: creates the tables and fills
//! customers and items from two JSON documents. Never called by the server.

pub mod loader;

pub use loader::{SectionReport, SectionStatus, SeedLoader, SeedReport};
