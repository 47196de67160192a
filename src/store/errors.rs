//! Store error types
//!
//! Client-facing failures (missing rows, duplicate emails, bad import
//! documents) get their own variants. Anything else SQLite reports is kept
//! as-is in [`StoreError::Sqlite`].

use std::fmt;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// The entity a store operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Customer,
    Item,
    Order,
}

impl Entity {
    /// Returns the display name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Customer => "Customer",
            Entity::Item => "Item",
            Entity::Order => "Order",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the identifier
    #[error("{0} not found")]
    NotFound(Entity),

    /// The customers.email uniqueness constraint rejected the write
    #[error("Email already exists")]
    DuplicateEmail,

    /// An import record lacks one of the required order fields
    #[error("Order data missing required fields")]
    MissingFields,

    /// The import document is not valid JSON
    #[error("Invalid JSON file")]
    InvalidDocument(#[source] serde_json::Error),

    /// The import document is valid JSON but not an array
    #[error("Expected a JSON array of orders")]
    NotAnArray,

    /// Any other SQLite failure
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The blocking task running the operation panicked or was cancelled
    #[error("Database task failed: {0}")]
    TaskFailed(String),
}

impl StoreError {
    /// Whether the caller caused this error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateEmail
                | StoreError::MissingFields
                | StoreError::InvalidDocument(_)
                | StoreError::NotAnArray
        )
    }
}

/// Returns true when SQLite rejected a statement on a UNIQUE constraint.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
