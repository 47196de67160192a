//! Seed document loading
//!
//! Documents:
//! - customers: `{ "<phone>": "<name>", ... }`
//! - items: `{ "<name>": { "price": <number>, ... }, ... }`
//!
//! A missing or malformed document skips its half of the seed; the other
//! half still runs. Seeding is not rerun-safe: customers already present
//! fail the email constraint and items are inserted again.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::store::customers::{self, NewCustomer};
use crate::store::items::{self, NewItem};
use crate::store::{schema, StoreError, StoreResult};

/// Domain appended to a phone number to synthesize a customer email.
pub const EMAIL_DOMAIN: &str = "example.com";

/// Outcome of reading one seed document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    #[default]
    Loaded,
    Missing,
    Unreadable,
    Malformed,
}

/// Per-document seed counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub status: SectionStatus,
    pub inserted: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub customers: SectionReport,
    pub items: SectionReport,
}

/// Loads the customer and item seed documents into the database.
pub struct SeedLoader {
    customers_path: PathBuf,
    items_path: PathBuf,
}

impl SeedLoader {
    pub fn new(customers_path: impl Into<PathBuf>, items_path: impl Into<PathBuf>) -> Self {
        Self {
            customers_path: customers_path.into(),
            items_path: items_path.into(),
        }
    }

    /// Create the schema, then seed both documents in one transaction.
    pub fn run(&self, conn: &mut Connection) -> StoreResult<SeedReport> {
        schema::ensure_schema(conn)?;

        let tx = conn.transaction()?;
        let report = SeedReport {
            customers: match read_document(&self.customers_path) {
                Ok(entries) => seed_customers(&tx, &entries)?,
                Err(status) => skipped(status),
            },
            items: match read_document(&self.items_path) {
                Ok(entries) => seed_items(&tx, &entries)?,
                Err(status) => skipped(status),
            },
        };
        tx.commit()?;

        info!(
            customers = report.customers.inserted,
            items = report.items.inserted,
            "seed complete"
        );
        Ok(report)
    }
}

fn skipped(status: SectionStatus) -> SectionReport {
    SectionReport {
        status,
        ..SectionReport::default()
    }
}

/// Read a top-level JSON object, reporting why when it cannot be used.
///
/// Entries keep their document order (`preserve_order`), so generated ids
/// follow the file.
fn read_document(path: &Path) -> Result<Map<String, Value>, SectionStatus> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            warn!(path = %path.display(), "seed document not found, skipping");
            SectionStatus::Missing
        } else {
            warn!(path = %path.display(), error = %e, "seed document unreadable, skipping");
            SectionStatus::Unreadable
        }
    })?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(entries)) => Ok(entries),
        Ok(_) => {
            warn!(path = %path.display(), "seed document is not a JSON object, skipping");
            Err(SectionStatus::Malformed)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "seed document is not valid JSON, skipping");
            Err(SectionStatus::Malformed)
        }
    }
}

fn seed_customers(conn: &Connection, entries: &Map<String, Value>) -> StoreResult<SectionReport> {
    let mut report = SectionReport::default();

    for (phone, name) in entries {
        let Some(name) = name.as_str() else {
            warn!(phone = %phone, "customer name is not a string, skipping");
            report.failed += 1;
            continue;
        };

        let customer = NewCustomer::new(name, format!("{}@{}", phone, EMAIL_DOMAIN));
        match customers::insert(conn, &customer) {
            Ok(_) => report.inserted += 1,
            Err(StoreError::DuplicateEmail) => {
                warn!(email = %customer.email, "customer already seeded, skipping");
                report.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

fn seed_items(conn: &Connection, entries: &Map<String, Value>) -> StoreResult<SectionReport> {
    let mut report = SectionReport::default();

    for (name, details) in entries {
        let Some(price) = details.get("price").and_then(Value::as_f64) else {
            warn!(item = %name, "item has no numeric price, skipping");
            report.failed += 1;
            continue;
        };

        items::insert(conn, &NewItem::new(name.as_str(), Some(String::new()), price))?;
        report.inserted += 1;
    }

    Ok(report)
}
