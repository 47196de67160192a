//! Seed Loader Tests
//!
//! - Both documents load into fresh tables
//! - A missing or malformed document skips only its own half
//! - Rerunning fails customer inserts and duplicates items

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use storedesk::seed::{SectionStatus, SeedLoader};
use storedesk::store::customers::{self, CustomerFilter};
use storedesk::store::items::{self, ItemFilter};
use storedesk::store::Database;

// =============================================================================
// Helper Functions
// =============================================================================

struct Fixture {
    tmp: TempDir,
    db: Database,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let db = Database::new(tmp.path().join("db.sqlite"));
        Self { tmp, db }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn loader(&self) -> SeedLoader {
        SeedLoader::new(self.path("customers.json"), self.path("items.json"))
    }

    fn customer_count(&self) -> usize {
        let conn = self.db.connect().unwrap();
        customers::list(&conn, &CustomerFilter { name: None, limit: 1000 })
            .unwrap()
            .len()
    }

    fn item_count(&self) -> usize {
        let conn = self.db.connect().unwrap();
        let filter = ItemFilter {
            min_price: None,
            max_price: None,
            limit: 1000,
        };
        items::list(&conn, &filter).unwrap().len()
    }
}

const CUSTOMERS: &str = r#"{"5550001": "Ada Lovelace", "5550002": "Grace Hopper"}"#;
const ITEMS: &str = r#"{"Widget": {"price": 9.99}, "Gadget": {"price": 24.5, "stock": 3}}"#;

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_seeds_both_documents() {
    let fx = Fixture::new();
    fx.write("customers.json", CUSTOMERS);
    fx.write("items.json", ITEMS);

    let report = fx.loader().run(&mut fx.db.connect().unwrap()).unwrap();

    assert_eq!(report.customers.status, SectionStatus::Loaded);
    assert_eq!(report.customers.inserted, 2);
    assert_eq!(report.items.inserted, 2);
    assert_eq!(fx.customer_count(), 2);
    assert_eq!(fx.item_count(), 2);

    let conn = fx.db.connect().unwrap();
    let ada = customers::list(
        &conn,
        &CustomerFilter {
            name: Some("Ada".to_string()),
            limit: 10,
        },
    )
    .unwrap();
    assert_eq!(ada[0].email, "5550001@example.com");
}

#[test]
fn test_missing_customers_document_still_seeds_items() {
    let fx = Fixture::new();
    fx.write("items.json", ITEMS);

    let report = fx.loader().run(&mut fx.db.connect().unwrap()).unwrap();

    assert_eq!(report.customers.status, SectionStatus::Missing);
    assert_eq!(report.items.status, SectionStatus::Loaded);
    assert_eq!(fx.customer_count(), 0);
    assert_eq!(fx.item_count(), 2);
}

#[test]
fn test_malformed_items_document_still_seeds_customers() {
    let fx = Fixture::new();
    fx.write("customers.json", CUSTOMERS);
    fx.write("items.json", "{ \"Widget\": ");

    let report = fx.loader().run(&mut fx.db.connect().unwrap()).unwrap();

    assert_eq!(report.customers.inserted, 2);
    assert_eq!(report.items.status, SectionStatus::Malformed);
    assert_eq!(fx.item_count(), 0);
}

#[test]
fn test_non_object_document_is_malformed() {
    let fx = Fixture::new();
    fx.write("customers.json", r#"["Ada", "Grace"]"#);

    let report = fx.loader().run(&mut fx.db.connect().unwrap()).unwrap();

    assert_eq!(report.customers.status, SectionStatus::Malformed);
    assert_eq!(report.items.status, SectionStatus::Missing);
}

#[test]
fn test_rerun_fails_customers_and_duplicates_items() {
    let fx = Fixture::new();
    fx.write("customers.json", CUSTOMERS);
    fx.write("items.json", ITEMS);

    fx.loader().run(&mut fx.db.connect().unwrap()).unwrap();
    let second = fx.loader().run(&mut fx.db.connect().unwrap()).unwrap();

    assert_eq!(second.customers.inserted, 0);
    assert_eq!(second.customers.failed, 2);
    assert_eq!(second.items.inserted, 2);
    assert_eq!(fx.customer_count(), 2);
    assert_eq!(fx.item_count(), 4);
}

#[test]
fn test_ids_follow_document_order() {
    let fx = Fixture::new();
    fx.write("customers.json", r#"{"5559999": "Zed", "5550001": "Ada"}"#);
    fx.write("items.json", r#"{"Widget": {"price": 9.99}, "Gadget": {"price": 24.5}}"#);

    fx.loader().run(&mut fx.db.connect().unwrap()).unwrap();

    let conn = fx.db.connect().unwrap();
    let first_customer = customers::get(&conn, 1).unwrap();
    assert_eq!(first_customer.name, "Zed");
    assert_eq!(first_customer.email, "5559999@example.com");
    assert_eq!(customers::get(&conn, 2).unwrap().name, "Ada");

    assert_eq!(items::get(&conn, 1).unwrap().name, "Widget");
    assert_eq!(items::get(&conn, 2).unwrap().name, "Gadget");
}
