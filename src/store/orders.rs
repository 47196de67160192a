//! Order records
//!
//! Customer and item references are written verbatim. SQLite's foreign key
//! enforcement (enabled per connection) is what rejects dangling ones.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::errors::{Entity, StoreError, StoreResult};

pub(crate) const INSERT_ORDER: &str =
    "INSERT INTO orders (customer_id, item_id, quantity, order_date) VALUES (?1, ?2, ?3, ?4)";

/// A stored order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub order_date: String,
}

/// Order fields supplied on create and replace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub order_date: String,
}

impl NewOrder {
    pub fn new(customer_id: i64, item_id: i64, quantity: i64, order_date: impl Into<String>) -> Self {
        Self {
            customer_id,
            item_id,
            quantity,
            order_date: order_date.into(),
        }
    }

    /// Attach the identifier the store assigned.
    pub fn with_id(self, id: i64) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            item_id: self.item_id,
            quantity: self.quantity,
            order_date: self.order_date,
        }
    }
}

/// Filter for [`list`]
#[derive(Debug, Clone)]
pub struct OrderFilter {
    pub customer_id: Option<i64>,
    pub limit: u32,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        item_id: row.get(2)?,
        quantity: row.get(3)?,
        order_date: row.get(4)?,
    })
}

pub fn insert(conn: &Connection, order: &NewOrder) -> StoreResult<Order> {
    conn.execute(
        INSERT_ORDER,
        params![order.customer_id, order.item_id, order.quantity, order.order_date],
    )?;
    Ok(order.clone().with_id(conn.last_insert_rowid()))
}

pub fn get(conn: &Connection, id: i64) -> StoreResult<Order> {
    conn.query_row(
        "SELECT id, customer_id, item_id, quantity, order_date FROM orders WHERE id = ?1",
        params![id],
        from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound(Entity::Order))
}

pub fn replace(conn: &Connection, id: i64, order: &NewOrder) -> StoreResult<Order> {
    let changed = conn.execute(
        "UPDATE orders SET customer_id = ?1, item_id = ?2, quantity = ?3, order_date = ?4 \
         WHERE id = ?5",
        params![
            order.customer_id,
            order.item_id,
            order.quantity,
            order.order_date,
            id
        ],
    )?;
    if changed == 0 {
        return Err(StoreError::NotFound(Entity::Order));
    }
    Ok(order.clone().with_id(id))
}

pub fn delete(conn: &Connection, id: i64) -> StoreResult<()> {
    let changed = conn.execute("DELETE FROM orders WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(StoreError::NotFound(Entity::Order));
    }
    Ok(())
}

pub fn list(conn: &Connection, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
    let mut stmt = conn.prepare(
        "SELECT id, customer_id, item_id, quantity, order_date FROM orders \
         WHERE (?1 IS NULL OR customer_id = ?1) \
         ORDER BY id LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(params![filter.customer_id, filter.limit], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Number of rows in the orders table
pub fn count(conn: &Connection) -> StoreResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?)
}
