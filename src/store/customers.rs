//! Customer records

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::errors::{is_unique_violation, Entity, StoreError, StoreResult};

/// A stored customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Customer fields supplied on create and replace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attach the identifier the store assigned.
    pub fn with_id(self, id: i64) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Filter for [`list`]
#[derive(Debug, Clone)]
pub struct CustomerFilter {
    /// Substring the name must contain
    pub name: Option<String>,
    pub limit: u32,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

fn classify(err: rusqlite::Error) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::DuplicateEmail
    } else {
        StoreError::Sqlite(err)
    }
}

/// Insert a customer, failing with [`StoreError::DuplicateEmail`] if the email is taken.
pub fn insert(conn: &Connection, customer: &NewCustomer) -> StoreResult<Customer> {
    conn.execute(
        "INSERT INTO customers (name, email) VALUES (?1, ?2)",
        params![customer.name, customer.email],
    )
    .map_err(classify)?;

    Ok(customer.clone().with_id(conn.last_insert_rowid()))
}

pub fn get(conn: &Connection, id: i64) -> StoreResult<Customer> {
    conn.query_row(
        "SELECT id, name, email FROM customers WHERE id = ?1",
        params![id],
        from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound(Entity::Customer))
}

/// Replace every field of customer `id`.
pub fn replace(conn: &Connection, id: i64, customer: &NewCustomer) -> StoreResult<Customer> {
    let changed = conn
        .execute(
            "UPDATE customers SET name = ?1, email = ?2 WHERE id = ?3",
            params![customer.name, customer.email, id],
        )
        .map_err(classify)?;

    if changed == 0 {
        return Err(StoreError::NotFound(Entity::Customer));
    }
    Ok(customer.clone().with_id(id))
}

pub fn delete(conn: &Connection, id: i64) -> StoreResult<()> {
    let changed = conn.execute("DELETE FROM customers WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(StoreError::NotFound(Entity::Customer));
    }
    Ok(())
}

pub fn list(conn: &Connection, filter: &CustomerFilter) -> StoreResult<Vec<Customer>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email FROM customers \
         WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%') \
         ORDER BY id LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(params![filter.name, filter.limit], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
