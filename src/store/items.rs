//! Item records

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::errors::{Entity, StoreError, StoreResult};

/// A stored catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Item fields supplied on create and replace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, description: Option<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description,
            price,
        }
    }

    /// Attach the identifier the store assigned.
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

/// Filter for [`list`]. Both price bounds are inclusive.
#[derive(Debug, Clone)]
pub struct ItemFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: u32,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
    })
}

pub fn insert(conn: &Connection, item: &NewItem) -> StoreResult<Item> {
    conn.execute(
        "INSERT INTO items (name, description, price) VALUES (?1, ?2, ?3)",
        params![item.name, item.description, item.price],
    )?;
    Ok(item.clone().with_id(conn.last_insert_rowid()))
}

pub fn get(conn: &Connection, id: i64) -> StoreResult<Item> {
    conn.query_row(
        "SELECT id, name, description, price FROM items WHERE id = ?1",
        params![id],
        from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound(Entity::Item))
}

pub fn replace(conn: &Connection, id: i64, item: &NewItem) -> StoreResult<Item> {
    let changed = conn.execute(
        "UPDATE items SET name = ?1, description = ?2, price = ?3 WHERE id = ?4",
        params![item.name, item.description, item.price, id],
    )?;
    if changed == 0 {
        return Err(StoreError::NotFound(Entity::Item));
    }
    Ok(item.clone().with_id(id))
}

pub fn delete(conn: &Connection, id: i64) -> StoreResult<()> {
    let changed = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(StoreError::NotFound(Entity::Item));
    }
    Ok(())
}

pub fn list(conn: &Connection, filter: &ItemFilter) -> StoreResult<Vec<Item>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, price FROM items \
         WHERE (?1 IS NULL OR price >= ?1) AND (?2 IS NULL OR price <= ?2) \
         ORDER BY id LIMIT ?3",
    )?;
    let rows = stmt
        .query_map(
            params![filter.min_price, filter.max_price, filter.limit],
            from_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
