//! Table definitions
//!
//! Tables are created if absent. There is no migration step: an existing
//! table is left exactly as it is.

use rusqlite::Connection;

use super::errors::StoreResult;

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    price REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER NOT NULL,
    item_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    order_date TEXT NOT NULL,
    FOREIGN KEY (customer_id) REFERENCES customers(id),
    FOREIGN KEY (item_id) REFERENCES items(id)
);
"#;

/// Create the customers, items and orders tables if they do not exist.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

/// In-memory connection with the schema in place.
#[cfg(test)]
pub(crate) fn memory_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    super::database::configure(&conn).unwrap();
    ensure_schema(&conn).unwrap();
    conn
}
