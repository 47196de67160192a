//! Bulk order import
//!
//! An import document is a JSON array of order records. The whole array is
//! applied inside one transaction: every record is inserted, or none is.
//! Field values are bound as they appear in the document; type checking is
//! left to SQLite.

use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;
use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::orders::INSERT_ORDER;

/// Fields every import record must carry, in insert column order.
pub const REQUIRED_FIELDS: [&str; 4] = ["customer_id", "item_id", "quantity", "order_date"];

/// Parse an uploaded document into its records.
pub fn parse_document(bytes: &[u8]) -> StoreResult<Vec<Value>> {
    let document: Value = serde_json::from_slice(bytes).map_err(StoreError::InvalidDocument)?;
    match document {
        Value::Array(records) => Ok(records),
        _ => Err(StoreError::NotAnArray),
    }
}

/// Insert every record as an order, atomically. Returns the number inserted.
///
/// On any failure the transaction is dropped, which rolls back the records
/// already inserted in this batch.
pub fn import_orders(conn: &mut Connection, records: &[Value]) -> StoreResult<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(INSERT_ORDER)?;
        for record in records {
            let values = required_values(record)?;
            stmt.execute(params_from_iter(values.iter()))?;
        }
    }
    tx.commit()?;

    debug!(count = records.len(), "order batch committed");
    Ok(records.len())
}

fn required_values(record: &Value) -> StoreResult<Vec<SqlValue>> {
    let fields = record.as_object().ok_or(StoreError::MissingFields)?;
    REQUIRED_FIELDS
        .iter()
        .map(|name| fields.get(*name).map(to_sql_value).ok_or(StoreError::MissingFields))
        .collect()
}

/// Map a JSON value onto the closest SQLite storage class.
///
/// No coercion to the column type: a `"quantity": "two"` is stored as TEXT
/// and the row then fails to read back as an [`Order`](super::Order).
fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real))
            .unwrap_or(SqlValue::Null),
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_string()),
    }
}
