//! List query parameters
//!
//! Each list endpoint takes a `limit` (default 10) plus its own optional
//! filters, and converts into the matching store filter.

use serde::Deserialize;

use crate::store::{CustomerFilter, ItemFilter, OrderFilter};

/// Rows returned by a list endpoint when `limit` is not given
pub const DEFAULT_LIST_LIMIT: u32 = 10;

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<ListCustomersQuery> for CustomerFilter {
    fn from(query: ListCustomersQuery) -> Self {
        Self {
            name: query.name,
            limit: query.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl From<ListItemsQuery> for ItemFilter {
    fn from(query: ListItemsQuery) -> Self {
        Self {
            min_price: query.min_price,
            max_price: query.max_price,
            limit: query.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub customer_id: Option<i64>,
}

impl From<ListOrdersQuery> for OrderFilter {
    fn from(query: ListOrdersQuery) -> Self {
        Self {
            customer_id: query.customer_id,
            limit: query.limit,
        }
    }
}
