//! Order HTTP Routes
//!
//! Customer and item references are not looked up before writing. A
//! dangling reference is rejected by the store's foreign keys and comes
//! back as a 500.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::store::{orders, Entity, NewOrder, Order, OrderFilter};

use super::errors::ApiResult;
use super::params::ListOrdersQuery;
use super::response::DeleteResponse;
use super::state::AppState;

/// Create order routes
pub fn order_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/orders/", post(create_order_handler).get(list_orders_handler))
        .route(
            "/orders/:id",
            get(get_order_handler)
                .put(update_order_handler)
                .delete(delete_order_handler),
        )
        .with_state(state)
}

async fn create_order_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> ApiResult<Json<Order>> {
    let Json(order) = payload?;
    let created = state.db.run(move |conn| orders::insert(conn, &order)).await?;
    Ok(Json(created))
}

async fn get_order_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Order>> {
    let Path(id) = id?;
    let order = state.db.run(move |conn| orders::get(conn, id)).await?;
    Ok(Json(order))
}

async fn update_order_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> ApiResult<Json<Order>> {
    let Path(id) = id?;
    let Json(order) = payload?;
    let updated = state
        .db
        .run(move |conn| orders::replace(conn, id, &order))
        .await?;
    Ok(Json(updated))
}

async fn delete_order_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.db.run(move |conn| orders::delete(conn, id)).await?;
    Ok(Json(DeleteResponse::deleted(Entity::Order)))
}

/// `limit` must be a non-negative integer; `limit=-1` is a 400, not "all rows".
async fn list_orders_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Order>>> {
    let Query(query) = query?;
    let filter = OrderFilter::from(query);
    let rows = state.db.run(move |conn| orders::list(conn, &filter)).await?;
    Ok(Json(rows))
}
