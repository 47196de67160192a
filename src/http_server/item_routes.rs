//! Item HTTP Routes

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::store::{items, Entity, Item, ItemFilter, NewItem};

use super::errors::ApiResult;
use super::params::ListItemsQuery;
use super::response::DeleteResponse;
use super::state::AppState;

/// Create item routes
pub fn item_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/items/", post(create_item_handler).get(list_items_handler))
        .route(
            "/items/:id",
            get(get_item_handler)
                .put(update_item_handler)
                .delete(delete_item_handler),
        )
        .with_state(state)
}

async fn create_item_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(item) = payload?;
    let created = state.db.run(move |conn| items::insert(conn, &item)).await?;
    Ok(Json(created))
}

async fn get_item_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Item>> {
    let Path(id) = id?;
    let item = state.db.run(move |conn| items::get(conn, id)).await?;
    Ok(Json(item))
}

async fn update_item_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Path(id) = id?;
    let Json(item) = payload?;
    let updated = state
        .db
        .run(move |conn| items::replace(conn, id, &item))
        .await?;
    Ok(Json(updated))
}

async fn delete_item_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.db.run(move |conn| items::delete(conn, id)).await?;
    Ok(Json(DeleteResponse::deleted(Entity::Item)))
}

/// Lists items, optionally within an inclusive price range.
///
/// `limit` must be a non-negative integer; `limit=-1` is a 400, not "all rows".
async fn list_items_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListItemsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Item>>> {
    let Query(query) = query?;
    let filter = ItemFilter::from(query);
    let rows = state.db.run(move |conn| items::list(conn, &filter)).await?;
    Ok(Json(rows))
}
