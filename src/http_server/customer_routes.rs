//! Customer HTTP Routes

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::store::{customers, Customer, CustomerFilter, Entity, NewCustomer};

use super::errors::ApiResult;
use super::params::ListCustomersQuery;
use super::response::DeleteResponse;
use super::state::AppState;

/// Create customer routes
pub fn customer_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/customers/",
            post(create_customer_handler).get(list_customers_handler),
        )
        .route(
            "/customers/:id",
            get(get_customer_handler)
                .put(update_customer_handler)
                .delete(delete_customer_handler),
        )
        .with_state(state)
}

async fn create_customer_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewCustomer>, JsonRejection>,
) -> ApiResult<Json<Customer>> {
    let Json(customer) = payload?;
    let created = state
        .db
        .run(move |conn| customers::insert(conn, &customer))
        .await?;
    Ok(Json(created))
}

async fn get_customer_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Customer>> {
    let Path(id) = id?;
    let customer = state.db.run(move |conn| customers::get(conn, id)).await?;
    Ok(Json(customer))
}

async fn update_customer_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewCustomer>, JsonRejection>,
) -> ApiResult<Json<Customer>> {
    let Path(id) = id?;
    let Json(customer) = payload?;
    let updated = state
        .db
        .run(move |conn| customers::replace(conn, id, &customer))
        .await?;
    Ok(Json(updated))
}

async fn delete_customer_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.db.run(move |conn| customers::delete(conn, id)).await?;
    Ok(Json(DeleteResponse::deleted(Entity::Customer)))
}

/// `limit` must be a non-negative integer; `limit=-1` is a 400, not "all rows".
async fn list_customers_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListCustomersQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Customer>>> {
    let Query(query) = query?;
    let filter = CustomerFilter::from(query);
    let rows = state
        .db
        .run(move |conn| customers::list(conn, &filter))
        .await?;
    Ok(Json(rows))
}
