//! Bulk Order Upload Route
//!
//! `POST /upload-orders/` takes a multipart form whose `file` field holds a
//! JSON array of orders. The array is imported in a single transaction.
//!
//! The route replaces axum's default 2 MiB body limit with
//! `HttpServerConfig::max_upload_bytes`; without one any size is accepted.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::store::import;

use super::errors::{ApiError, ApiResult};
use super::response::UploadResponse;
use super::state::AppState;

/// Name of the multipart field carrying the document
pub const UPLOAD_FIELD: &str = "file";

/// Create upload routes
pub fn upload_routes(state: Arc<AppState>, max_upload_bytes: Option<usize>) -> Router {
    let body_limit = match max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route(
            "/upload-orders/",
            post(upload_orders_handler).layer(body_limit),
        )
        .with_state(state)
}

async fn upload_orders_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart?;
    let document = read_upload(&mut multipart).await?;

    // Parse before touching the database so a bad document changes nothing.
    let records = import::parse_document(&document)?;
    let count = state
        .db
        .run(move |conn| import::import_orders(conn, &records))
        .await?;

    info!(count, "order upload committed");
    Ok(Json(UploadResponse::uploaded()))
}

async fn read_upload(multipart: &mut Multipart) -> ApiResult<Bytes> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            return Ok(field.bytes().await?);
        }
    }
    Err(ApiError::MissingField(UPLOAD_FIELD))
}
