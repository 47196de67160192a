//! HTTP API Tests
//!
//! Drives the full axum router against a temporary SQLite file:
//! - CRUD round trips for customers, items and orders
//! - 400 for client-input errors, 404 for missing rows
//! - Atomic bulk upload through the multipart endpoint

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use storedesk::http_server::{HttpServer, HttpServerConfig};
use storedesk::store::{orders, schema, Database};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> (TempDir, Database, Router) {
    setup_with(HttpServerConfig::default())
}

fn setup_with(config: HttpServerConfig) -> (TempDir, Database, Router) {
    let tmp = TempDir::new().unwrap();
    let db = Database::new(tmp.path().join("db.sqlite"));
    schema::ensure_schema(&db.connect().unwrap()).unwrap();
    let router = HttpServer::new(config, db.clone()).router();
    (tmp, db, router)
}

/// A valid order document of `count` records for customer 1 / item 1.
fn order_document(count: usize) -> String {
    let records: Vec<Value> = (0..count)
        .map(|i| json!({"customer_id": 1, "item_id": 1, "quantity": i % 9 + 1, "order_date": "2024-01-01"}))
        .collect();
    Value::Array(records).to_string()
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    read_json(router.clone().oneshot(request).await.unwrap()).await
}

async fn upload(router: &Router, field: &str, document: &str) -> (StatusCode, Value) {
    let boundary = "storedesk-test-boundary";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"orders.json\"\r\n\
         Content-Type: application/json\r\n\r\n\
         {document}\r\n\
         --{b}--\r\n",
        b = boundary,
        field = field,
        document = document,
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload-orders/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    read_json(router.clone().oneshot(request).await.unwrap()).await
}

fn order_count(db: &Database) -> i64 {
    orders::count(&db.connect().unwrap()).unwrap()
}

/// Creates customer 1 and item 1 so orders have something to reference.
async fn with_customer_and_item(router: &Router) {
    let (status, _) = send(
        router,
        "POST",
        "/customers/",
        Some(json!({"name": "Ada", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        router,
        "POST",
        "/items/",
        Some(json!({"name": "Widget", "price": 9.99})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Customers
// =============================================================================

#[tokio::test]
async fn test_customer_create_then_get() {
    let (_tmp, _db, router) = setup();

    let (status, created) = send(
        &router,
        "POST",
        "/customers/",
        Some(json!({"name": "Ada Lovelace", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&router, "GET", &format!("/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Ada Lovelace");
    assert_eq!(fetched["email"], "ada@example.com");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_email_rejected_and_first_unaffected() {
    let (_tmp, _db, router) = setup();

    let (_, first) = send(
        &router,
        "POST",
        "/customers/",
        Some(json!({"name": "Ada", "email": "ada@example.com"})),
    )
    .await;

    let (status, body) = send(
        &router,
        "POST",
        "/customers/",
        Some(json!({"name": "Someone Else", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already exists");

    let (_, listed) = send(&router, "GET", "/customers/", None).await;
    assert_eq!(listed, json!([first]));
}

#[tokio::test]
async fn test_customer_replace_and_delete() {
    let (_tmp, _db, router) = setup();
    let (_, created) = send(
        &router,
        "POST",
        "/customers/",
        Some(json!({"name": "Ada", "email": "ada@example.com"})),
    )
    .await;
    let uri = format!("/customers/{}", created["id"]);

    let (status, updated) = send(
        &router,
        "PUT",
        &uri,
        Some(json!({"name": "Ada King", "email": "countess@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["email"], "countess@example.com");

    let (status, body) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detail"], "Customer deleted successfully");

    let (status, body) = send(&router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Customer not found");
}

#[tokio::test]
async fn test_customer_list_name_filter() {
    let (_tmp, _db, router) = setup();
    for (name, email) in [
        ("Ada Lovelace", "ada@example.com"),
        ("Grace Hopper", "grace@example.com"),
        ("Adam Smith", "adam@example.com"),
    ] {
        send(
            &router,
            "POST",
            "/customers/",
            Some(json!({"name": name, "email": email})),
        )
        .await;
    }

    let (status, listed) = send(&router, "GET", "/customers/?name=Ada", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "Adam Smith"]);
}

#[tokio::test]
async fn test_missing_required_body_field_is_bad_request() {
    let (_tmp, _db, router) = setup();
    let (status, body) = send(&router, "POST", "/customers/", Some(json!({"name": "Ada"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

// =============================================================================
// Missing rows
// =============================================================================

#[tokio::test]
async fn test_update_and_delete_missing_rows_are_not_found() {
    let (_tmp, db, router) = setup();
    with_customer_and_item(&router).await;
    send(
        &router,
        "POST",
        "/orders/",
        Some(json!({"customer_id": 1, "item_id": 1, "quantity": 2, "order_date": "2024-01-01"})),
    )
    .await;

    let cases = [
        (
            "/customers/999",
            json!({"name": "X", "email": "x@example.com"}),
            "Customer not found",
        ),
        ("/items/999", json!({"name": "X", "price": 1.0}), "Item not found"),
        (
            "/orders/999",
            json!({"customer_id": 1, "item_id": 1, "quantity": 1, "order_date": "2024-01-01"}),
            "Order not found",
        ),
    ];

    for (uri, body, detail) in cases {
        let (status, response) = send(&router, "PUT", uri, Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {}", uri);
        assert_eq!(response["detail"], detail);

        let (status, response) = send(&router, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
        assert_eq!(response["detail"], detail);
    }

    let (_, customers) = send(&router, "GET", "/customers/", None).await;
    let (_, items) = send(&router, "GET", "/items/", None).await;
    assert_eq!(customers.as_array().unwrap().len(), 1);
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(order_count(&db), 1);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (_tmp, _db, router) = setup();
    let (status, _) = send(&router, "GET", "/items/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Items
// =============================================================================

#[tokio::test]
async fn test_widget_round_trip() {
    let (_tmp, _db, router) = setup();

    let (status, created) = send(
        &router,
        "POST",
        "/items/",
        Some(json!({"name": "Widget", "price": 9.99})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["price"], 9.99);

    let (status, fetched) = send(&router, "GET", &format!("/items/{}", created["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_item_price_range_is_inclusive_and_limited() {
    let (_tmp, _db, router) = setup();
    for price in [1.0, 5.0, 6.0, 7.5, 10.0, 12.0] {
        send(
            &router,
            "POST",
            "/items/",
            Some(json!({"name": format!("item-{}", price), "price": price})),
        )
        .await;
    }

    let (status, listed) = send(&router, "GET", "/items/?min_price=5&max_price=10", None).await;
    assert_eq!(status, StatusCode::OK);
    let prices: Vec<f64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![5.0, 6.0, 7.5, 10.0]);

    let (_, limited) = send(&router, "GET", "/items/?min_price=5&max_price=10&limit=2", None).await;
    assert_eq!(limited.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_defaults_to_ten_rows() {
    let (_tmp, _db, router) = setup();
    for i in 0..12 {
        send(
            &router,
            "POST",
            "/items/",
            Some(json!({"name": format!("item-{}", i), "price": 1.0})),
        )
        .await;
    }

    let (_, listed) = send(&router, "GET", "/items/", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_invalid_limit_is_bad_request() {
    let (_tmp, _db, router) = setup();
    let (status, body) = send(&router, "GET", "/items/?limit=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_order_crud_and_customer_filter() {
    let (_tmp, _db, router) = setup();
    with_customer_and_item(&router).await;
    send(
        &router,
        "POST",
        "/customers/",
        Some(json!({"name": "Grace", "email": "grace@example.com"})),
    )
    .await;

    let (status, created) = send(
        &router,
        "POST",
        "/orders/",
        Some(json!({"customer_id": 1, "item_id": 1, "quantity": 2, "order_date": "2024-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    send(
        &router,
        "POST",
        "/orders/",
        Some(json!({"customer_id": 2, "item_id": 1, "quantity": 1, "order_date": "2024-01-02"})),
    )
    .await;

    let (_, fetched) = send(&router, "GET", &format!("/orders/{}", created["id"]), None).await;
    assert_eq!(fetched, created);

    let (_, for_grace) = send(&router, "GET", "/orders/?customer_id=2", None).await;
    let for_grace = for_grace.as_array().unwrap();
    assert_eq!(for_grace.len(), 1);
    assert_eq!(for_grace[0]["customer_id"], 2);
}

#[tokio::test]
async fn test_order_with_dangling_reference_is_rejected() {
    let (_tmp, db, router) = setup();
    with_customer_and_item(&router).await;

    let (status, _) = send(
        &router,
        "POST",
        "/orders/",
        Some(json!({"customer_id": 1, "item_id": 42, "quantity": 1, "order_date": "2024-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(order_count(&db), 0);
}

// =============================================================================
// Bulk upload
// =============================================================================

#[tokio::test]
async fn test_upload_inserts_every_record() {
    let (_tmp, db, router) = setup();
    with_customer_and_item(&router).await;

    let document = json!([
        {"customer_id": 1, "item_id": 1, "quantity": 1, "order_date": "2024-01-01"},
        {"customer_id": 1, "item_id": 1, "quantity": 2, "order_date": "2024-01-02"},
        {"customer_id": 1, "item_id": 1, "quantity": 3, "order_date": "2024-01-03"}
    ]);
    let (status, body) = upload(&router, "file", &document.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Orders successfully uploaded");
    assert_eq!(order_count(&db), 3);
}

#[tokio::test]
async fn test_upload_with_missing_fields_inserts_nothing() {
    let (_tmp, db, router) = setup();
    with_customer_and_item(&router).await;

    let document = r#"[{"customer_id":1,"item_id":1,"quantity":2,"order_date":"2024-01-01"}, {"customer_id":1,"item_id":1}]"#;
    let (status, body) = upload(&router, "file", document).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Order data missing required fields");
    assert_eq!(order_count(&db), 0);
}

#[tokio::test]
async fn test_upload_invalid_json_changes_nothing() {
    let (_tmp, db, router) = setup();
    with_customer_and_item(&router).await;

    let (status, body) = upload(&router, "file", "[{\"customer_id\": 1,").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid JSON file");
    assert_eq!(order_count(&db), 0);
}

#[tokio::test]
async fn test_upload_non_array_is_bad_request() {
    let (_tmp, db, router) = setup();
    let (status, body) = upload(&router, "file", r#"{"customer_id": 1}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Expected a JSON array of orders");
    assert_eq!(order_count(&db), 0);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let (_tmp, _db, router) = setup();
    let (status, body) = upload(&router, "attachment", "[]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing file field");
}

#[tokio::test]
async fn test_upload_with_dangling_reference_rolls_back() {
    let (_tmp, db, router) = setup();
    with_customer_and_item(&router).await;

    let document = json!([
        {"customer_id": 1, "item_id": 1, "quantity": 1, "order_date": "2024-01-01"},
        {"customer_id": 77, "item_id": 1, "quantity": 1, "order_date": "2024-01-02"}
    ]);
    let (status, _) = upload(&router, "file", &document.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(order_count(&db), 0);
}

#[tokio::test]
async fn test_upload_larger_than_two_mib_is_accepted() {
    let (_tmp, db, router) = setup();
    with_customer_and_item(&router).await;

    let document = order_document(40_000);
    assert!(document.len() > 2 * 1024 * 1024);
    let (status, body) = upload(&router, "file", &document).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(order_count(&db), 40_000);
}

#[tokio::test]
async fn test_upload_over_configured_cap_is_payload_too_large() {
    let config = HttpServerConfig {
        max_upload_bytes: Some(1024),
        ..HttpServerConfig::default()
    };
    let (_tmp, db, router) = setup_with(config);
    with_customer_and_item(&router).await;

    let (status, body) = upload(&router, "file", &order_document(100)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], 413);
    assert_eq!(order_count(&db), 0);
}

#[tokio::test]
async fn test_non_integer_quantity_is_stored_but_breaks_listing() {
    // Values are bound with their JSON type; SQLite keeps "two" as TEXT in
    // the INTEGER column, so the row cannot be read back as an order.
    let (_tmp, db, router) = setup();
    with_customer_and_item(&router).await;

    let document = json!([
        {"customer_id": 1, "item_id": 1, "quantity": "two", "order_date": "2024-01-01"}
    ]);
    let (status, _) = upload(&router, "file", &document.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order_count(&db), 1);

    let (status, _) = send(&router, "GET", "/orders/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (_tmp, _db, router) = setup();
    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
