//! End-to-end checks of the catalog through the fully assembled router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shelf_kernel::{
    settings::{IdPolicy, Settings},
    InitCtx, ModuleRegistry,
};
use tower::ServiceExt;

async fn app(settings: &Settings) -> (ModuleRegistry, Router) {
    let registry = shelf_app::build_registry(settings).unwrap();
    registry
        .init_modules(&InitCtx { settings })
        .await
        .unwrap();
    let router = shelf_http::build_router(&registry, settings);
    (registry, router)
}

async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn ids(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["identification"].as_i64().unwrap())
        .collect()
}

fn new_book(title: &str) -> Value {
    json!({
        "title": title,
        "author": "Mahfuja Mitu",
        "description": "Fresh arrival",
        "rating": 4,
        "published_date": 2024
    })
}

#[tokio::test]
async fn seeded_catalog_scenario() {
    let settings = Settings::default();
    let (_registry, router) = app(&settings).await;

    let (status, book) = call(&router, "GET", "/api/books/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "Computer Science");
    assert_eq!(book["author"], "Gazi Al- Amin");
    assert_eq!(book["description"], "Nice Book");
    assert_eq!(book["rating"], 5);
    assert_eq!(book["published_date"], 2001);

    let (_, rated) = call(&router, "GET", "/api/books/rating?book_rating=5", None).await;
    assert_eq!(ids(&rated), vec![1, 3]);

    let (status, _) = call(&router, "DELETE", "/api/books/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, list) = call(&router, "GET", "/api/books", None).await;
    assert_eq!(ids(&list), vec![1, 3, 4, 5]);

    let (status, _) = call(&router, "POST", "/api/books/create-book", Some(new_book("Data Mining"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, list) = call(&router, "GET", "/api/books", None).await;
    assert_eq!(ids(&list), vec![1, 3, 4, 5, 6]);
}

#[tokio::test]
async fn deleting_the_tail_reuses_its_id_by_default() {
    let settings = Settings::default();
    let (_registry, router) = app(&settings).await;

    call(&router, "DELETE", "/api/books/5", None).await;
    call(&router, "POST", "/api/books/create-book", Some(new_book("Replacement"))).await;

    let (_, list) = call(&router, "GET", "/api/books", None).await;
    assert_eq!(ids(&list), vec![1, 2, 3, 4, 5]);
    let (_, book) = call(&router, "GET", "/api/books/5", None).await;
    assert_eq!(book["title"], "Replacement");
}

#[tokio::test]
async fn monotonic_policy_skips_deleted_ids() {
    let mut settings = Settings::default();
    settings.catalog.id_policy = IdPolicy::Monotonic;
    let (_registry, router) = app(&settings).await;

    call(&router, "DELETE", "/api/books/5", None).await;
    call(&router, "POST", "/api/books/create-book", Some(new_book("Replacement"))).await;

    let (_, list) = call(&router, "GET", "/api/books", None).await;
    assert_eq!(ids(&list), vec![1, 2, 3, 4, 6]);
    let (status, _) = call(&router, "GET", "/api/books/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_catalog_starts_ids_at_one() {
    let mut settings = Settings::default();
    settings.catalog.seed_example_data = false;
    let (_registry, router) = app(&settings).await;

    let (_, list) = call(&router, "GET", "/api/books", None).await;
    assert_eq!(list, json!([]));

    call(&router, "POST", "/api/books/create-book", Some(new_book("Opening Day"))).await;
    let (status, book) = call(&router, "GET", "/api/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "Opening Day");
}

#[tokio::test]
async fn framework_routes_are_served() {
    let settings = Settings::default();
    let (registry, router) = app(&settings).await;

    let (status, _) = call(&router, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, doc) = call(&router, "GET", "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/books/{book_id}"]["get"].is_object());
    assert!(doc["paths"]["/api/books"]["get"].is_object());
    assert!(doc["components"]["schemas"]["Book"].is_object());

    registry.stop_modules().await.unwrap();
}
