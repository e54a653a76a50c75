//! End-to-end tests driving the full router against a temporary SQLite file.

use api_lib::{
    adapters::db::DbAdapter,
    config::Config,
    web::{cors_layer, router, state::AppState},
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn spawn_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("books.db").display());
    let config = Config::from_vars(|name| match name {
        "DATABASE_URL" => Some(url.clone()),
        _ => None,
    })
    .unwrap();

    let pool = DbAdapter::connect(&config.database_url, config.db_max_connections)
        .await
        .unwrap();
    let db = Arc::new(DbAdapter::new(pool));
    db.run_migrations().await.unwrap();

    let app_state = Arc::new(AppState { db });
    (router(app_state).layer(cors_layer(&config)), dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn dune() -> Value {
    json!({
        "title": "Dune",
        "author": "Herbert",
        "description": "...",
        "year": 1965,
        "publisher": "Chilton",
        "quantity": 5,
        "pages": 412,
        "price": 20,
        "cover": "url"
    })
}

fn user() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email_address": "ada@example.com",
        "phone_number": 5551234,
        "gender": "female",
        "age": 36,
        "password": "analytical-engine"
    })
}

fn contact(reference: &str, id: i64) -> Value {
    let mut body = json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "email_address": "grace@example.com",
        "phone_number": 4155550100i64,
        "gender": "female",
        "age": 85
    });
    body[reference] = json!(id);
    body
}

fn with_id(mut body: Value, id: i64) -> Value {
    body["id"] = json!(id);
    body
}

#[tokio::test]
async fn book_lifecycle_matches_the_dune_scenario() {
    let (app, _dir) = spawn_app().await;

    let (status, created) = send(&app, "POST", "/books/", Some(dune())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, with_id(dune(), 1));

    let (status, fetched) = send(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(&app, "PUT", "/books/1", Some(json!({ "quantity": 3 }))).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = with_id(dune(), 1);
    expected["quantity"] = json!(3);
    assert_eq!(updated, expected);

    let (status, reread) = send(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reread, expected);

    let (status, deleted) = send(&app, "DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "message": "Book deleted" }));

    let (status, missing) = send(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, json!({ "detail": "Book 1 not found" }));
}

#[tokio::test]
async fn user_missing_a_field_is_rejected_without_writing() {
    let (app, _dir) = spawn_app().await;

    let mut body = user();
    body.as_object_mut().unwrap().remove("age");
    let (status, error) = send(&app, "POST", "/users/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["detail"].as_str().unwrap().contains("age"));

    let (status, users) = send(&app, "GET", "/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn user_password_is_required_but_never_returned() {
    let (app, _dir) = spawn_app().await;

    let mut without_password = user();
    without_password.as_object_mut().unwrap().remove("password");
    let (status, _) = send(&app, "POST", "/users/", Some(without_password)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, created) = send(&app, "POST", "/users/", Some(user())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(created.get("password").is_none());
    assert_eq!(created["first_name"], "Ada");

    let (status, updated) = send(
        &app,
        "PUT",
        "/users/1",
        Some(json!({ "password": "difference-engine", "age": 37 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated.get("password").is_none());
    assert_eq!(updated["age"], 37);
    assert_eq!(updated["email_address"], "ada@example.com");
}

#[tokio::test]
async fn wrong_types_and_bad_bodies_are_unprocessable() {
    let (app, _dir) = spawn_app().await;

    let mut body = dune();
    body["year"] = json!("1965");
    let (status, _) = send(&app, "POST", "/books/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "PUT", "/books/1", Some(json!({ "price": "cheap" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/books/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let request = Request::builder()
        .method("POST")
        .uri("/books/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = Request::builder()
        .method("POST")
        .uri("/books/")
        .body(Body::from(dune().to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (_, books) = send(&app, "GET", "/books/", None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn missing_ids_are_not_found_for_every_entity() {
    let (app, _dir) = spawn_app().await;

    for entity in ["users", "books", "purchases", "reviews"] {
        let uri = format!("/{}/999", entity);
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        let (status, _) = send(&app, "PUT", &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {}", uri);
        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
        assert!(body["detail"].as_str().unwrap().ends_with("999 not found"));
    }
}

#[tokio::test]
async fn purchases_get_their_own_ids_and_merge_partial_updates() {
    let (app, _dir) = spawn_app().await;

    let (status, first) = send(&app, "POST", "/purchases/", Some(contact("user_id", 7))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, with_id(contact("user_id", 7), 1));

    // A second purchase for the same user is a new row, not a conflict.
    let (status, second) = send(&app, "POST", "/purchases/", Some(contact("user_id", 7))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], 2);

    let (status, updated) = send(
        &app,
        "PUT",
        "/purchases/2",
        Some(json!({ "last_name": "Murray" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["last_name"], "Murray");
    assert_eq!(updated["user_id"], 7);
    assert_eq!(updated["first_name"], "Grace");

    let (status, all) = send(&app, "GET", "/purchases/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([first, updated]));

    let (status, deleted) = send(&app, "DELETE", "/purchases/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "message": "Purchase deleted" }));
}

#[tokio::test]
async fn list_reflects_creates_minus_deletes() {
    let (app, _dir) = spawn_app().await;

    for book_id in 1..=4 {
        let (status, _) = send(&app, "POST", "/reviews/", Some(contact("book_id", book_id))).await;
        assert_eq!(status, StatusCode::OK);
    }
    for id in [2, 4] {
        let (status, body) = send(&app, "DELETE", &format!("/reviews/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Review deleted" }));
    }

    let (status, reviews) = send(&app, "GET", "/reviews/", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = reviews
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);

    let (status, _) = send(&app, "GET", "/reviews/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn irregular_legacy_paths_are_not_served() {
    let (app, _dir) = spawn_app().await;
    send(&app, "POST", "/books/", Some(dune())).await;

    let (status, _) = send(&app, "DELETE", "/deletebooks/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", "/purchasess/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cors_allows_only_configured_origins_with_credentials() {
    let (app, _dir) = spawn_app().await;

    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/books/")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(preflight("http://127.0.0.1:8000"))
        .await
        .unwrap();
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://127.0.0.1:8000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "PUT");

    let response = app
        .clone()
        .oneshot(preflight("http://evil.example.com"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn openapi_document_lists_the_normalized_paths() {
    let (app, _dir) = spawn_app().await;

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().unwrap();
    for path in ["/users/", "/books/{id}", "/purchases/", "/reviews/{id}"] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
    assert!(!paths.contains_key("/deletebooks/{id}"));
}
