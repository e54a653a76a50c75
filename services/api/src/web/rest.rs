//! services/api/src/web/rest.rs
//!
//! Assembles the REST router, the CORS policy and the master definition for
//! the OpenAPI specification.

use crate::config::Config;
use crate::error::ErrorResponse;
use crate::web::state::AppState;
use crate::web::{books, purchases, reviews, users};
use axum::{
    http::HeaderValue,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        users::list_users_handler,
        users::create_user_handler,
        users::read_user_handler,
        users::update_user_handler,
        users::delete_user_handler,
        books::list_books_handler,
        books::create_book_handler,
        books::read_book_handler,
        books::update_book_handler,
        books::delete_book_handler,
        purchases::list_purchases_handler,
        purchases::create_purchase_handler,
        purchases::read_purchase_handler,
        purchases::update_purchase_handler,
        purchases::delete_purchase_handler,
        reviews::list_reviews_handler,
        reviews::create_review_handler,
        reviews::read_review_handler,
        reviews::update_review_handler,
        reviews::delete_review_handler,
    ),
    components(
        schemas(DeleteResponse, ErrorResponse)
    ),
    tags(
        (name = "Bookstore API", description = "Record keeping for users, books, purchases and reviews.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Response Structs
//=========================================================================================

/// The confirmation sent after a successful delete.
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

//=========================================================================================
// Router and Middleware
//=========================================================================================

/// Builds the application router. Every entity uses the same path scheme:
/// `/{entity}/` for list and create, `/{entity}/{id}` for read, update and delete.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/users/",
            get(users::list_users_handler).post(users::create_user_handler),
        )
        .route(
            "/users/{id}",
            get(users::read_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .route(
            "/books/",
            get(books::list_books_handler).post(books::create_book_handler),
        )
        .route(
            "/books/{id}",
            get(books::read_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler),
        )
        .route(
            "/purchases/",
            get(purchases::list_purchases_handler).post(purchases::create_purchase_handler),
        )
        .route(
            "/purchases/{id}",
            get(purchases::read_purchase_handler)
                .put(purchases::update_purchase_handler)
                .delete(purchases::delete_purchase_handler),
        )
        .route(
            "/reviews/",
            get(reviews::list_reviews_handler).post(reviews::create_review_handler),
        )
        .route(
            "/reviews/{id}",
            get(reviews::read_review_handler)
                .put(reviews::update_review_handler)
                .delete(reviews::delete_review_handler),
        )
        .route("/api-docs/openapi.json", get(openapi_handler))
        .with_state(app_state)
}

/// CORS restricted to the configured origins. Credentials are allowed, so
/// methods and headers are mirrored from the request rather than wildcarded.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
