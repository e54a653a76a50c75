//! services/api/src/web/books.rs
//!
//! CRUD endpoints for the book catalogue.

use crate::error::{ApiError, ErrorResponse};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::rest::DeleteResponse;
use crate::web::state::AppState;
use axum::{extract::State, response::Json};
use bookstore_core::domain::{Book, BookChanges, BookDetails, RecordId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    pub description: String,
    pub year: i64,
    pub publisher: String,
    pub quantity: i64,
    pub pages: i64,
    pub price: i64,
    pub cover: String,
}

impl From<BookCreate> for BookDetails {
    fn from(req: BookCreate) -> Self {
        Self {
            title: req.title,
            author: req.author,
            description: req.description,
            year: req.year,
            publisher: req.publisher,
            quantity: req.quantity,
            pages: req.pages,
            price: req.price,
            cover: req.cover,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub year: Option<i64>,
    pub publisher: Option<String>,
    pub quantity: Option<i64>,
    pub pages: Option<i64>,
    pub price: Option<i64>,
    pub cover: Option<String>,
}

impl From<BookUpdate> for BookChanges {
    fn from(req: BookUpdate) -> Self {
        Self {
            title: req.title,
            author: req.author,
            description: req.description,
            year: req.year,
            publisher: req.publisher,
            quantity: req.quantity,
            pages: req.pages,
            price: req.price,
            cover: req.cover,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BookResponse {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub year: i64,
    pub publisher: String,
    pub quantity: i64,
    pub pages: i64,
    pub price: i64,
    pub cover: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let d = book.details;
        Self {
            id: book.id,
            title: d.title,
            author: d.author,
            description: d.description,
            year: d.year,
            publisher: d.publisher,
            quantity: d.quantity,
            pages: d.pages,
            price: d.price,
            cover: d.cover,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /books/ - List every book
#[utoipa::path(
    get,
    path = "/books/",
    responses((status = 200, description = "All books", body = [BookResponse]))
)]
pub async fn list_books_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = app_state.db.list_books().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// POST /books/ - Create a book
#[utoipa::path(
    post,
    path = "/books/",
    request_body = BookCreate,
    responses(
        (status = 200, description = "Book created", body = BookResponse),
        (status = 422, description = "Missing field or wrong type", body = ErrorResponse)
    )
)]
pub async fn create_book_handler(
    State(app_state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<BookCreate>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = app_state.db.create_book(req.into()).await?;
    info!("Created book {} ({})", book.id, book.details.title);
    Ok(Json(book.into()))
}

/// GET /books/{id}
#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = BookResponse),
        (status = 404, description = "No such book", body = ErrorResponse)
    )
)]
pub async fn read_book_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(book_id): ApiPath<RecordId>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = app_state.db.get_book_by_id(book_id).await?;
    Ok(Json(book.into()))
}

/// PUT /books/{id}
#[utoipa::path(
    put,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "The updated book", body = BookResponse),
        (status = 404, description = "No such book", body = ErrorResponse),
        (status = 422, description = "Wrong field type", body = ErrorResponse)
    )
)]
pub async fn update_book_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(book_id): ApiPath<RecordId>,
    ApiJson(req): ApiJson<BookUpdate>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = app_state.db.update_book(book_id, req.into()).await?;
    info!("Updated book {}", book.id);
    Ok(Json(book.into()))
}

/// DELETE /books/{id}
#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = DeleteResponse),
        (status = 404, description = "No such book", body = ErrorResponse)
    )
)]
pub async fn delete_book_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(book_id): ApiPath<RecordId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    app_state.db.delete_book(book_id).await?;
    info!("Deleted book {}", book_id);
    Ok(Json(DeleteResponse::new("Book deleted")))
}
