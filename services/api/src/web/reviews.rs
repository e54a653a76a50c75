//! services/api/src/web/reviews.rs
//!
//! CRUD endpoints for book reviews.

use crate::error::{ApiError, ErrorResponse};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::rest::DeleteResponse;
use crate::web::state::AppState;
use axum::{extract::State, response::Json};
use bookstore_core::domain::{
    PersonChanges, PersonDetails, RecordId, Review, ReviewChanges, ReviewDetails,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct ReviewCreate {
    pub book_id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: i64,
    pub gender: String,
    pub age: i64,
}

impl From<ReviewCreate> for ReviewDetails {
    fn from(req: ReviewCreate) -> Self {
        Self {
            book_id: req.book_id,
            person: PersonDetails {
                first_name: req.first_name,
                last_name: req.last_name,
                email_address: req.email_address,
                phone_number: req.phone_number,
                gender: req.gender,
                age: req.age,
            },
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct ReviewUpdate {
    pub book_id: Option<RecordId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<i64>,
    pub gender: Option<String>,
    pub age: Option<i64>,
}

impl From<ReviewUpdate> for ReviewChanges {
    fn from(req: ReviewUpdate) -> Self {
        Self {
            book_id: req.book_id,
            person: PersonChanges {
                first_name: req.first_name,
                last_name: req.last_name,
                email_address: req.email_address,
                phone_number: req.phone_number,
                gender: req.gender,
                age: req.age,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ReviewResponse {
    pub id: RecordId,
    pub book_id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: i64,
    pub gender: String,
    pub age: i64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        let person = review.details.person;
        Self {
            id: review.id,
            book_id: review.details.book_id,
            first_name: person.first_name,
            last_name: person.last_name,
            email_address: person.email_address,
            phone_number: person.phone_number,
            gender: person.gender,
            age: person.age,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /reviews/ - List every review
#[utoipa::path(
    get,
    path = "/reviews/",
    responses((status = 200, description = "All reviews", body = [ReviewResponse]))
)]
pub async fn list_reviews_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = app_state.db.list_reviews().await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

/// POST /reviews/ - Leave a review
#[utoipa::path(
    post,
    path = "/reviews/",
    request_body = ReviewCreate,
    responses(
        (status = 200, description = "Review created", body = ReviewResponse),
        (status = 422, description = "Missing field or wrong type", body = ErrorResponse)
    )
)]
pub async fn create_review_handler(
    State(app_state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ReviewCreate>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review = app_state.db.create_review(req.into()).await?;
    info!("Created review {} for book {}", review.id, review.details.book_id);
    Ok(Json(review.into()))
}

/// GET /reviews/{id}
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "The review", body = ReviewResponse),
        (status = 404, description = "No such review", body = ErrorResponse)
    )
)]
pub async fn read_review_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(review_id): ApiPath<RecordId>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review = app_state.db.get_review_by_id(review_id).await?;
    Ok(Json(review.into()))
}

/// PUT /reviews/{id}
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    request_body = ReviewUpdate,
    responses(
        (status = 200, description = "The updated review", body = ReviewResponse),
        (status = 404, description = "No such review", body = ErrorResponse),
        (status = 422, description = "Wrong field type", body = ErrorResponse)
    )
)]
pub async fn update_review_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(review_id): ApiPath<RecordId>,
    ApiJson(req): ApiJson<ReviewUpdate>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review = app_state.db.update_review(review_id, req.into()).await?;
    info!("Updated review {}", review.id);
    Ok(Json(review.into()))
}

/// DELETE /reviews/{id}
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted", body = DeleteResponse),
        (status = 404, description = "No such review", body = ErrorResponse)
    )
)]
pub async fn delete_review_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(review_id): ApiPath<RecordId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    app_state.db.delete_review(review_id).await?;
    info!("Deleted review {}", review_id);
    Ok(Json(DeleteResponse::new("Review deleted")))
}
