//! services/api/src/web/purchases.rs
//!
//! CRUD endpoints for purchases. A purchase gets its own id; `user_id` is a
//! plain reference that is stored as given and never checked against users.

use crate::error::{ApiError, ErrorResponse};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::rest::DeleteResponse;
use crate::web::state::AppState;
use axum::{extract::State, response::Json};
use bookstore_core::domain::{
    PersonChanges, PersonDetails, Purchase, PurchaseChanges, PurchaseDetails, RecordId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct PurchaseCreate {
    pub user_id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: i64,
    pub gender: String,
    pub age: i64,
}

impl From<PurchaseCreate> for PurchaseDetails {
    fn from(req: PurchaseCreate) -> Self {
        Self {
            user_id: req.user_id,
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
pub struct PurchaseUpdate {
    pub user_id: Option<RecordId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<i64>,
    pub gender: Option<String>,
    pub age: Option<i64>,
}

impl From<PurchaseUpdate> for PurchaseChanges {
    fn from(req: PurchaseUpdate) -> Self {
        Self {
            user_id: req.user_id,
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
pub struct PurchaseResponse {
    pub id: RecordId,
    pub user_id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: i64,
    pub gender: String,
    pub age: i64,
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        let person = purchase.details.person;
        Self {
            id: purchase.id,
            user_id: purchase.details.user_id,
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

/// GET /purchases/ - List every purchase
#[utoipa::path(
    get,
    path = "/purchases/",
    responses((status = 200, description = "All purchases", body = [PurchaseResponse]))
)]
pub async fn list_purchases_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<PurchaseResponse>>, ApiError> {
    let purchases = app_state.db.list_purchases().await?;
    Ok(Json(purchases.into_iter().map(PurchaseResponse::from).collect()))
}

/// POST /purchases/ - Record a purchase
#[utoipa::path(
    post,
    path = "/purchases/",
    request_body = PurchaseCreate,
    responses(
        (status = 200, description = "Purchase created", body = PurchaseResponse),
        (status = 422, description = "Missing field or wrong type", body = ErrorResponse)
    )
)]
pub async fn create_purchase_handler(
    State(app_state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<PurchaseCreate>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let purchase = app_state.db.create_purchase(req.into()).await?;
    info!(
        "Created purchase {} for user {}",
        purchase.id, purchase.details.user_id
    );
    Ok(Json(purchase.into()))
}

/// GET /purchases/{id}
#[utoipa::path(
    get,
    path = "/purchases/{id}",
    params(("id" = i64, Path, description = "Purchase id")),
    responses(
        (status = 200, description = "The purchase", body = PurchaseResponse),
        (status = 404, description = "No such purchase", body = ErrorResponse)
    )
)]
pub async fn read_purchase_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(purchase_id): ApiPath<RecordId>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let purchase = app_state.db.get_purchase_by_id(purchase_id).await?;
    Ok(Json(purchase.into()))
}

/// PUT /purchases/{id}
#[utoipa::path(
    put,
    path = "/purchases/{id}",
    params(("id" = i64, Path, description = "Purchase id")),
    request_body = PurchaseUpdate,
    responses(
        (status = 200, description = "The updated purchase", body = PurchaseResponse),
        (status = 404, description = "No such purchase", body = ErrorResponse),
        (status = 422, description = "Wrong field type", body = ErrorResponse)
    )
)]
pub async fn update_purchase_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(purchase_id): ApiPath<RecordId>,
    ApiJson(req): ApiJson<PurchaseUpdate>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let purchase = app_state
        .db
        .update_purchase(purchase_id, req.into())
        .await?;
    info!("Updated purchase {}", purchase.id);
    Ok(Json(purchase.into()))
}

/// DELETE /purchases/{id}
#[utoipa::path(
    delete,
    path = "/purchases/{id}",
    params(("id" = i64, Path, description = "Purchase id")),
    responses(
        (status = 200, description = "Purchase deleted", body = DeleteResponse),
        (status = 404, description = "No such purchase", body = ErrorResponse)
    )
)]
pub async fn delete_purchase_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(purchase_id): ApiPath<RecordId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    app_state.db.delete_purchase(purchase_id).await?;
    info!("Deleted purchase {}", purchase_id);
    Ok(Json(DeleteResponse::new("Purchase deleted")))
}
