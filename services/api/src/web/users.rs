//! services/api/src/web/users.rs
//!
//! CRUD endpoints for user records. Passwords are hashed with Argon2 before
//! they reach the database and are never echoed back.

use crate::error::{ApiError, ErrorResponse};
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::rest::DeleteResponse;
use crate::web::state::AppState;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{extract::State, response::Json};
use bookstore_core::domain::{PersonChanges, PersonDetails, RecordId, User, UserAccount, UserChanges};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: i64,
    pub gender: String,
    pub age: i64,
    pub password: String,
}

/// Any subset of the user fields; omitted fields keep their stored values.
#[derive(Deserialize, ToSchema)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<i64>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct UserResponse {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: i64,
    pub gender: String,
    pub age: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.person.first_name,
            last_name: user.person.last_name,
            email_address: user.person.email_address,
            phone_number: user.person.phone_number,
            gender: user.person.gender,
            age: user.person.age,
        }
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            ApiError::Internal("Failed to hash password".to_string())
        })
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /users/ - List every user
#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "All users", body = [UserResponse])
    )
)]
pub async fn list_users_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = app_state.db.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users/ - Create a user
#[utoipa::path(
    post,
    path = "/users/",
    request_body = UserCreate,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 422, description = "Missing field or wrong type", body = ErrorResponse)
    )
)]
pub async fn create_user_handler(
    State(app_state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UserCreate>,
) -> Result<Json<UserResponse>, ApiError> {
    let hashed_password = hash_password(&req.password)?;
    let account = UserAccount {
        person: PersonDetails {
            first_name: req.first_name,
            last_name: req.last_name,
            email_address: req.email_address,
            phone_number: req.phone_number,
            gender: req.gender,
            age: req.age,
        },
        hashed_password,
    };

    let user = app_state.db.create_user(account).await?;
    info!("Created user {}", user.id);
    Ok(Json(user.into()))
}

/// GET /users/{id} - Fetch one user
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn read_user_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<RecordId>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app_state.db.get_user_by_id(user_id).await?;
    Ok(Json(user.into()))
}

/// PUT /users/{id} - Update some fields of a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "The updated user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 422, description = "Wrong field type", body = ErrorResponse)
    )
)]
pub async fn update_user_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<RecordId>,
    ApiJson(req): ApiJson<UserUpdate>,
) -> Result<Json<UserResponse>, ApiError> {
    let hashed_password = req.password.as_deref().map(hash_password).transpose()?;
    let changes = UserChanges {
        person: PersonChanges {
            first_name: req.first_name,
            last_name: req.last_name,
            email_address: req.email_address,
            phone_number: req.phone_number,
            gender: req.gender,
            age: req.age,
        },
        hashed_password,
    };

    let user = app_state.db.update_user(user_id, changes).await?;
    info!("Updated user {}", user.id);
    Ok(Json(user.into()))
}

/// DELETE /users/{id} - Remove a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn delete_user_handler(
    State(app_state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<RecordId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    app_state.db.delete_user(user_id).await?;
    info!("Deleted user {}", user_id);
    Ok(Json(DeleteResponse::new("User deleted")))
}
