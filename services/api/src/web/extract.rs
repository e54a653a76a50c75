//! services/api/src/web/extract.rs
//!
//! Request extractors that report shape errors as `ApiError::Validation`
//! (HTTP 422 with a JSON `detail`) instead of axum's plain-text rejections.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// A JSON body. Missing fields, wrong primitive types and malformed JSON are
/// all rejected before the handler runs.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters, e.g. the numeric record id.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
