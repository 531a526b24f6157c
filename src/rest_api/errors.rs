//! # REST API Errors
//!
//! Maps core failures and request-shape failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for REST handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Route requires an actor but no `x-actor-id` header was sent
    #[error("Missing x-actor-id header")]
    MissingActor,

    /// The actor header was not a valid UUID
    #[error("Invalid x-actor-id header: {0}")]
    InvalidActor(String),

    /// A path parameter was not a valid UUID
    #[error("Invalid restaurant id: {0}")]
    InvalidId(String),

    /// Core operation failure
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingActor => StatusCode::UNAUTHORIZED,
            ApiError::InvalidActor(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => match e {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Forbidden { .. } => StatusCode::FORBIDDEN,
                StoreError::Persistence(_)
                | StoreError::Corruption(_)
                | StoreError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Stable error code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingActor => "DISH_MISSING_ACTOR",
            ApiError::InvalidActor(_) => "DISH_INVALID_ACTOR",
            ApiError::InvalidId(_) => "DISH_INVALID_ID",
            ApiError::Store(e) => e.code(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            code: self.code(),
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
