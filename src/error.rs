//! Error types for the catalog service
//!
//! Provides layered error handling using thiserror: store failures, service
//! outcomes, authentication failures, and the HTTP-facing `ApiError`.

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::{EntityId, ErrorResponse};

/// Field name -> list of validation messages for that field.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

// == Store Error ==
/// Failure reported by an entity store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The persistence engine rejected or failed the operation
    #[error("persistence error: {0}")]
    Persistence(String),

    /// No identifier is left to assign
    #[error("identifier space exhausted")]
    IdsExhausted,
}

impl StoreError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

// == Service Error ==
/// Outcome of a failed catalog service operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No entity with the given id exists
    #[error("Entity with id {0} not found")]
    NotFound(EntityId),

    /// The underlying store failed; never retried
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == Auth Error ==
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Failed to issue token: {0}")]
    Encoding(String),
}

// == API Error Enum ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Request body failed field validation
    #[error("One or more validation failures have occurred")]
    Validation(ValidationErrors),

    /// Missing or rejected credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => {
                ApiError::NotFound(format!("Book with id {} not found", id))
            }
            ServiceError::Store(store) => ApiError::Internal(store.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Encoding(msg) => ApiError::Internal(msg),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

/// Key used for body errors that cannot be attributed to one field
pub const BODY_ERROR_KEY: &str = "body";

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let field = missing_field(&message).unwrap_or(BODY_ERROR_KEY);
        let mut errors = ValidationErrors::new();
        errors.insert(field.to_string(), vec![message.clone()]);
        ApiError::Validation(errors)
    }
}

/// Extracts `name` from serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.split_once("missing field `")?.1;
    rest.split_once('`').map(|(field, _)| field)
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Validation(errors) => {
                let body = Json(json!({
                    "error": "One or more validation failures have occurred",
                    "errors": errors,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => {
                error!("Unhandled error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
