// crates/contract-forge-server/src/error.rs
// ============================================================================
// Module: Server Errors
// Description: Startup errors and HTTP error responses.
// Purpose: Map domain failures onto status codes with JSON bodies.
// Dependencies: axum, contract-forge-core, serde, thiserror
// ============================================================================

//! ## Overview
//! Handler failures become [`ApiError`], which renders as
//! `{"message": ..., "errors": [...]}` with `errors` present only for form
//! validation failures. Internal failure detail is kept out of responses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use contract_forge_core::FieldError;
use contract_forge_core::ServiceError;
use serde::Serialize;

// ============================================================================
// SECTION: Server Errors
// ============================================================================

/// Server startup and transport errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: API Errors
// ============================================================================

/// Error response returned by handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Response status.
    pub status: StatusCode,
    /// User-facing message.
    pub message: String,
    /// Per-field validation failures.
    pub errors: Option<Vec<FieldError>>,
}

/// JSON body of an error response.
#[derive(Serialize)]
struct ApiErrorBody<'a> {
    /// User-facing message.
    message: &'a str,
    /// Per-field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl ApiError {
    /// Creates an error with a status and message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 for an unknown contract record.
    #[must_use]
    pub fn contract_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Contract not found")
    }

    /// 500 with a fixed public message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Maps a service failure, using `action` for the storage failure message.
    #[must_use]
    pub fn from_service(error: ServiceError, action: &str) -> Self {
        match error {
            ServiceError::UnknownContractType(id) => {
                Self::bad_request(format!("Unknown contract type: {id}"))
            }
            ServiceError::Validation(validation) => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Invalid form data".to_string(),
                errors: Some(validation.errors),
            },
            ServiceError::Resolve(_) => Self::bad_request("Invalid generation date"),
            ServiceError::Store(_) => Self::internal(format!("Failed to {action}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            message: &self.message,
            errors: self.errors.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}
