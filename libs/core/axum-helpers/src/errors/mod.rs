pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error body returned by every endpoint.
///
/// ```json
/// { "error": "Invalid query parameter 'page': expected an integer >= 1, got 'abc'" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub error: String,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::QueryExtractorRejection(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {}", e.body_text());
                e.body_text()
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!("Query extraction error: {}", e.body_text());
                e.body_text()
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                msg
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                msg
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                msg
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
