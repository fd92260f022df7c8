use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Malformed query parameter or body field
    #[error("{0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidInput(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let bad = ProductError::InvalidInput("bad page".to_string()).into_response();
        let db = ProductError::Database("timeout".to_string()).into_response();
        let internal = ProductError::Internal("corrupt document".to_string()).into_response();

        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
