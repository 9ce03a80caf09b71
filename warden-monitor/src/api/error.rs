//! API Error Handling
//!
//! Error type and conversion for API responses. Errors are returned as
//! plain text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::ReportStoreError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    StorageError(ReportStoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::StorageError(err) => {
                tracing::error!("Storage error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

impl From<ReportStoreError> for ApiError {
    fn from(err: ReportStoreError) -> Self {
        ApiError::StorageError(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
