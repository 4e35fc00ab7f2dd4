//! # API Error Mapping
//!
//! Wraps [`ServiceError`] so every handler can bail with `?` and still
//! produce a structured JSON error body with the right status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chef_core::ServiceError;
use serde::Serialize;
use tracing::error;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Handler-level error; converts into an HTTP response
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.status_code();
        if code >= 500 {
            error!("request failed: {}", self.0);
        }
        let status =
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: self.0.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ApiError(ServiceError::Forbidden).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = ApiError(ServiceError::InvalidId {
            value: "xyz".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError(ServiceError::NotFound { resource: "meal" }).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
