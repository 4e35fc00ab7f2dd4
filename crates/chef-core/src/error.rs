//! # Service Error Types
//!
//! Typed error handling for the FoodChef backend.
//! All fallible operations return `Result<T, ServiceError>`.

use thiserror::Error;

/// Core error type shared by the store, the provider clients, and the API.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or unverifiable bearer token
    #[error("unauthorized access")]
    Unauthenticated,

    /// Authenticated, but the identity does not own the requested resource
    #[error("forbidden")]
    Forbidden,

    /// Document lookup came up empty
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Path or body carried a malformed document id
    #[error("invalid document id: {value}")]
    InvalidId { value: String },

    /// Request body failed boundary validation
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Document store failure
    #[error("store error: {0}")]
    Store(String),

    /// External provider API error
    #[error("provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with a provider
    #[error("network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ServiceError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Unauthenticated => 401,
            ServiceError::Forbidden => 403,
            ServiceError::NotFound { .. } => 404,
            ServiceError::InvalidId { .. } => 400,
            ServiceError::InvalidRequest(_) => 400,
            ServiceError::Configuration(_) => 500,
            ServiceError::Store(_) => 500,
            ServiceError::Provider { .. } => 502,
            ServiceError::Network(_) => 503,
            ServiceError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
