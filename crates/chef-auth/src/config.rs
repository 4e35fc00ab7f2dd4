//! # Identity Provider Configuration
//!
//! The verifier needs one secret: the identity provider's web API key. It
//! loads from the environment, or from a file for deployments that mount
//! secrets on disk.

use chef_core::ServiceError;
use std::env;
use std::fs;

/// Default identity provider endpoint (Google Identity Toolkit, which backs
/// Firebase Authentication).
const DEFAULT_API_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Identity provider configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Web API key passed as the `key` query parameter
    pub api_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `FIREBASE_API_KEY`, falling back to the contents of the file
    /// named by `FIREBASE_API_KEY_FILE`. `FIREBASE_API_URL` overrides the
    /// provider endpoint.
    pub fn from_env() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = match env::var("FIREBASE_API_KEY") {
            Ok(key) => key,
            Err(_) => read_key_file()?,
        };

        if api_key.is_empty() {
            return Err(ServiceError::Configuration(
                "FIREBASE_API_KEY is empty".to_string(),
            ));
        }

        let api_base_url =
            env::var("FIREBASE_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            api_key,
            api_base_url,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

fn read_key_file() -> Result<String, ServiceError> {
    let path = env::var("FIREBASE_API_KEY_FILE").map_err(|_| {
        ServiceError::Configuration(
            "neither FIREBASE_API_KEY nor FIREBASE_API_KEY_FILE is set".to_string(),
        )
    })?;

    fs::read_to_string(&path)
        .map(|key| key.trim().to_string())
        .map_err(|e| {
            ServiceError::Configuration(format!("failed to read {}: {}", path, e))
        })
}
