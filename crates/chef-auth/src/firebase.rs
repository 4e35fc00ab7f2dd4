//! # Firebase Token Verification
//!
//! [`TokenVerifier`] implementation that delegates to the identity
//! provider's `accounts:lookup` endpoint: the raw ID token goes out, the
//! decoded account comes back. Token internals (signatures, expiry) stay the
//! provider's concern.

use async_trait::async_trait;
use chef_core::{Identity, ServiceError, ServiceResult, TokenVerifier};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AuthConfig;

/// Firebase-backed token verifier
pub struct FirebaseVerifier {
    config: AuthConfig,
    client: Client,
}

impl FirebaseVerifier {
    /// Create a new verifier
    pub fn new(config: AuthConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> ServiceResult<Self> {
        let config = AuthConfig::from_env()?;
        Ok(Self::new(config))
    }
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify_token(&self, token: &str) -> ServiceResult<Identity> {
        let url = format!("{}/v1/accounts:lookup", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&LookupRequest { id_token: token })
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !status.is_success() {
            // The provider answers 400 for expired, malformed, or revoked
            // tokens; all of them mean the caller is not authenticated.
            warn!("token verification rejected: status={}", status);
            return Err(ServiceError::Unauthenticated);
        }

        let lookup: LookupResponse = serde_json::from_str(&body).map_err(|e| {
            ServiceError::Serialization(format!("failed to parse lookup response: {}", e))
        })?;

        let user = lookup
            .users
            .into_iter()
            .next()
            .ok_or(ServiceError::Unauthenticated)?;
        let email = user.email.ok_or(ServiceError::Unauthenticated)?;

        debug!("verified token for {}", email);

        Ok(Identity {
            uid: user.local_id,
            email,
        })
    }
}

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    #[serde(rename = "idToken")]
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}
