//! # Authentication Extractor
//!
//! Handlers on protected routes take an [`AuthUser`] parameter; the
//! extractor pulls the bearer token from the `Authorization` header and
//! delegates verification to the injected [`chef_core::TokenVerifier`].
//! Every failure mode — missing header, malformed scheme, provider
//! rejection, provider unreachable — leaves the request unauthenticated.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use chef_core::{Identity, ServiceError};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Verified identity of the calling user
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Self-only authorization: callers may only touch their own resources.
    pub fn require_self(&self, email: &str) -> Result<(), ApiError> {
        if self.0.email != email {
            return Err(ServiceError::Forbidden.into());
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ServiceError::Unauthenticated)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(ServiceError::Unauthenticated)?;

        let identity = state.verifier.verify_token(token).await.map_err(|err| {
            warn!("token verification failed: {}", err);
            ApiError::from(ServiceError::Unauthenticated)
        })?;

        Ok(AuthUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(email: &str) -> AuthUser {
        AuthUser(Identity {
            uid: "uid-1".into(),
            email: email.into(),
        })
    }

    #[test]
    fn test_require_self() {
        let user = auth_user("a@x.com");
        assert!(user.require_self("a@x.com").is_ok());
        assert!(user.require_self("b@x.com").is_err());
    }
}
