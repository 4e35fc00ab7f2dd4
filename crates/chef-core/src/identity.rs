//! # Token Verification Trait
//!
//! Seam for the external identity provider. The API layer hands the raw
//! bearer token to a verifier and receives the decoded identity back; how
//! the provider validates the token is its own business.

use crate::error::ServiceResult;
use async_trait::async_trait;
use std::sync::Arc;

/// The decoded identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned user id
    pub uid: String,
    /// Verified email, the key every self-only check compares against
    pub email: String,
}

/// Verifies bearer tokens against the external identity provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a raw bearer token (without the `Bearer ` prefix).
    ///
    /// Any failure — invalid token, provider rejection, transport error —
    /// leaves the request unauthenticated; callers map the error to 401.
    async fn verify_token(&self, token: &str) -> ServiceResult<Identity>;
}

/// Type alias for an injected verifier handle (dynamic dispatch)
pub type BoxedTokenVerifier = Arc<dyn TokenVerifier>;
