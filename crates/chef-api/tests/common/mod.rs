//! Shared wiring for the API integration tests: the router over the
//! in-memory store with stub identity and gateway collaborators.

use async_trait::async_trait;
use axum_test::TestServer;
use chef_api::routes::create_router;
use chef_api::state::{AppConfig, AppState};
use chef_core::{
    Identity, PaymentGateway, PaymentIntent, ServiceError, ServiceResult, TokenVerifier,
};
use chef_store::MemoryStore;
use std::sync::Arc;

/// Verifier double. Tokens look like `token-<email>`; anything else is
/// rejected the way the real provider would reject a bad ID token.
pub struct StubVerifier;

#[async_trait]
impl TokenVerifier for StubVerifier {
    async fn verify_token(&self, token: &str) -> ServiceResult<Identity> {
        match token.strip_prefix("token-") {
            Some(email) if !email.is_empty() => Ok(Identity {
                uid: format!("uid-{email}"),
                email: email.to_string(),
            }),
            _ => Err(ServiceError::Unauthenticated),
        }
    }
}

/// Gateway double: echoes the amount back in a deterministic client secret.
pub struct StubGateway;

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_payment_intent(&self, amount: i64) -> ServiceResult<PaymentIntent> {
        Ok(PaymentIntent {
            id: "pi_test".to_string(),
            client_secret: format!("pi_test_secret_{amount}"),
            amount,
            currency: "usd".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        database: "foodchefTest".to_string(),
    }
}

/// A test server over a fresh, empty store.
pub fn test_server() -> TestServer {
    let state = AppState::with_parts(
        Arc::new(MemoryStore::new()),
        Arc::new(StubVerifier),
        Arc::new(StubGateway),
        test_config(),
    );
    TestServer::new(create_router(state)).expect("router should build")
}

/// Bearer token the stub verifier accepts for `email`.
pub fn token_for(email: &str) -> String {
    format!("token-{email}")
}
