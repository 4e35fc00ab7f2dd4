//! # Application State
//!
//! Shared state for the Axum application. Every external collaborator —
//! document store, token verifier, payment gateway — is injected as a trait
//! object so tests can swap in doubles.

use chef_auth::FirebaseVerifier;
use chef_core::{BoxedPaymentGateway, BoxedStore, BoxedTokenVerifier};
use chef_store::MongoStore;
use chef_stripe::StripeGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Document store connection string
    pub mongodb_uri: String,
    /// Database name
    pub database: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: std::env::var("MONGODB_DB").unwrap_or_else(|_| "foodchefDB".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store handle
    pub store: BoxedStore,
    /// Identity provider verifier
    pub verifier: BoxedTokenVerifier,
    /// Payment gateway client
    pub gateway: BoxedPaymentGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Wire up the production collaborators: MongoDB store, Firebase
    /// verifier, Stripe gateway.
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let store = MongoStore::connect(&config.mongodb_uri, &config.database).await?;
        let verifier = FirebaseVerifier::from_env()?;
        let gateway = StripeGateway::from_env()?;

        Ok(Self::with_parts(
            Arc::new(store),
            Arc::new(verifier),
            Arc::new(gateway),
            config,
        ))
    }

    /// Assemble state from explicit collaborators (tests inject doubles here)
    pub fn with_parts(
        store: BoxedStore,
        verifier: BoxedTokenVerifier,
        gateway: BoxedPaymentGateway,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            verifier,
            gateway,
            config,
        }
    }
}
