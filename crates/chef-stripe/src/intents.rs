//! # Stripe Payment Intents
//!
//! [`PaymentGateway`] implementation over Stripe's PaymentIntents API.
//! The service creates an intent server-side and hands the client secret to
//! the browser; confirmation and card handling stay on Stripe's side.

use async_trait::async_trait;
use chef_core::{PaymentGateway, PaymentIntent, ServiceError, ServiceResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::config::StripeConfig;

/// Every intent is created with these fixed constraints.
const CURRENCY: &str = "usd";
const PAYMENT_METHOD: &str = "card";

/// Stripe PaymentIntents gateway
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new gateway
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> ServiceResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self))]
    async fn create_payment_intent(&self, amount: i64) -> ServiceResult<PaymentIntent> {
        debug!("creating payment intent: amount={} {}", amount, CURRENCY);

        let form_params = [
            ("amount", amount.to_string()),
            ("currency", CURRENCY.to_string()),
            ("payment_method_types[]", PAYMENT_METHOD.to_string()),
        ];

        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(ServiceError::Provider {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(ServiceError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let intent: StripeIntentResponse = serde_json::from_str(&body).map_err(|e| {
            ServiceError::Serialization(format!("failed to parse Stripe response: {}", e))
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            ServiceError::Provider {
                provider: "stripe".to_string(),
                message: "intent response carried no client_secret".to_string(),
            }
        })?;

        info!("created payment intent: id={}", intent.id);

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount: intent.amount,
            currency: intent.currency,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeIntentResponse {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
