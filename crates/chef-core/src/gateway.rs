//! # Payment Gateway Trait
//!
//! Seam for the external payment gateway. The service only ever asks the
//! gateway for a client-usable payment handle; completed charges come back
//! through `POST /payments` from the client.

use crate::error::ServiceResult;
use async_trait::async_trait;
use std::sync::Arc;

/// A gateway-issued payment handle for client-side confirmation.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Gateway intent id
    pub id: String,
    /// Secret the browser uses to confirm the payment
    pub client_secret: String,
    /// Amount in minor currency units
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
}

/// Creates payment handles with the external gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for `amount` minor currency units.
    async fn create_payment_intent(&self, amount: i64) -> ServiceResult<PaymentIntent>;

    /// Gateway name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for an injected gateway handle (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
