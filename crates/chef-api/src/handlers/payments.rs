//! # Payment Handlers
//!
//! Intent creation forwards to the gateway and returns the client handle
//! verbatim; recording a payment also flips the referenced order to paid,
//! and the store keeps those two writes atomic.

use axum::extract::{Path, State};
use axum::Json;
use chef_core::Payment;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::handlers::require_positive;
use crate::state::AppState;

/// Payment intent request
#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    /// Price in decimal currency (converted to minor units)
    pub price: f64,
}

/// Payment intent response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Record payment request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub order_id: String,
    pub transaction_id: String,
    pub email: String,
    pub amount: f64,
}

/// Record payment response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentResponse {
    pub inserted_id: String,
    /// Whether the referenced order existed and was marked paid
    pub order_updated: bool,
}

/// Obtain a client-usable payment handle from the gateway
#[instrument(skip_all, fields(price = request.price))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<PaymentIntentRequest>,
) -> ApiResult<Json<PaymentIntentResponse>> {
    require_positive("price", request.price)?;

    // Decimal currency to integer minor units, truncating.
    let amount = (request.price * 100.0) as i64;

    let intent = state.gateway.create_payment_intent(amount).await?;
    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Record a completed charge and mark the order paid
#[instrument(skip(state, _user, request), fields(order = %request.order_id))]
pub async fn record_payment(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<RecordPaymentRequest>,
) -> ApiResult<Json<RecordPaymentResponse>> {
    require_positive("amount", request.amount)?;

    let payment = Payment {
        id: None,
        order_id: request.order_id,
        transaction_id: request.transaction_id,
        email: request.email,
        amount: request.amount,
        paid_at: Utc::now(),
    };

    let receipt = state.store.record_payment(payment).await?;
    info!("payment recorded, order_updated={}", receipt.order_updated);

    Ok(Json(RecordPaymentResponse {
        inserted_id: receipt.payment_id.to_hex(),
        order_updated: receipt.order_updated,
    }))
}

/// A diner's payment history. Self-only.
pub async fn payments_by_email(
    State(state): State<AppState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Payment>>> {
    user.require_self(&email)?;
    Ok(Json(state.store.payments_by_email(&email).await?))
}

/// Every recorded payment (administrative listing)
pub async fn list_payments(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<Payment>>> {
    Ok(Json(state.store.list_payments().await?))
}
