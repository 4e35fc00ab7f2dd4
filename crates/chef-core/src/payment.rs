//! # Payment Types
//!
//! A payment document records a completed gateway charge against an order.
//! Payments are written once and never mutated.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Document id (store-generated)
    #[serde(
        rename = "_id",
        default,
        with = "crate::oid",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ObjectId>,

    /// Paid order's document id, as a hex string
    pub order_id: String,

    /// Gateway transaction id
    pub transaction_id: String,

    /// Paying diner's email
    pub email: String,

    /// Charged amount in decimal currency
    pub amount: f64,

    /// When the payment was recorded
    pub paid_at: DateTime<Utc>,
}
