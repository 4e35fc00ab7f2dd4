//! # Order Types
//!
//! An order line for a single meal. Repeat requests for the same
//! (user, meal) pair while the first order is still pending are folded into
//! the existing document instead of creating a duplicate.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status stamped on every newly created order. Orders with this status are
/// the merge targets for repeat requests.
pub const ORDER_PENDING: &str = "pending";

/// Value written to `paymentStatus` when a payment is recorded.
pub const PAYMENT_PAID: &str = "paid";

/// A diner's order for one meal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Document id (store-generated)
    #[serde(
        rename = "_id",
        default,
        with = "crate::oid",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ObjectId>,

    /// Ordering diner's email
    pub user_email: String,

    /// Ordered meal's document id, as a hex string
    pub meal_id: String,

    /// Meal name (denormalized for display)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_name: Option<String>,

    /// Owning chef's email. Older documents stored this under `chefId`.
    #[serde(
        default,
        alias = "chefId",
        skip_serializing_if = "Option::is_none"
    )]
    pub chef_email: Option<String>,

    /// Accumulated quantity across merged requests
    pub quantity: i64,

    /// Accumulated per-request unit price (see `merge_repeat`)
    pub price: f64,

    /// Billed total
    pub total_price: f64,

    /// Creation status; `"pending"` orders are merge targets
    pub status: String,

    /// Free-form workflow state advanced by the chef (no state machine)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,

    /// Last creation or merge time
    pub order_time: DateTime<Utc>,

    /// Set to `"paid"` when a payment is recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,

    /// Gateway transaction id, set alongside `paymentStatus`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl Order {
    /// Stamp a fresh pending order from request fields.
    pub fn pending(
        user_email: impl Into<String>,
        meal_id: impl Into<String>,
        meal_name: Option<String>,
        chef_email: Option<String>,
        quantity: i64,
        price: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_email: user_email.into(),
            meal_id: meal_id.into(),
            meal_name,
            chef_email,
            quantity,
            price,
            total_price: price * quantity as f64,
            status: ORDER_PENDING.to_string(),
            order_status: None,
            order_time: now,
            payment_status: None,
            transaction_id: None,
        }
    }

    /// Fold a repeat request into this pending order.
    ///
    /// Quantity and per-request price accumulate, while the total is
    /// recomputed from the incoming unit price alone times the combined
    /// quantity — NOT a weighted sum of the previous totals. If the unit
    /// price changed between requests, `total_price` and `price` disagree;
    /// this matches the billing behavior the dashboards were built against.
    pub fn merge_repeat(&mut self, quantity: i64, unit_price: f64, now: DateTime<Utc>) {
        self.quantity += quantity;
        self.price += unit_price;
        self.total_price = unit_price * self.quantity as f64;
        self.order_time = now;
    }

    pub fn is_pending(&self) -> bool {
        self.status == ORDER_PENDING
    }
}
