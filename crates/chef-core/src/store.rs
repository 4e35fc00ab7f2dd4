//! # Document Store Trait
//!
//! Seam between the HTTP layer and persistence. The production
//! implementation talks to MongoDB; tests inject an in-memory double.
//! Handlers receive the store as an `Arc<dyn Store>` through application
//! state rather than reaching for a process-wide handle.

use crate::error::ServiceResult;
use crate::meal::Meal;
use crate::order::Order;
use crate::payment::Payment;
use crate::user::{Role, User};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;

/// Matched/modified counts from an update, mirroring the driver's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    pub matched: u64,
    pub modified: u64,
}

/// Outcome of placing an order: either a fresh document or a merge into the
/// existing pending one.
#[derive(Debug, Clone)]
pub struct OrderPlacement {
    /// True when the request was folded into an existing pending order
    pub merged: bool,
    /// The stored document after the write
    pub order: Order,
}

/// Outcome of recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// Id of the inserted payment document
    pub payment_id: ObjectId,
    /// Whether the referenced order existed and was marked paid
    pub order_updated: bool,
}

/// Persistence operations used by the API, one per route-level store call.
#[async_trait]
pub trait Store: Send + Sync {
    // --- users ---

    /// Insert a user unless one with the same email exists.
    /// Returns `None` on duplicate registration (idempotent no-op).
    async fn create_user(&self, user: User) -> ServiceResult<Option<ObjectId>>;

    async fn list_users(&self) -> ServiceResult<Vec<User>>;

    async fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<User>>;

    /// Overwrite the `role` field on a user document.
    async fn set_user_role(&self, id: &ObjectId, role: Role) -> ServiceResult<UpdateSummary>;

    // --- meals ---

    async fn insert_meal(&self, meal: Meal) -> ServiceResult<ObjectId>;

    async fn list_meals(&self) -> ServiceResult<Vec<Meal>>;

    async fn find_meal(&self, id: &ObjectId) -> ServiceResult<Option<Meal>>;

    /// Meals with the highest `orders` counters, descending.
    async fn top_meals(&self, limit: i64) -> ServiceResult<Vec<Meal>>;

    async fn meals_by_chef(&self, email: &str) -> ServiceResult<Vec<Meal>>;

    /// Returns the deleted-document count (0 or 1).
    async fn delete_meal(&self, id: &ObjectId) -> ServiceResult<u64>;

    // --- orders ---

    /// Insert `order`, or fold it into the existing pending order for the
    /// same `(userEmail, mealId)` pair. Implementations must make this a
    /// single atomic step so concurrent placements cannot produce duplicate
    /// pending documents or lost merges.
    async fn place_order(&self, order: Order) -> ServiceResult<OrderPlacement>;

    async fn orders_by_user(&self, email: &str) -> ServiceResult<Vec<Order>>;

    /// Orders belonging to a chef, matching the legacy `chefId` field as
    /// well as `chefEmail`.
    async fn orders_by_chef(&self, email: &str) -> ServiceResult<Vec<Order>>;

    async fn find_order(&self, id: &ObjectId) -> ServiceResult<Option<Order>>;

    /// Cancel an order. Returns the deleted-document count (0 or 1).
    async fn delete_order(&self, id: &ObjectId) -> ServiceResult<u64>;

    /// Overwrite the free-form `orderStatus` workflow field.
    async fn set_order_status(&self, id: &ObjectId, status: &str) -> ServiceResult<UpdateSummary>;

    // --- payments ---

    /// Insert the payment and mark the referenced order paid in one atomic
    /// step. A payment against an unknown order is still recorded, with
    /// `order_updated` false.
    async fn record_payment(&self, payment: Payment) -> ServiceResult<PaymentReceipt>;

    async fn payments_by_email(&self, email: &str) -> ServiceResult<Vec<Payment>>;

    async fn list_payments(&self) -> ServiceResult<Vec<Payment>>;
}

/// Type alias for an injected store handle (dynamic dispatch)
pub type BoxedStore = Arc<dyn Store>;
