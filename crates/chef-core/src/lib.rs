//! # chef-core
//!
//! Core types and traits for the FoodChef marketplace backend.
//!
//! This crate provides:
//! - Domain entities: [`User`], [`Meal`], [`Order`], [`Payment`]
//! - The three seams the API layer is wired through: [`Store`],
//!   [`TokenVerifier`], [`PaymentGateway`]
//! - [`ServiceError`] for typed error handling with HTTP status mapping
//!
//! ## Example
//!
//! ```rust,ignore
//! use chef_core::{Order, Store};
//!
//! // Stamp a pending order and place it; repeats for the same
//! // (user, meal) pair merge instead of duplicating.
//! let order = Order::pending("a@x.com", meal_id, None, None, 2, 5.0, Utc::now());
//! let placement = store.place_order(order).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod identity;
pub mod meal;
pub mod oid;
pub mod order;
pub mod payment;
pub mod store;
pub mod user;

// Re-exports for convenience
pub use error::{ServiceError, ServiceResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway, PaymentIntent};
pub use identity::{BoxedTokenVerifier, Identity, TokenVerifier};
pub use meal::{Meal, TOP_MEALS_LIMIT};
pub use order::{Order, ORDER_PENDING, PAYMENT_PAID};
pub use payment::Payment;
pub use store::{
    BoxedStore, OrderPlacement, PaymentReceipt, Store, UpdateSummary,
};
pub use user::{Role, User};
