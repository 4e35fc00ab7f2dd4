//! # chef-stripe
//!
//! Stripe payment gateway client for FoodChef.
//!
//! The marketplace only needs one gateway operation: turn a price into a
//! client-usable payment handle. Completed charges are reported back by the
//! client through the API's `POST /payments` route, so there is no webhook
//! surface here.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chef_stripe::StripeGateway;
//! use chef_core::PaymentGateway;
//!
//! let gateway = StripeGateway::from_env()?;
//! let intent = gateway.create_payment_intent(1500).await?;
//! // Hand intent.client_secret to the browser
//! ```

pub mod config;
pub mod intents;

// Re-exports
pub use config::StripeConfig;
pub use intents::StripeGateway;
