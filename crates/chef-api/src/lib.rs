//! # chef-api
//!
//! HTTP API layer for the FoodChef marketplace.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for meals, users, orders, and payments
//! - Bearer-token authentication via the injected token verifier
//!
//! The full route table lives in [`routes::create_router`].

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
