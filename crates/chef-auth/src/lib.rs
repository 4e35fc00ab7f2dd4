//! # chef-auth
//!
//! Identity-provider integration for FoodChef.
//!
//! The API layer never inspects bearer tokens itself; it hands them to a
//! [`chef_core::TokenVerifier`], and this crate provides the production
//! implementation backed by Firebase Authentication's REST surface.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chef_auth::FirebaseVerifier;
//! use chef_core::TokenVerifier;
//!
//! let verifier = FirebaseVerifier::from_env()?;
//! let identity = verifier.verify_token(raw_token).await?;
//! println!("hello {}", identity.email);
//! ```

pub mod config;
pub mod firebase;

// Re-exports
pub use config::AuthConfig;
pub use firebase::FirebaseVerifier;
