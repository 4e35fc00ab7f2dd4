//! # User Types
//!
//! Marketplace accounts. A user document is created once on first
//! registration and only its `role` field is ever mutated afterwards.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Marketplace role, stored on the user document.
///
/// Legacy documents may carry arbitrary role strings; anything that is not
/// `admin` or `chef` reads back as [`Role::Unset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Chef,
    #[serde(other)]
    Unset,
}

impl Default for Role {
    fn default() -> Self {
        Role::Unset
    }
}

/// A registered account (diner, chef, or administrator).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document id (store-generated)
    #[serde(
        rename = "_id",
        default,
        with = "crate::oid",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ObjectId>,

    /// Natural key; duplicate registrations are a no-op
    pub email: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Marketplace role, absent until an admin grants one
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Create an unsaved user with no role.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            name: None,
            photo_url: None,
            role: Role::Unset,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_chef(&self) -> bool {
        self.role == Role::Chef
    }
}
