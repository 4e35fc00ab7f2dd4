//! # Meal Types
//!
//! A meal is a chef's listing. Once created it is never updated, only
//! deleted; the `orders` counter feeds the top-meals ranking.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Number of meals returned by the top-meals listing.
pub const TOP_MEALS_LIMIT: i64 = 6;

/// A meal offered by a chef.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Document id (store-generated)
    #[serde(
        rename = "_id",
        default,
        with = "crate::oid",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ObjectId>,

    /// Display name
    pub name: String,

    /// Unit price in decimal currency
    pub price: f64,

    /// Owning chef's email
    pub chef_email: String,

    /// Owning chef's display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chef_name: Option<String>,

    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// How many times this meal has been ordered; drives the top listing
    #[serde(default)]
    pub orders: i64,
}
