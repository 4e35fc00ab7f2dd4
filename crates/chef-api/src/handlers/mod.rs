//! # Request Handlers
//!
//! One module per resource, plus the shared response shapes that mirror the
//! driver results the frontend was built against (`insertedId`,
//! `matchedCount`/`modifiedCount`, `deletedCount`).

pub mod health;
pub mod meals;
pub mod orders;
pub mod payments;
pub mod users;

use bson::oid::ObjectId;
use chef_core::{ServiceError, UpdateSummary};
use serde::Serialize;

use crate::error::ApiError;

/// Insert acknowledgment. `insertedId` is null when the insert was skipped
/// (duplicate registration).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedResponse {
    pub inserted_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InsertedResponse {
    pub fn created(id: ObjectId) -> Self {
        Self {
            inserted_id: Some(id.to_hex()),
            message: None,
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            inserted_id: None,
            message: Some(message.into()),
        }
    }
}

/// Update acknowledgment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateSummary> for UpdateResponse {
    fn from(summary: UpdateSummary) -> Self {
        Self {
            matched_count: summary.matched,
            modified_count: summary.modified,
        }
    }
}

/// Delete acknowledgment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

/// Parse a path/body document id, rejecting malformed values with a 400.
pub(crate) fn parse_object_id(value: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(value).map_err(|_| {
        ServiceError::InvalidId {
            value: value.to_string(),
        }
        .into()
    })
}

/// Boundary validation for money-like fields.
pub(crate) fn require_positive(field: &str, value: f64) -> Result<(), ApiError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ServiceError::InvalidRequest(format!(
            "{} must be a positive number",
            field
        ))
        .into());
    }
    Ok(())
}
