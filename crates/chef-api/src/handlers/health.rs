//! Liveness and health endpoints.

use axum::response::IntoResponse;
use axum::Json;

/// Root liveness string, unchanged from the original deployment.
pub async fn liveness() -> &'static str {
    "FoodChef Server is Sitting"
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "foodchef",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
