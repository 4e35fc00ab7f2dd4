//! # Order Handlers
//!
//! Placement carries the one real business rule in the service: a repeat
//! request for the same (user, meal) pair while the first order is still
//! pending merges into it instead of creating a duplicate. The store makes
//! that a single atomic write.

use axum::extract::{Path, Query, State};
use axum::Json;
use chef_core::{Order, ServiceError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::handlers::{parse_object_id, require_positive, DeleteResponse, UpdateResponse};
use crate::state::AppState;

/// Order placement request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_email: String,
    pub meal_id: String,
    #[serde(default)]
    pub meal_name: Option<String>,
    #[serde(default)]
    pub chef_email: Option<String>,
    pub quantity: i64,
    /// Unit price for this request
    pub price: f64,
}

/// Order placement response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    /// True when the request was folded into an existing pending order
    pub merged: bool,
    pub order: Order,
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub email: Option<String>,
}

/// Order workflow update request
#[derive(Debug, Deserialize)]
pub struct SetOrderStatusRequest {
    pub status: String,
}

/// Place an order, merging with the caller's pending order for the same meal
#[instrument(
    skip(state, _user, request),
    fields(user = %request.user_email, meal = %request.meal_id, quantity = request.quantity)
)]
pub async fn place_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<PlaceOrderRequest>,
) -> ApiResult<Json<PlaceOrderResponse>> {
    if request.quantity < 1 {
        return Err(ServiceError::InvalidRequest("quantity must be at least 1".to_string()).into());
    }
    require_positive("price", request.price)?;

    let order = Order::pending(
        request.user_email,
        request.meal_id,
        request.meal_name,
        request.chef_email,
        request.quantity,
        request.price,
        Utc::now(),
    );

    let placement = state.store.place_order(order).await?;
    if placement.merged {
        info!("merged repeat order, quantity now {}", placement.order.quantity);
    } else {
        info!("order created");
    }

    Ok(Json(PlaceOrderResponse {
        merged: placement.merged,
        order: placement.order,
    }))
}

/// A diner's orders. Self-only; no email parameter yields an empty list.
pub async fn orders_by_user(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let Some(email) = query.email else {
        return Ok(Json(Vec::new()));
    };
    user.require_self(&email)?;

    Ok(Json(state.store.orders_by_user(&email).await?))
}

/// Orders routed to one chef (matches the legacy `chefId` field too)
pub async fn orders_by_chef(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.store.orders_by_chef(&email).await?))
}

/// Order detail by id
pub async fn get_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let id = parse_object_id(&id)?;
    let order = state
        .store
        .find_order(&id)
        .await?
        .ok_or(ServiceError::NotFound { resource: "order" })?;
    Ok(Json(order))
}

/// Cancel an order
pub async fn cancel_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_object_id(&id)?;
    let deleted_count = state.store.delete_order(&id).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}

/// Advance the free-form `orderStatus` workflow field. Any string is
/// accepted; there is no validated state machine.
pub async fn set_order_status(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<SetOrderStatusRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let id = parse_object_id(&id)?;
    let summary = state.store.set_order_status(&id, &request.status).await?;
    Ok(Json(summary.into()))
}
