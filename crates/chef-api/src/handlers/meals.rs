//! # Meal Handlers
//!
//! Listings are public; creation and deletion require authentication.

use axum::extract::{Path, State};
use axum::Json;
use chef_core::{Meal, ServiceError, TOP_MEALS_LIMIT};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::handlers::{parse_object_id, require_positive, DeleteResponse, InsertedResponse};
use crate::state::AppState;

/// Create meal request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub name: String,
    pub price: f64,
    pub chef_email: String,
    #[serde(default)]
    pub chef_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Seedable order counter; defaults to zero for a fresh listing
    #[serde(default)]
    pub orders: i64,
}

/// List every meal (no pagination)
pub async fn list_meals(State(state): State<AppState>) -> ApiResult<Json<Vec<Meal>>> {
    Ok(Json(state.store.list_meals().await?))
}

/// The six most-ordered meals, descending
pub async fn top_meals(State(state): State<AppState>) -> ApiResult<Json<Vec<Meal>>> {
    Ok(Json(state.store.top_meals(TOP_MEALS_LIMIT).await?))
}

/// Meal detail by id
pub async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Meal>> {
    let id = parse_object_id(&id)?;
    let meal = state
        .store
        .find_meal(&id)
        .await?
        .ok_or(ServiceError::NotFound { resource: "meal" })?;
    Ok(Json(meal))
}

/// Create a meal listing
#[instrument(skip(state, user, request), fields(chef = %request.chef_email))]
pub async fn create_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateMealRequest>,
) -> ApiResult<Json<InsertedResponse>> {
    require_positive("price", request.price)?;

    let meal = Meal {
        id: None,
        name: request.name,
        price: request.price,
        chef_email: request.chef_email,
        chef_name: request.chef_name,
        image: request.image,
        description: request.description,
        category: request.category,
        orders: request.orders,
    };

    let id = state.store.insert_meal(meal).await?;
    info!("meal created by {}", user.email());
    Ok(Json(InsertedResponse::created(id)))
}

/// Meals belonging to one chef
pub async fn meals_by_chef(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Meal>>> {
    Ok(Json(state.store.meals_by_chef(&email).await?))
}

/// Delete a meal listing. Any authenticated caller may delete; the chef
/// identity is not checked against the meal's owner.
pub async fn delete_meal(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_object_id(&id)?;
    let deleted_count = state.store.delete_meal(&id).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}
