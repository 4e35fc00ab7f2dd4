//! # User Handlers
//!
//! Registration is public and idempotent; everything else requires a
//! verified identity, and the role-check routes are self-only.

use axum::extract::{Path, State};
use axum::Json;
use chef_core::{Role, User};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::handlers::{parse_object_id, InsertedResponse, UpdateResponse};
use crate::state::AppState;

/// Registration request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Role update request
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct AdminCheckResponse {
    pub admin: bool,
}

#[derive(Debug, Serialize)]
pub struct ChefCheckResponse {
    pub chef: bool,
}

/// Save a user on registration. Registering an email that already exists is
/// a no-op acknowledged with a null insert id.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<InsertedResponse>> {
    let mut user = User::new(request.email);
    user.name = request.name;
    user.photo_url = request.photo_url;

    match state.store.create_user(user).await? {
        Some(id) => {
            info!("user registered");
            Ok(Json(InsertedResponse::created(id)))
        }
        None => Ok(Json(InsertedResponse::skipped("User already exists"))),
    }
}

/// List every user
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.store.list_users().await?))
}

/// Overwrite a user's role
pub async fn set_user_role(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<SetRoleRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let id = parse_object_id(&id)?;
    let summary = state.store.set_user_role(&id, request.role).await?;
    info!("role set to {:?} on user {}", request.role, id);
    Ok(Json(summary.into()))
}

/// Is this email an admin? Self-lookup only.
pub async fn check_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<AdminCheckResponse>> {
    user.require_self(&email)?;

    let admin = state
        .store
        .find_user_by_email(&email)
        .await?
        .map(|u| u.is_admin())
        .unwrap_or(false);
    Ok(Json(AdminCheckResponse { admin }))
}

/// Is this email a chef? Self-lookup only.
pub async fn check_chef(
    State(state): State<AppState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<ChefCheckResponse>> {
    user.require_self(&email)?;

    let chef = state
        .store
        .find_user_by_email(&email)
        .await?
        .map(|u| u.is_chef())
        .unwrap_or(false);
    Ok(Json(ChefCheckResponse { chef }))
}
