//! Handlers for `/user-roles` endpoints.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/user-roles`     | Optional `?email=` exact match |
//! | `GET`    | `/user-roles/:id` | 404 if absent or deleted |
//! | `POST`   | `/user-roles`     | Body: [`NewUserRole`]; returns 201 |
//! | `PUT`    | `/user-roles/:id` | Body: [`NewUserRole`] |
//! | `DELETE` | `/user-roles/:id` | Soft delete; 204 or 404 |
//!
//! Writes fail with 400 when `role_id` names a missing or deleted role.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use rolebook_core::{
  store::RoleStore,
  user_role::{NewUserRole, UserRole, UserRoleFilter},
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{AppJson, AppPath, AppQuery},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Exact-match filter. An empty value means no filter.
  pub email: Option<String>,
}

/// `GET /user-roles[?email=<address>]`
pub async fn list<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Vec<UserRole>>, ApiError> {
  let filter = UserRoleFilter {
    email: params.email.filter(|e| !e.is_empty()),
  };
  let email = filter.email.clone();

  let user_roles = store
    .list_user_roles(filter)
    .await
    .map_err(ApiError::from_store)?;
  tracing::debug!(?email, count = user_roles.len(), "listed user roles");
  Ok(Json(user_roles))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /user-roles/:id`
pub async fn get_one<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<i64>,
) -> Result<Json<UserRole>, ApiError> {
  let user_role = store
    .get_user_role(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("user role {id} not found")))?;
  Ok(Json(user_role))
}

// ─── Writes ───────────────────────────────────────────────────────────────────

/// `POST /user-roles` — returns 201 + the stored [`UserRole`].
pub async fn create<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppJson(body): AppJson<NewUserRole>,
) -> Result<impl IntoResponse, ApiError> {
  let user_role = store
    .create_user_role(body)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id = user_role.id, role_id = user_role.role_id, "created user role");
  Ok((StatusCode::CREATED, Json(user_role)))
}

/// `PUT /user-roles/:id`
pub async fn update<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<i64>,
  AppJson(body): AppJson<NewUserRole>,
) -> Result<Json<UserRole>, ApiError> {
  let user_role = store
    .update_user_role(id, body)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id, role_id = user_role.role_id, "updated user role");
  Ok(Json(user_role))
}

/// `DELETE /user-roles/:id`
pub async fn delete<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<i64>,
) -> Result<StatusCode, ApiError> {
  store
    .delete_user_role(id)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id, "soft-deleted user role");
  Ok(StatusCode::NO_CONTENT)
}
