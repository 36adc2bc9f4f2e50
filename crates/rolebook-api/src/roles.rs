//! Handlers for `/roles` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/roles`      | Active roles in insertion order |
//! | `GET`    | `/roles/:id`  | 404 if absent or deleted |
//! | `POST`   | `/roles`      | Body: [`NewRole`]; returns 200 + stored role |
//! | `PUT`    | `/roles/:id`  | Body: [`NewRole`]; returns the updated role |
//! | `DELETE` | `/roles/:id`  | Soft delete; 204, or 404 if already gone |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use rolebook_core::{
  role::{NewRole, Role},
  store::RoleStore,
};

use crate::{
  error::ApiError,
  extract::{AppJson, AppPath},
};

/// `GET /roles`
pub async fn list<S: RoleStore>(State(store): State<Arc<S>>) -> Result<Json<Vec<Role>>, ApiError> {
  let roles = store.list_roles().await.map_err(ApiError::from_store)?;
  tracing::debug!(count = roles.len(), "listed roles");
  Ok(Json(roles))
}

/// `GET /roles/:id`
pub async fn get_one<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<i64>,
) -> Result<Json<Role>, ApiError> {
  let role = store
    .get_role(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("role {id} not found")))?;
  Ok(Json(role))
}

/// `POST /roles` — returns 200 + the stored [`Role`].
pub async fn create<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppJson(body): AppJson<NewRole>,
) -> Result<Json<Role>, ApiError> {
  let role = store.create_role(body).await.map_err(ApiError::from_store)?;
  tracing::info!(id = role.id, role_key = %role.role_key, "created role");
  Ok(Json(role))
}

/// `PUT /roles/:id`
pub async fn update<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<i64>,
  AppJson(body): AppJson<NewRole>,
) -> Result<Json<Role>, ApiError> {
  let role = store
    .update_role(id, body)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id, role_key = %role.role_key, "updated role");
  Ok(Json(role))
}

/// `DELETE /roles/:id`
pub async fn delete<S: RoleStore>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<i64>,
) -> Result<StatusCode, ApiError> {
  store.delete_role(id).await.map_err(ApiError::from_store)?;
  tracing::info!(id, "soft-deleted role");
  Ok(StatusCode::NO_CONTENT)
}
