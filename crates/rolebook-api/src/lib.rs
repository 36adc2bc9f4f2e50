//! JSON REST API for rolebook.
//!
//! Exposes an axum [`Router`] backed by any [`rolebook_core::store::RoleStore`].
//! Transport concerns (binding, request tracing) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = rolebook_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod extract;
pub mod roles;
pub mod user_roles;

use std::sync::Arc;

use axum::{
  Router,
  http::{HeaderValue, header},
  routing::get,
};
use rolebook_core::store::RoleStore;
use tower_http::set_header::SetResponseHeaderLayer;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// Every response, errors and `204 No Content` included, carries
/// `Content-Type: application/json`. Unknown paths and unsupported methods
/// answer with [`ApiError`] bodies like every other failure.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RoleStore + 'static,
{
  Router::new()
    // Roles
    .route("/roles", get(roles::list::<S>).post(roles::create::<S>))
    .route(
      "/roles/{id}",
      get(roles::get_one::<S>)
        .put(roles::update::<S>)
        .delete(roles::delete::<S>),
    )
    // User roles
    .route(
      "/user-roles",
      get(user_roles::list::<S>).post(user_roles::create::<S>),
    )
    .route(
      "/user-roles/{id}",
      get(user_roles::get_one::<S>)
        .put(user_roles::update::<S>)
        .delete(user_roles::delete::<S>),
    )
    .method_not_allowed_fallback(method_not_allowed)
    .fallback(unknown_route)
    .with_state(store)
    .layer(SetResponseHeaderLayer::overriding(
      header::CONTENT_TYPE,
      HeaderValue::from_static("application/json"),
    ))
}

async fn unknown_route() -> ApiError { ApiError::NotFound("no such route".to_string()) }

async fn method_not_allowed() -> ApiError { ApiError::MethodNotAllowed }

#[cfg(test)]
mod tests;
