//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every handler funnels its failures through [`ApiError`], so the same
//! failure yields the same status regardless of which entity it concerns.

use axum::{
  Json,
  extract::rejection::{BytesRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rolebook_core::{Error as DomainError, store::StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("method not allowed")]
  MethodNotAllowed,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store failure.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    let Some(domain) = e.as_domain() else {
      return ApiError::Store(Box::new(e));
    };
    let message = domain.to_string();
    match domain {
      DomainError::RoleNotFound(_) | DomainError::UserRoleNotFound(_) => {
        ApiError::NotFound(message)
      }
      DomainError::RoleUnavailable(_) | DomainError::Invalid { .. } => {
        ApiError::BadRequest(message)
      }
      DomainError::DuplicateRoleKey(_) => ApiError::Conflict(message),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<BytesRejection> for ApiError {
  fn from(rejection: BytesRejection) -> Self {
    ApiError::BadRequest(format!("invalid request body: {}", rejection.body_text()))
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    tracing::debug!(error = %rejection.body_text(), "rejected path parameter");
    ApiError::BadRequest("invalid id".to_string())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::BadRequest(format!("invalid query string: {}", rejection.body_text()))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) | ApiError::Conflict(m) => m,
      ApiError::MethodNotAllowed => "method not allowed".to_string(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        "database error".to_string()
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Error)]
  #[error("disk on fire")]
  struct Broken;

  impl StoreError for Broken {
    fn as_domain(&self) -> Option<&DomainError> { None }
  }

  #[test]
  fn domain_errors_classify_uniformly() {
    let cases = [
      (DomainError::RoleNotFound(1), StatusCode::NOT_FOUND),
      (DomainError::UserRoleNotFound(1), StatusCode::NOT_FOUND),
      (DomainError::RoleUnavailable(1), StatusCode::BAD_REQUEST),
      (
        DomainError::Invalid { field: "email", reason: "must not be blank" },
        StatusCode::BAD_REQUEST,
      ),
      (DomainError::DuplicateRoleKey("admin".into()), StatusCode::CONFLICT),
    ];
    for (err, expected) in cases {
      assert_eq!(ApiError::from_store(err).status(), expected);
    }
  }

  #[test]
  fn infrastructure_errors_are_internal() {
    let err = ApiError::from_store(Broken);
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
