//! Extractor wrappers whose rejections are reported as [`ApiError`]s.
//!
//! axum's own `Json`, `Path` and `Query` extractors answer bad input with
//! plain-text 415/422 responses; these wrappers turn every such rejection into
//! a JSON `400 Bad Request`.

use axum::{
  body::Bytes,
  extract::{FromRequest, FromRequestParts, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body.
///
/// The body is decoded whatever `Content-Type` the client sent; only a body
/// that is not valid JSON for `T` is rejected.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let bytes = Bytes::from_request(req, state).await?;
    serde_json::from_slice(&bytes)
      .map(AppJson)
      .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))
  }
}

/// Path parameters, e.g. the integer `{id}` segment.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Query-string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
