//! Extractors whose rejections use the JSON error envelope.
//!
//! axum's stock extractors answer malformed input with plain-text bodies and
//! a mix of 400/415/422. These wrappers turn every rejection into
//! [`ApiError::BadRequest`].

use axum::{
  extract::{FromRequest, FromRequestParts, Request},
  http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Query-string parameters.
pub struct Params<T>(pub T);

impl<T, S> FromRequestParts<S> for Params<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let axum::extract::Query(value) = axum::extract::Query::<T>::from_request_parts(parts, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Self(value))
  }
}

/// Path segments.
pub struct Segment<T>(pub T);

impl<T, S> FromRequestParts<S> for Segment<T>
where
  T: DeserializeOwned + Send,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Self(value))
  }
}

/// A JSON request body.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let axum::Json(value) = axum::Json::<T>::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Self(value))
  }
}
