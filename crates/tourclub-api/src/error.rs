//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tourclub_core::{ErrorKind, StoreError};

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Malformed parameters or body.
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("timed out: {0}")]
  Timeout(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store failure by its [`ErrorKind`].
  pub fn store<E: StoreError>(e: E) -> Self {
    match e.kind() {
      ErrorKind::Parameter => Self::BadRequest(e.to_string()),
      ErrorKind::Timeout => Self::Timeout(e.to_string()),
      ErrorKind::Store => Self::Store(Box::new(e)),
    }
  }
}

impl From<tourclub_core::Error> for ApiError {
  fn from(e: tourclub_core::Error) -> Self {
    match e.kind() {
      ErrorKind::Timeout => Self::Timeout(e.to_string()),
      _ => Self::BadRequest(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Timeout(m) => (StatusCode::GATEWAY_TIMEOUT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
