use axum::{Json, extract::State};
use serde_json::{Value, json};
use tourclub_core::store::ClubStore;

use crate::{AppState, error::ApiError};

/// `GET /health`: `{"status": "ok"}` once the store answers a ping.
pub async fn handler<S: ClubStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError> {
  state.deadline().run(state.store.ping()).await.map_err(ApiError::store)?;
  Ok(Json(json!({ "status": "ok" })))
}
