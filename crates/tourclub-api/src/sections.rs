//! Sections and the groups they contain.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use tourclub_core::{
  org::{Group, Section},
  store::ClubStore,
};

use crate::{
  AppState, IdParam,
  error::ApiError,
  created,
  extract::{JsonBody, Params},
  list::{ListResponse, Paging},
  success,
};

#[derive(Debug, Deserialize)]
pub struct SectionBody {
  #[serde(default)]
  pub id:    i64,
  pub title: String,
}

/// `POST /sections/section`
pub async fn create<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<SectionBody>,
) -> Result<Json<Value>, ApiError> {
  let id = state.store.create_section(body.title).await.map_err(ApiError::store)?;
  tracing::info!(id, "section created");
  Ok(created(id))
}

/// `GET /sections/section?id=`
pub async fn get_one<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<IdParam>,
) -> Result<Json<Option<Section>>, ApiError> {
  Ok(Json(state.store.get_section(p.id).await.map_err(ApiError::store)?))
}

/// `PATCH /sections/section`
pub async fn update<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<SectionBody>,
) -> Result<Json<Value>, ApiError> {
  let section = Section { id: body.id, title: body.title };
  state.store.update_section(section).await.map_err(ApiError::store)?;
  Ok(success())
}

/// `DELETE /sections/section?id=`
///
/// Roles and groups of the section go with it.
pub async fn delete<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<IdParam>,
) -> Result<Json<Value>, ApiError> {
  state.store.delete_section(p.id).await.map_err(ApiError::store)?;
  Ok(success())
}

/// `GET /sections/list`
pub async fn list<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
) -> Result<Json<ListResponse<Section>>, ApiError> {
  let sections = state.store.list_sections().await.map_err(ApiError::store)?;
  Ok(Json(paging.apply("sections", sections)?))
}

/// `GET /sections/groups?id=`
pub async fn groups<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(p): Params<IdParam>,
) -> Result<Json<ListResponse<Group>>, ApiError> {
  let groups = state.store.section_groups(p.id).await.map_err(ApiError::store)?;
  Ok(Json(paging.apply("groups", groups)?))
}
