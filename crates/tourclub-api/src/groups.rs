//! Groups and group membership.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use tourclub_core::{
  org::{Group, NewGroup},
  person::Person,
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
pub struct GroupBody {
  #[serde(default)]
  pub id:           i64,
  pub group_number: i64,
  pub section:      i64,
}

#[derive(Debug, Deserialize)]
pub struct MemberParams {
  pub group:  i64,
  pub person: i64,
}

/// `POST /groups/group`
pub async fn create<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<GroupBody>,
) -> Result<Json<Value>, ApiError> {
  let group = NewGroup { group_number: body.group_number, section: body.section };
  let id = state.store.create_group(group).await.map_err(ApiError::store)?;
  Ok(created(id))
}

/// `GET /groups/group?id=`
pub async fn get_one<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<IdParam>,
) -> Result<Json<Option<Group>>, ApiError> {
  Ok(Json(state.store.get_group(p.id).await.map_err(ApiError::store)?))
}

/// `PATCH /groups/group`
pub async fn update<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<GroupBody>,
) -> Result<Json<Value>, ApiError> {
  let group = Group { id: body.id, group_number: body.group_number, section: body.section };
  state.store.update_group(group).await.map_err(ApiError::store)?;
  Ok(success())
}

/// `DELETE /groups/group?id=`
pub async fn delete<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<IdParam>,
) -> Result<Json<Value>, ApiError> {
  state.store.delete_group(p.id).await.map_err(ApiError::store)?;
  Ok(success())
}

/// `GET /groups/members?id=`
pub async fn members<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(p): Params<IdParam>,
) -> Result<Json<ListResponse<Person>>, ApiError> {
  let persons = state.store.persons_in_group(p.id).await.map_err(ApiError::store)?;
  Ok(Json(paging.apply("persons", persons)?))
}

/// `POST /groups/members/add?group=&person=`
pub async fn add_member<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<MemberParams>,
) -> Result<Json<Value>, ApiError> {
  state
    .store
    .add_group_member(p.group, p.person)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}

/// `POST /groups/members/remove?group=&person=`
pub async fn remove_member<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<MemberParams>,
) -> Result<Json<Value>, ApiError> {
  state
    .store
    .remove_group_member(p.group, p.person)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}

/// `GET /groups/list`
pub async fn list<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
) -> Result<Json<ListResponse<Group>>, ApiError> {
  let groups = state.store.list_groups().await.map_err(ApiError::store)?;
  Ok(Json(paging.apply("groups", groups)?))
}
