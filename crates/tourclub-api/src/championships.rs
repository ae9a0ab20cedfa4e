//! Upcoming championships and their participants.

use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tourclub_core::{
  org::{Championship, NewChampionship},
  search::{self, ChampionshipQuery},
  store::ClubStore,
};

use crate::{
  AppState,
  error::ApiError,
  created,
  extract::{JsonBody, Params},
  list::{ListResponse, Paging},
  success,
};

#[derive(Debug, Deserialize)]
pub struct ChampionshipBody {
  pub title: String,
  /// `YYYY-MM-DD`
  pub date:  NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantParams {
  pub championship: i64,
  pub person:       i64,
}

/// `GET /championships/filter[?section=]`
pub async fn filter<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<ChampionshipQuery>,
) -> Result<Json<ListResponse<Championship>>, ApiError> {
  let found = search::championships(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(paging.apply("championships", found)?))
}

/// `POST /championships/championship`
pub async fn create<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<ChampionshipBody>,
) -> Result<Json<Value>, ApiError> {
  let championship = NewChampionship { title: body.title, date: body.date };
  let id = state
    .store
    .create_championship(championship)
    .await
    .map_err(ApiError::store)?;
  Ok(created(id))
}

/// `POST /championships/participants/add?championship=&person=`
pub async fn add_participant<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<ParticipantParams>,
) -> Result<Json<Value>, ApiError> {
  state
    .store
    .add_championship_participant(p.championship, p.person)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}
