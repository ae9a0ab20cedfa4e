//! Workouts, their sessions, and trainer strain.

use axum::{Json, extract::State};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tourclub_core::{
  search::{self, StrainQuery},
  store::ClubStore,
  tour::{NewSession, NewWorkout, Strain},
};

use crate::{
  AppState,
  error::ApiError,
  created,
  extract::{JsonBody, Params},
  list::{ListResponse, Paging},
};

#[derive(Debug, Deserialize)]
pub struct WorkoutBody {
  pub trainer:      i64,
  #[serde(rename = "type")]
  pub workout_type: String,
  #[serde(default)]
  pub groups:       Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SessionBody {
  pub workout:     i64,
  pub date:        NaiveDate,
  /// `HH:MM:SS`
  pub start_time:  NaiveTime,
  pub finish_time: NaiveTime,
}

/// One row of the strain report.
#[derive(Debug, Serialize)]
pub struct StrainEntry {
  #[serde(rename = "type")]
  pub workout_type: String,
  /// `HH:MM`
  pub duration:     String,
}

impl From<Strain> for StrainEntry {
  fn from(s: Strain) -> Self {
    let duration = s.duration_hhmm();
    Self { workout_type: s.workout_type, duration }
  }
}

/// `POST /workouts/workout`
pub async fn create<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<WorkoutBody>,
) -> Result<Json<Value>, ApiError> {
  let workout = NewWorkout {
    trainer:      body.trainer,
    workout_type: body.workout_type,
    groups:       body.groups,
  };
  let id = state.store.create_workout(workout).await.map_err(ApiError::store)?;
  Ok(created(id))
}

/// `POST /workouts/session`
pub async fn add_session<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<SessionBody>,
) -> Result<Json<Value>, ApiError> {
  if body.finish_time < body.start_time {
    return Err(ApiError::BadRequest("finish_time precedes start_time".into()));
  }
  let session = NewSession {
    workout:     body.workout,
    date:        body.date,
    start_time:  body.start_time,
    finish_time: body.finish_time,
  };
  let id = state.store.add_session(session).await.map_err(ApiError::store)?;
  Ok(created(id))
}

/// `GET /workouts/strain?trainer=[&from_date=&to_date=]`
pub async fn strain<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<StrainQuery>,
) -> Result<Json<ListResponse<StrainEntry>>, ApiError> {
  let found = search::strain(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(paging.apply("strainList", found)?.map(StrainEntry::from)))
}
