//! Tours, and the tourist and instructor searches that read them.

use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tourclub_core::{
  person::Person,
  search::{self, InstructorQuery, MembershipQuery, TourTouristQuery},
  store::ClubStore,
  tour::NewTour,
};

use crate::{
  AppState,
  error::ApiError,
  created,
  extract::{JsonBody, Params},
  list::{ListResponse, Paging},
  success,
};

type Persons = Result<Json<ListResponse<Person>>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct TourBody {
  pub route:         i64,
  pub instructor:    i64,
  #[serde(default)]
  pub group:         Option<i64>,
  pub start:         NaiveDate,
  pub duration_days: i64,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantParams {
  pub tour:   i64,
  pub person: i64,
}

#[derive(Debug, Deserialize)]
pub struct CompletedBody {
  pub routes: Vec<i64>,
}

fn persons(paging: Paging, found: Vec<Person>) -> Persons {
  Ok(Json(paging.apply("persons", found)?))
}

// ─── Searches ────────────────────────────────────────────────────────────────

/// `GET /instructors/filter`
pub async fn instructors<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<InstructorQuery>,
) -> Persons {
  let found = search::instructors(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  persons(paging, found)
}

/// `GET /tourists/tour-filter`
pub async fn tourists<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<TourTouristQuery>,
) -> Persons {
  let found = search::tourists_by_tour(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  persons(paging, found)
}

/// `GET /tourists/trainer-instructor[?section=&group=]`
pub async fn trainer_instructor<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<MembershipQuery>,
) -> Persons {
  let found =
    search::tourists_with_trainer_instructor(state.store.as_ref(), &q, state.deadline())
      .await
      .map_err(ApiError::store)?;
  persons(paging, found)
}

/// `GET /tourists/completed-all[?section=&group=]`
pub async fn completed_all<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<MembershipQuery>,
) -> Persons {
  let found = search::tourists_completed_all(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  persons(paging, found)
}

/// `POST /tourists/completed[?section=&group=]` with body `{routes: [..]}`.
pub async fn completed_routes<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<MembershipQuery>,
  JsonBody(body): JsonBody<CompletedBody>,
) -> Persons {
  let found =
    search::tourists_completed_routes(state.store.as_ref(), &q, &body.routes, state.deadline())
      .await
      .map_err(ApiError::store)?;
  persons(paging, found)
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// `POST /tours/tour`
pub async fn create<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<TourBody>,
) -> Result<Json<Value>, ApiError> {
  if body.duration_days <= 0 {
    return Err(ApiError::BadRequest("duration_days must be positive".into()));
  }
  let tour = NewTour {
    route:         body.route,
    instructor:    body.instructor,
    group:         body.group,
    start:         body.start,
    duration_days: body.duration_days,
  };
  let id = state.store.create_tour(tour).await.map_err(ApiError::store)?;
  Ok(created(id))
}

/// `POST /tours/participants/add?tour=&person=`
pub async fn add_participant<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<ParticipantParams>,
) -> Result<Json<Value>, ApiError> {
  state
    .store
    .add_tour_participant(p.tour, p.person)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}
