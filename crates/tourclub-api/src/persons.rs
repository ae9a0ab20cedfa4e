//! Handlers for persons, their roles, and the person searches.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/persons/create` | Body: `{name, surname, patronymic}` |
//! | `GET` `PATCH` `DELETE` | `/persons/person` | `?id=` or a full person body |
//! | `GET` `POST` `DELETE` | `/persons/roles` | `?person=&section=[&role=]` |
//! | `GET`  | `/roles/list` | |
//! | `GET`  | `/tourists/filter` | `section, group, sex, birth_year, age` |
//! | `GET`  | `/trainers/filter` | `section, sex, age, salary, specialization` |
//! | `GET`  | `/trainers/workouts` | `group, from_date, to_date` |
//! | `GET`  | `/managers/filter` | `salary, birth_year, age, begin_year, sex` |

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tourclub_core::{
  person::{NewPerson, Person, Role},
  search::{self, ManagerQuery, TouristQuery, TrainerQuery, TrainerWorkoutQuery},
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

type Persons = Result<Json<ListResponse<Person>>, ApiError>;

// ─── CRUD ────────────────────────────────────────────────────────────────────

/// `POST /persons/create`
pub async fn create<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<NewPerson>,
) -> Result<Json<Value>, ApiError> {
  let id = state.store.create_person(body).await.map_err(ApiError::store)?;
  tracing::info!(id, "person created");
  Ok(created(id))
}

/// `GET /persons/person?id=`; `null` when there is no such person.
pub async fn get_one<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<IdParam>,
) -> Result<Json<Option<Person>>, ApiError> {
  let person = state.store.get_person(p.id).await.map_err(ApiError::store)?;
  Ok(Json(person))
}

/// `PATCH /persons/person`
pub async fn update<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<Person>,
) -> Result<Json<Value>, ApiError> {
  state.store.update_person(body).await.map_err(ApiError::store)?;
  Ok(success())
}

/// `DELETE /persons/person?id=`
pub async fn delete<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<IdParam>,
) -> Result<Json<Value>, ApiError> {
  state.store.delete_person(p.id).await.map_err(ApiError::store)?;
  Ok(success())
}

// ─── Roles ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RoleParams {
  pub person:  i64,
  pub section: i64,
  pub role:    Option<i64>,
}

/// `GET /persons/roles?person=&section=`
pub async fn get_role<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<RoleParams>,
) -> Result<Json<Option<Value>>, ApiError> {
  let role = state
    .store
    .get_role(p.person, p.section)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(role.map(|role| json!({ "role": role }))))
}

/// `POST /persons/roles?person=&section=&role=`
pub async fn set_role<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<RoleParams>,
) -> Result<Json<Value>, ApiError> {
  let role = p
    .role
    .ok_or_else(|| ApiError::BadRequest("missing parameter `role`".into()))?;
  state
    .store
    .set_role(p.person, p.section, role)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}

/// `DELETE /persons/roles?person=&section=`
pub async fn delete_role<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<RoleParams>,
) -> Result<Json<Value>, ApiError> {
  state
    .store
    .delete_role(p.person, p.section)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}

/// `GET /roles/list`
pub async fn roles<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
) -> Result<Json<ListResponse<Role>>, ApiError> {
  let roles = state.store.list_roles().await.map_err(ApiError::store)?;
  Ok(Json(paging.apply("roles", roles)?))
}

// ─── Searches ────────────────────────────────────────────────────────────────

/// `GET /tourists/filter`
pub async fn tourists<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<TouristQuery>,
) -> Persons {
  let found = search::tourists(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(paging.apply("persons", found)?))
}

/// `GET /trainers/filter`
pub async fn trainers<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<TrainerQuery>,
) -> Persons {
  let found = search::trainers(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(paging.apply("persons", found)?))
}

/// `GET /trainers/workouts`
pub async fn trainers_by_workout<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<TrainerWorkoutQuery>,
) -> Persons {
  let found = search::trainers_by_workout(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(paging.apply("persons", found)?))
}

/// `GET /managers/filter`
pub async fn managers<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<ManagerQuery>,
) -> Persons {
  let found = search::managers(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(paging.apply("persons", found)?))
}
