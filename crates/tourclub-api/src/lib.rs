//! JSON HTTP API for the tourist-club store.
//!
//! Exposes an axum [`Router`] backed by any [`ClubStore`]. Every search
//! endpoint runs one composition from [`tourclub_core::search`] under a
//! deadline derived from the configured request timeout.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = tourclub_api::api_router(AppState::new(store, Duration::from_secs(5)));
//! ```

pub mod attributes;
pub mod championships;
pub mod error;
pub mod extract;
pub mod groups;
pub mod health;
pub mod list;
pub mod persons;
pub mod routes;
pub mod sections;
pub mod tours;
pub mod workouts;

use std::{sync::Arc, time::Duration};

use axum::{
  Json, Router,
  http::Uri,
  routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tourclub_core::{filter::Deadline, store::ClubStore};

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store:           Arc<S>,
  /// Budget for all store work of one request.
  pub request_timeout: Duration,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, request_timeout: Duration) -> Self { Self { store, request_timeout } }

  /// A fresh deadline for a request starting now.
  pub fn deadline(&self) -> Deadline { Deadline::after(self.request_timeout) }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), request_timeout: self.request_timeout }
  }
}

// ─── Shared parameters and replies ───────────────────────────────────────────

/// `?id=` of single-entity endpoints.
#[derive(Debug, Deserialize)]
pub struct IdParam {
  pub id: i64,
}

pub(crate) fn success() -> Json<Value> { Json(json!({ "status": "success" })) }

pub(crate) fn created(id: i64) -> Json<Value> { Json(json!({ "status": "success", "id": id })) }

async fn unknown_route(uri: Uri) -> ApiError {
  ApiError::NotFound(format!("no route for {}", uri.path()))
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ClubStore + 'static,
{
  Router::new()
    // Persons
    .route("/persons/create", post(persons::create::<S>))
    .route(
      "/persons/person",
      get(persons::get_one::<S>)
        .patch(persons::update::<S>)
        .delete(persons::delete::<S>),
    )
    .route(
      "/persons/roles",
      get(persons::get_role::<S>)
        .post(persons::set_role::<S>)
        .delete(persons::delete_role::<S>),
    )
    .route("/roles/list", get(persons::roles::<S>))
    .route("/tourists/filter", get(persons::tourists::<S>))
    .route("/trainers/filter", get(persons::trainers::<S>))
    .route("/trainers/workouts", get(persons::trainers_by_workout::<S>))
    .route("/managers/filter", get(persons::managers::<S>))
    // Attributes
    .route(
      "/persons/attribute",
      post(attributes::create::<S>)
        .get(attributes::get_one::<S>)
        .patch(attributes::update::<S>)
        .delete(attributes::delete::<S>),
    )
    .route("/persons/attributes", get(attributes::list::<S>))
    .route(
      "/persons/attributes/{kind}",
      get(attributes::get_value::<S>)
        .post(attributes::set_value::<S>)
        .delete(attributes::delete_value::<S>),
    )
    // Groups
    .route(
      "/groups/group",
      post(groups::create::<S>)
        .get(groups::get_one::<S>)
        .patch(groups::update::<S>)
        .delete(groups::delete::<S>),
    )
    .route("/groups/members", get(groups::members::<S>))
    .route("/groups/members/add", post(groups::add_member::<S>))
    .route("/groups/members/remove", post(groups::remove_member::<S>))
    .route("/groups/list", get(groups::list::<S>))
    // Sections
    .route(
      "/sections/section",
      post(sections::create::<S>)
        .get(sections::get_one::<S>)
        .patch(sections::update::<S>)
        .delete(sections::delete::<S>),
    )
    .route("/sections/list", get(sections::list::<S>))
    .route("/sections/groups", get(sections::groups::<S>))
    // Championships
    .route("/championships/filter", get(championships::filter::<S>))
    .route("/championships/championship", post(championships::create::<S>))
    .route("/championships/participants/add", post(championships::add_participant::<S>))
    // Routes
    .route("/routes/filter", get(routes::filter::<S>))
    .route("/routes/geofilter", get(routes::geo_filter::<S>))
    .route("/routes/types", get(routes::types::<S>))
    .route("/routes/route", post(routes::create::<S>))
    .route("/routes/place", post(routes::create_place::<S>))
    .route("/routes/place/link", post(routes::link_place::<S>))
    // Tours
    .route("/instructors/filter", get(tours::instructors::<S>))
    .route("/tourists/tour-filter", get(tours::tourists::<S>))
    .route("/tourists/trainer-instructor", get(tours::trainer_instructor::<S>))
    .route("/tourists/completed-all", get(tours::completed_all::<S>))
    .route("/tourists/completed", post(tours::completed_routes::<S>))
    .route("/tours/tour", post(tours::create::<S>))
    .route("/tours/participants/add", post(tours::add_participant::<S>))
    // Workouts
    .route("/workouts/workout", post(workouts::create::<S>))
    .route("/workouts/session", post(workouts::add_session::<S>))
    .route("/workouts/strain", get(workouts::strain::<S>))
    // Health
    .route("/health", get(health::handler::<S>))
    .fallback(unknown_route)
    .with_state(state)
}
