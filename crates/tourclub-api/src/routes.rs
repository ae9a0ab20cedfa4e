//! Route searches and the route, place and route-type records behind them.
//!
//! Route filters answer with bare ids under `routeIds`.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use tourclub_core::{
  search::{self, GeoRouteQuery, RouteQuery},
  store::ClubStore,
  tour::{NewRoute, RouteRef, RouteType},
};

use crate::{
  AppState,
  error::ApiError,
  created,
  extract::{JsonBody, Params},
  list::{ListResponse, Paging},
  success,
};

type RouteIds = Result<Json<ListResponse<i64>>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct RouteBody {
  pub title:      String,
  #[serde(rename = "type")]
  pub route_type: i64,
  pub difficulty: i64,
  pub length:     i64,
}

#[derive(Debug, Deserialize)]
pub struct PlaceBody {
  pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct LinkParams {
  pub place: i64,
  pub route: i64,
}

fn ids(paging: Paging, found: Vec<RouteRef>) -> RouteIds {
  Ok(Json(paging.apply("routeIds", found)?.map(|r| r.id)))
}

/// `GET /routes/filter`
pub async fn filter<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<RouteQuery>,
) -> RouteIds {
  let found = search::routes(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  ids(paging, found)
}

/// `GET /routes/geofilter`
pub async fn geo_filter<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
  Params(q): Params<GeoRouteQuery>,
) -> RouteIds {
  let found = search::geo_routes(state.store.as_ref(), &q, state.deadline())
    .await
    .map_err(ApiError::store)?;
  ids(paging, found)
}

/// `GET /routes/types`
pub async fn types<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
) -> Result<Json<ListResponse<RouteType>>, ApiError> {
  let types = state.store.route_types().await.map_err(ApiError::store)?;
  Ok(Json(paging.apply("routeTypes", types)?))
}

/// `POST /routes/route`
pub async fn create<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<RouteBody>,
) -> Result<Json<Value>, ApiError> {
  if body.length < 0 {
    return Err(ApiError::BadRequest("length must not be negative".into()));
  }
  let route = NewRoute {
    title:      body.title,
    route_type: body.route_type,
    difficulty: body.difficulty,
    length:     body.length,
  };
  let id = state.store.create_route(route).await.map_err(ApiError::store)?;
  Ok(created(id))
}

/// `POST /routes/place`
pub async fn create_place<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<PlaceBody>,
) -> Result<Json<Value>, ApiError> {
  let id = state.store.create_place(body.title).await.map_err(ApiError::store)?;
  Ok(created(id))
}

/// `POST /routes/place/link?place=&route=`
pub async fn link_place<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<LinkParams>,
) -> Result<Json<Value>, ApiError> {
  state.store.link_place(p.place, p.route).await.map_err(ApiError::store)?;
  Ok(success())
}
