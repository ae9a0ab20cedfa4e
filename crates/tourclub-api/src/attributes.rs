//! Attribute definitions and per-person attribute values.
//!
//! Definitions travel as `{id, attr, role, attr_type}` where `role` is `-1`
//! for attributes that apply to every role and `attr_type` is the numeric
//! type tag. Values are addressed through the kind in the path, e.g.
//! `/persons/attributes/date?person=1&attribute=2`.

use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tourclub_core::{
  attribute::{AttrKind, AttrValue, AttributeDef, NewAttribute},
  store::ClubStore,
};

use crate::{
  AppState, IdParam,
  error::ApiError,
  created,
  extract::{JsonBody, Params, Segment},
  list::{ListResponse, Paging},
  success,
};

/// `role` value meaning "any role".
const ANY_ROLE: i64 = -1;

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeBody {
  #[serde(default)]
  pub id:        i64,
  pub attr:      String,
  #[serde(default = "any_role")]
  pub role:      i64,
  pub attr_type: i64,
}

fn any_role() -> i64 { ANY_ROLE }

impl AttributeBody {
  fn role(&self) -> Option<i64> { (self.role != ANY_ROLE).then_some(self.role) }

  fn kind(&self) -> Result<AttrKind, ApiError> { Ok(AttrKind::from_tag(self.attr_type)?) }
}

impl From<AttributeDef> for AttributeBody {
  fn from(def: AttributeDef) -> Self {
    Self {
      id:        def.id,
      attr:      def.name,
      role:      def.role.unwrap_or(ANY_ROLE),
      attr_type: def.kind.tag(),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct ValueParams {
  pub person:    i64,
  pub attribute: i64,
}

#[derive(Debug, Deserialize)]
pub struct ValueBody {
  pub person:    i64,
  pub attribute: i64,
  pub value:     Value,
}

/// Interpret a JSON scalar as a value of `kind`.
fn parse_value(kind: AttrKind, raw: Value) -> Result<AttrValue, ApiError> {
  let bad = || ApiError::BadRequest(format!("value is not a valid {kind}"));
  match (kind, raw) {
    (AttrKind::Int, Value::Number(n)) => n.as_i64().map(AttrValue::Int).ok_or_else(bad),
    (AttrKind::Float, Value::Number(n)) => n.as_f64().map(AttrValue::Float).ok_or_else(bad),
    (AttrKind::Text, Value::String(s)) => Ok(AttrValue::Text(s)),
    (AttrKind::Date, Value::String(s)) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
      .map(AttrValue::Date)
      .map_err(|_| bad()),
    _ => Err(bad()),
  }
}

// ─── Definitions ─────────────────────────────────────────────────────────────

/// `POST /persons/attribute`
pub async fn create<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<AttributeBody>,
) -> Result<Json<Value>, ApiError> {
  let attribute = NewAttribute { kind: body.kind()?, role: body.role(), name: body.attr };
  let id = state.store.create_attribute(attribute).await.map_err(ApiError::store)?;
  Ok(created(id))
}

/// `GET /persons/attribute?id=`
pub async fn get_one<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<IdParam>,
) -> Result<Json<Option<AttributeBody>>, ApiError> {
  let def = state.store.get_attribute(p.id).await.map_err(ApiError::store)?;
  Ok(Json(def.map(AttributeBody::from)))
}

/// `PATCH /persons/attribute`
pub async fn update<S: ClubStore>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<AttributeBody>,
) -> Result<Json<Value>, ApiError> {
  let def = AttributeDef {
    id:   body.id,
    kind: body.kind()?,
    role: body.role(),
    name: body.attr,
  };
  state.store.update_attribute(def).await.map_err(ApiError::store)?;
  Ok(success())
}

/// `DELETE /persons/attribute?id=`
pub async fn delete<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(p): Params<IdParam>,
) -> Result<Json<Value>, ApiError> {
  state.store.delete_attribute(p.id).await.map_err(ApiError::store)?;
  Ok(success())
}

/// `GET /persons/attributes`
pub async fn list<S: ClubStore>(
  State(state): State<AppState<S>>,
  Params(paging): Params<Paging>,
) -> Result<Json<ListResponse<AttributeBody>>, ApiError> {
  let defs = state.store.list_attributes().await.map_err(ApiError::store)?;
  Ok(Json(paging.apply("attributes", defs)?.map(AttributeBody::from)))
}

// ─── Values ──────────────────────────────────────────────────────────────────

/// `GET /persons/attributes/{kind}?person=&attribute=`
pub async fn get_value<S: ClubStore>(
  State(state): State<AppState<S>>,
  Segment(kind): Segment<AttrKind>,
  Params(p): Params<ValueParams>,
) -> Result<Json<Option<Value>>, ApiError> {
  let value = state
    .store
    .get_attr_value(p.person, p.attribute, kind)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(value.map(|value| json!({ "value": value }))))
}

/// `POST /persons/attributes/{kind}`
pub async fn set_value<S: ClubStore>(
  State(state): State<AppState<S>>,
  Segment(kind): Segment<AttrKind>,
  JsonBody(body): JsonBody<ValueBody>,
) -> Result<Json<Value>, ApiError> {
  let value = parse_value(kind, body.value)?;
  state
    .store
    .set_attr_value(body.person, body.attribute, value)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}

/// `DELETE /persons/attributes/{kind}?person=&attribute=`
pub async fn delete_value<S: ClubStore>(
  State(state): State<AppState<S>>,
  Segment(kind): Segment<AttrKind>,
  Params(p): Params<ValueParams>,
) -> Result<Json<Value>, ApiError> {
  state
    .store
    .delete_attr_value(p.person, p.attribute, kind)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}
