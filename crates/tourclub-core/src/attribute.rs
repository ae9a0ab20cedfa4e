//! Typed, optionally role-scoped extension attributes of persons.
//!
//! A definition declares the value type; values live in one store table per
//! type. Reading a value through a kind other than the one it was written with
//! yields nothing.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ids of the attribute definitions seeded by every store and relied upon by
/// the person filters.
pub mod well_known {
  /// Integer; 0 or 1.
  pub const SEX: i64 = 1;
  /// Date.
  pub const BIRTH_DATE: i64 = 2;
  /// Integer, trainer scoped.
  pub const TRAINER_SALARY: i64 = 3;
  /// String, trainer scoped.
  pub const SPECIALIZATION: i64 = 4;
  /// Date the manager started, manager scoped.
  pub const BEGIN_DATE: i64 = 5;
  /// Integer, manager scoped.
  pub const MANAGER_SALARY: i64 = 6;
}

/// The value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrKind {
  Int,
  Float,
  #[serde(rename = "string")]
  Text,
  Date,
}

impl AttrKind {
  /// The numeric type tag stored in `attributes.attr_type`.
  pub fn tag(self) -> i64 {
    match self {
      Self::Int => 0,
      Self::Float => 1,
      Self::Text => 2,
      Self::Date => 3,
    }
  }

  pub fn from_tag(tag: i64) -> Result<Self> {
    match tag {
      0 => Ok(Self::Int),
      1 => Ok(Self::Float),
      2 => Ok(Self::Text),
      3 => Ok(Self::Date),
      other => Err(Error::UnknownAttributeType(other)),
    }
  }
}

impl fmt::Display for AttrKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Int => "integer",
      Self::Float => "float",
      Self::Text => "string",
      Self::Date => "date",
    })
  }
}

/// A stored attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDef {
  pub id:   i64,
  pub name: String,
  /// Role code the attribute applies to; `None` for all roles.
  pub role: Option<i64>,
  pub kind: AttrKind,
}

/// Input to [`crate::store::ClubStore::create_attribute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttribute {
  pub name: String,
  pub role: Option<i64>,
  pub kind: AttrKind,
}

/// A single attribute value of a person. Serialises as the bare scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
  Int(i64),
  Float(f64),
  Text(String),
  Date(NaiveDate),
}

impl AttrValue {
  pub fn kind(&self) -> AttrKind {
    match self {
      Self::Int(_) => AttrKind::Int,
      Self::Float(_) => AttrKind::Float,
      Self::Text(_) => AttrKind::Text,
      Self::Date(_) => AttrKind::Date,
    }
  }
}
