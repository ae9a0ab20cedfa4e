//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` text and times of day as `HH:MM:SS`, so
//! that SQLite's date functions and plain string comparison both apply.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Row, types::Value};
use tourclub_core::{
  attribute::{AttrKind, AttrValue, AttributeDef},
  org::Championship,
  person::{Person, PersonKind},
};

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

pub fn encode_time(t: NaiveTime) -> String { t.format("%H:%M:%S").to_string() }

// ─── Persons ─────────────────────────────────────────────────────────────────

pub const PERSON_COLUMNS: &str = "p.id, p.name, p.surname, p.patronymic";

pub fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:         row.get(0)?,
    name:       row.get(1)?,
    surname:    row.get(2)?,
    patronymic: row.get(3)?,
  })
}

/// SQL condition restricting `p` to holders of one of the kind's roles.
pub fn holds_kind(kind: PersonKind) -> String { role_condition(kind, "") }

/// As [`holds_kind`], but the role must be held in the section bound to `?1`.
pub fn holds_kind_in_section(kind: PersonKind) -> String {
  role_condition(kind, " AND r.section = ?1")
}

fn role_condition(kind: PersonKind, extra: &str) -> String {
  let codes = kind
    .role_codes()
    .iter()
    .map(i64::to_string)
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "EXISTS (SELECT 1 FROM persons_roles r WHERE r.person = p.id AND r.role IN ({codes}){extra})"
  )
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// The table holding values of `kind`.
pub fn value_table(kind: AttrKind) -> &'static str {
  match kind {
    AttrKind::Int => "persons_attrs_int",
    AttrKind::Float => "persons_attrs_real",
    AttrKind::Text => "persons_attrs_text",
    AttrKind::Date => "persons_attrs_date",
  }
}

pub fn encode_value(value: &AttrValue) -> Value {
  match value {
    AttrValue::Int(v) => Value::Integer(*v),
    AttrValue::Float(v) => Value::Real(*v),
    AttrValue::Text(v) => Value::Text(v.clone()),
    AttrValue::Date(v) => Value::Text(encode_date(*v)),
  }
}

pub fn decode_value(kind: AttrKind, raw: Value) -> Result<AttrValue> {
  match (kind, raw) {
    (AttrKind::Int, Value::Integer(v)) => Ok(AttrValue::Int(v)),
    (AttrKind::Float, Value::Real(v)) => Ok(AttrValue::Float(v)),
    (AttrKind::Float, Value::Integer(v)) => Ok(AttrValue::Float(v as f64)),
    (AttrKind::Text, Value::Text(v)) => Ok(AttrValue::Text(v)),
    (AttrKind::Date, Value::Text(v)) => decode_date(&v).map(AttrValue::Date),
    (kind, other) => Err(Error::Decode(format!("{kind} value stored as {other:?}"))),
  }
}

/// An `attributes` row before its type tag is checked.
pub struct RawAttribute {
  pub id:        i64,
  pub name:      String,
  pub role:      Option<i64>,
  pub attr_type: i64,
}

impl RawAttribute {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      name:      row.get(1)?,
      role:      row.get(2)?,
      attr_type: row.get(3)?,
    })
  }

  pub fn into_def(self) -> Result<AttributeDef> {
    let kind = AttrKind::from_tag(self.attr_type)
      .map_err(|e| Error::Decode(format!("attribute {}: {e}", self.id)))?;
    Ok(AttributeDef { id: self.id, name: self.name, role: self.role, kind })
  }
}

// ─── Championships ───────────────────────────────────────────────────────────

pub struct RawChampionship {
  pub id:    i64,
  pub title: String,
  pub date:  String,
}

impl RawChampionship {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, title: row.get(1)?, date: row.get(2)? })
  }

  pub fn into_championship(self) -> Result<Championship> {
    Ok(Championship { id: self.id, title: self.title, date: decode_date(&self.date)? })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tourist_condition_covers_both_tourist_roles() {
    assert!(holds_kind(PersonKind::Tourist).ends_with("r.role IN (0, 1))"));
    assert!(holds_kind(PersonKind::Manager).ends_with("r.role IN (3))"));
    assert!(holds_kind_in_section(PersonKind::Trainer).ends_with("IN (2) AND r.section = ?1)"));
  }

  #[test]
  fn values_decode_only_through_their_own_kind() {
    let d = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
    let stored = encode_value(&AttrValue::Date(d));
    assert_eq!(stored, Value::Text("1990-05-17".into()));
    assert_eq!(decode_value(AttrKind::Date, stored.clone()).unwrap(), AttrValue::Date(d));
    assert!(decode_value(AttrKind::Int, stored).is_err());
  }

  #[test]
  fn unknown_type_tag_is_a_decode_error() {
    let raw = RawAttribute { id: 9, name: "x".into(), role: None, attr_type: 7 };
    assert!(matches!(raw.into_def(), Err(Error::Decode(_))));
  }
}
