//! Organisational units: sections, the groups inside them, and
//! championships.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A top-level organisational unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
  pub id:    i64,
  pub title: String,
}

/// A training group belonging to a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
  pub id:           i64,
  pub group_number: i64,
  pub section:      i64,
}

/// Input to [`crate::store::ClubStore::create_group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
  pub group_number: i64,
  pub section:      i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Championship {
  pub id:    i64,
  pub title: String,
  pub date:  NaiveDate,
}

/// Input to [`crate::store::ClubStore::create_championship`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChampionship {
  pub title: String,
  pub date:  NaiveDate,
}
