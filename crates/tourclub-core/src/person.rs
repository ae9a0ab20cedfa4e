//! Persons and their per-section role assignments.

use serde::{Deserialize, Serialize};

/// The identity record of a club member.
///
/// Equality and hashing cover every field; the filter engine intersects
/// person sets by full-record equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
  pub id:         i64,
  pub name:       String,
  pub surname:    String,
  pub patronymic: String,
}

/// Input to [`crate::store::ClubStore::create_person`]; the id is assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
  pub name:       String,
  pub surname:    String,
  #[serde(default)]
  pub patronymic: String,
}

/// Fixed role codes held by a person within a section.
pub mod role {
  pub const TOURIST: i64 = 0;
  /// A tourist who competes in championships.
  pub const SPORTSMAN: i64 = 1;
  pub const TRAINER: i64 = 2;
  pub const MANAGER: i64 = 3;
}

/// A row of the role dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
  pub id:   i64,
  pub role: String,
}

/// Which role codes make a person a member of a searchable population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonKind {
  Tourist,
  Trainer,
  Manager,
}

impl PersonKind {
  pub fn role_codes(self) -> &'static [i64] {
    match self {
      Self::Tourist => &[role::TOURIST, role::SPORTSMAN],
      Self::Trainer => &[role::TRAINER],
      Self::Manager => &[role::MANAGER],
    }
  }
}
