//! Routes, tours and workouts: the secondary entities read by the tour and
//! strain filters.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Identity of a route; route filters intersect on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteRef {
  pub id: i64,
}

/// A row of the route-type dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteType {
  pub id:   i64,
  #[serde(rename = "type")]
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoute {
  pub title:      String,
  pub route_type: i64,
  pub difficulty: i64,
  /// Kilometres.
  pub length:     i64,
}

/// A tour: one walk of a route, led by an instructor, optionally by a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTour {
  pub route:         i64,
  pub instructor:    i64,
  pub group:         Option<i64>,
  pub start:         NaiveDate,
  pub duration_days: i64,
}

/// A recurring workout led by a trainer for one or more groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
  pub trainer:      i64,
  /// The workout attribute strain is grouped by, e.g. "running".
  pub workout_type: String,
  pub groups:       Vec<i64>,
}

/// A single held session of a workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
  pub workout:     i64,
  pub date:        NaiveDate,
  pub start_time:  NaiveTime,
  pub finish_time: NaiveTime,
}

/// Total training time of one workout type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strain {
  pub workout_type: String,
  pub seconds:      i64,
}

impl Strain {
  /// Zero-padded `HH:MM`; seconds are truncated.
  pub fn duration_hhmm(&self) -> String {
    let minutes = self.seconds.max(0) / 60;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strain(seconds: i64) -> Strain {
    Strain { workout_type: "run".into(), seconds }
  }

  #[test]
  fn duration_is_zero_padded() {
    assert_eq!(strain(0).duration_hhmm(), "00:00");
    assert_eq!(strain(5 * 60).duration_hhmm(), "00:05");
    assert_eq!(strain(3 * 3600 + 7 * 60).duration_hhmm(), "03:07");
  }

  #[test]
  fn duration_truncates_seconds() {
    assert_eq!(strain(90 * 60 + 59).duration_hhmm(), "01:30");
  }

  #[test]
  fn duration_keeps_hours_past_a_day() {
    assert_eq!(strain(26 * 3600).duration_hhmm(), "26:00");
  }
}
