//! Per-endpoint search compositions built on [`crate::filter`].
//!
//! Each composition fetches a base set, then narrows it pass by pass in a
//! fixed order. Query structs carry the raw request parameters; an absent
//! parameter deserialises to the empty string and means "not requested".

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
  attribute::well_known,
  filter::{Deadline, apply_filter, narrow_with, optional_date, parse_int},
  org::Championship,
  person::{Person, PersonKind},
  store::ClubStore,
  tour::{RouteRef, Strain},
};

type Found<T, S> = Result<Vec<T>, <S as ClubStore>::Error>;

/// Lower bound used when a workout period has no start.
pub fn earliest() -> NaiveDate { NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN) }

/// Upper bound used when a workout period has no end.
pub fn latest() -> NaiveDate { NaiveDate::from_ymd_opt(2999, 1, 1).unwrap_or(NaiveDate::MAX) }

// ─── Query parameters ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TouristQuery {
  pub section:    String,
  pub group:      String,
  pub sex:        String,
  pub birth_year: String,
  pub age:        String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainerQuery {
  pub section:        String,
  pub sex:            String,
  pub age:            String,
  pub salary:         String,
  pub specialization: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManagerQuery {
  pub salary:     String,
  pub birth_year: String,
  pub age:        String,
  pub begin_year: String,
  pub sex:        String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainerWorkoutQuery {
  pub group:     String,
  pub from_date: String,
  pub to_date:   String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TourTouristQuery {
  pub section:   String,
  pub group:     String,
  pub cnt_tours: String,
  pub tour_id:   String,
  pub tour_time: String,
  pub route_id:  String,
  pub place_id:  String,
}

/// Section and group narrowing shared by several tourist lookups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MembershipQuery {
  pub section: String,
  pub group:   String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstructorQuery {
  pub role:       String,
  #[serde(rename = "type")]
  pub route_type: String,
  pub difficulty: String,
  pub cnt_tours:  String,
  pub tour_id:    String,
  pub place_id:   String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteQuery {
  pub section:    String,
  pub date_from:  String,
  pub date_to:    String,
  pub instructor: String,
  pub group_cnt:  String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeoRouteQuery {
  pub place:      String,
  pub length:     String,
  pub difficulty: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChampionshipQuery {
  pub section: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StrainQuery {
  pub trainer:   String,
  pub from_date: String,
  pub to_date:   String,
}

// ─── Persons ─────────────────────────────────────────────────────────────────

pub async fn tourists<S: ClubStore>(
  store: &S,
  q: &TouristQuery,
  deadline: Deadline,
) -> Found<Person, S> {
  const KIND: PersonKind = PersonKind::Tourist;
  let found = deadline.run(store.persons_of_kind(KIND)).await?;
  let found = apply_filter("section", &q.section, found, deadline, |v| {
    store.persons_in_section(KIND, v)
  })
  .await?;
  let found =
    apply_filter("group", &q.group, found, deadline, |v| store.persons_in_group(v)).await?;
  let found = apply_filter("sex", &q.sex, found, deadline, |v| {
    store.persons_with_int_attr(KIND, well_known::SEX, v)
  })
  .await?;
  let found = apply_filter("birth_year", &q.birth_year, found, deadline, |v| {
    store.persons_born_in(KIND, well_known::BIRTH_DATE, v)
  })
  .await?;
  apply_filter("age", &q.age, found, deadline, |v| {
    store.persons_aged(KIND, well_known::BIRTH_DATE, v)
  })
  .await
}

pub async fn trainers<S: ClubStore>(
  store: &S,
  q: &TrainerQuery,
  deadline: Deadline,
) -> Found<Person, S> {
  const KIND: PersonKind = PersonKind::Trainer;
  let found = deadline.run(store.persons_of_kind(KIND)).await?;
  let found = apply_filter("section", &q.section, found, deadline, |v| {
    store.persons_in_section(KIND, v)
  })
  .await?;
  let found = apply_filter("sex", &q.sex, found, deadline, |v| {
    store.persons_with_int_attr(KIND, well_known::SEX, v)
  })
  .await?;
  let found = apply_filter("age", &q.age, found, deadline, |v| {
    store.persons_aged(KIND, well_known::BIRTH_DATE, v)
  })
  .await?;
  let found = apply_filter("salary", &q.salary, found, deadline, |v| {
    store.persons_with_int_attr(KIND, well_known::TRAINER_SALARY, v)
  })
  .await?;

  if q.specialization.is_empty() {
    return Ok(found);
  }
  let specialization = q.specialization.clone();
  narrow_with(found, deadline, || {
    store.persons_with_text_attr(KIND, well_known::SPECIALIZATION, specialization)
  })
  .await
}

pub async fn managers<S: ClubStore>(
  store: &S,
  q: &ManagerQuery,
  deadline: Deadline,
) -> Found<Person, S> {
  const KIND: PersonKind = PersonKind::Manager;
  let found = deadline.run(store.persons_of_kind(KIND)).await?;
  let found = apply_filter("salary", &q.salary, found, deadline, |v| {
    store.persons_with_int_attr(KIND, well_known::MANAGER_SALARY, v)
  })
  .await?;
  let found = apply_filter("begin_year", &q.begin_year, found, deadline, |v| {
    store.persons_born_in(KIND, well_known::BEGIN_DATE, v)
  })
  .await?;
  let found = apply_filter("birth_year", &q.birth_year, found, deadline, |v| {
    store.persons_born_in(KIND, well_known::BIRTH_DATE, v)
  })
  .await?;
  let found = apply_filter("age", &q.age, found, deadline, |v| {
    store.persons_aged(KIND, well_known::BIRTH_DATE, v)
  })
  .await?;
  apply_filter("sex", &q.sex, found, deadline, |v| {
    store.persons_with_int_attr(KIND, well_known::SEX, v)
  })
  .await
}

/// Trainers who held a session for a group; the group number is required.
pub async fn trainers_by_workout<S: ClubStore>(
  store: &S,
  q: &TrainerWorkoutQuery,
  deadline: Deadline,
) -> Found<Person, S> {
  let group = parse_int("group", &q.group)?;
  let (from, to) = period(&q.from_date, &q.to_date)?;
  deadline.run(store.trainers_by_workout(group, from, to)).await
}

// ─── Tours ───────────────────────────────────────────────────────────────────

/// Section then group narrowing over any tourist base set.
async fn within_membership<S: ClubStore>(
  store: &S,
  q: &MembershipQuery,
  found: Vec<Person>,
  deadline: Deadline,
) -> Found<Person, S> {
  let found = apply_filter("section", &q.section, found, deadline, |v| {
    store.persons_in_section(PersonKind::Tourist, v)
  })
  .await?;
  apply_filter("group", &q.group, found, deadline, |v| store.persons_in_group(v)).await
}

pub async fn tourists_by_tour<S: ClubStore>(
  store: &S,
  q: &TourTouristQuery,
  deadline: Deadline,
) -> Found<Person, S> {
  let tour_time = optional_date("tour_time", &q.tour_time)?;

  let found = deadline.run(store.persons_of_kind(PersonKind::Tourist)).await?;
  let membership = MembershipQuery { section: q.section.clone(), group: q.group.clone() };
  let found = within_membership(store, &membership, found, deadline).await?;
  let found = apply_filter("cnt_tours", &q.cnt_tours, found, deadline, |v| {
    store.tourists_by_tour_count(v)
  })
  .await?;
  let found =
    apply_filter("tour_id", &q.tour_id, found, deadline, |v| store.tourists_on_tour(v)).await?;
  let found =
    apply_filter("route_id", &q.route_id, found, deadline, |v| store.tourists_by_route(v))
      .await?;
  let found =
    apply_filter("place_id", &q.place_id, found, deadline, |v| store.tourists_by_place(v))
      .await?;

  match tour_time {
    Some(date) => narrow_with(found, deadline, || store.tourists_on_tour_at(date)).await,
    None => Ok(found),
  }
}

pub async fn tourists_with_trainer_instructor<S: ClubStore>(
  store: &S,
  q: &MembershipQuery,
  deadline: Deadline,
) -> Found<Person, S> {
  let found = deadline.run(store.tourists_with_trainer_instructor()).await?;
  within_membership(store, q, found, deadline).await
}

pub async fn tourists_completed_all<S: ClubStore>(
  store: &S,
  q: &MembershipQuery,
  deadline: Deadline,
) -> Found<Person, S> {
  let found = deadline.run(store.tourists_completed_all()).await?;
  within_membership(store, q, found, deadline).await
}

/// Tourists who completed every one of `routes`.
pub async fn tourists_completed_routes<S: ClubStore>(
  store: &S,
  q: &MembershipQuery,
  routes: &[i64],
  deadline: Deadline,
) -> Found<Person, S> {
  let found = deadline.run(store.persons_of_kind(PersonKind::Tourist)).await?;
  let mut found = within_membership(store, q, found, deadline).await?;
  for &route in routes {
    found = narrow_with(found, deadline, || store.tourists_completed_route(route)).await?;
  }
  Ok(found)
}

pub async fn instructors<S: ClubStore>(
  store: &S,
  q: &InstructorQuery,
  deadline: Deadline,
) -> Found<Person, S> {
  let found = deadline.run(store.instructors()).await?;
  let mut found =
    apply_filter("role", &q.role, found, deadline, |v| store.instructors_by_role(v)).await?;

  // The category only applies when both halves are given.
  if !q.route_type.is_empty() && !q.difficulty.is_empty() {
    let route_type = parse_int("type", &q.route_type)?;
    let difficulty = parse_int("difficulty", &q.difficulty)?;
    found = narrow_with(found, deadline, || {
      store.instructors_by_category(route_type, difficulty)
    })
    .await?;
  }

  let found = apply_filter("cnt_tours", &q.cnt_tours, found, deadline, |v| {
    store.instructors_by_tour_count(v)
  })
  .await?;
  let found =
    apply_filter("tour_id", &q.tour_id, found, deadline, |v| store.instructors_by_tour(v))
      .await?;
  apply_filter("place_id", &q.place_id, found, deadline, |v| store.instructors_by_place(v)).await
}

// ─── Routes ──────────────────────────────────────────────────────────────────

pub async fn routes<S: ClubStore>(
  store: &S,
  q: &RouteQuery,
  deadline: Deadline,
) -> Found<RouteRef, S> {
  let date_from = optional_date("date_from", &q.date_from)?;
  let date_to = optional_date("date_to", &q.date_to)?;

  let found = deadline.run(store.routes()).await?;
  let found =
    apply_filter("section", &q.section, found, deadline, |v| store.routes_by_section(v))
      .await?;
  let found = apply_filter("instructor", &q.instructor, found, deadline, |v| {
    store.routes_by_instructor(v)
  })
  .await?;
  let found = apply_filter("group_cnt", &q.group_cnt, found, deadline, |v| {
    store.routes_by_group_count(v)
  })
  .await?;

  // The period only applies when both ends are given.
  match (date_from, date_to) {
    (Some(from), Some(to)) => {
      narrow_with(found, deadline, || store.routes_in_period(from, to)).await
    }
    _ => Ok(found),
  }
}

pub async fn geo_routes<S: ClubStore>(
  store: &S,
  q: &GeoRouteQuery,
  deadline: Deadline,
) -> Found<RouteRef, S> {
  let found = deadline.run(store.routes()).await?;
  let found =
    apply_filter("place", &q.place, found, deadline, |v| store.routes_by_place(v)).await?;
  let found =
    apply_filter("length", &q.length, found, deadline, |v| store.routes_by_length(v)).await?;
  apply_filter("difficulty", &q.difficulty, found, deadline, |v| {
    store.routes_by_difficulty(v)
  })
  .await
}

// ─── Championships and workouts ──────────────────────────────────────────────

pub async fn championships<S: ClubStore>(
  store: &S,
  q: &ChampionshipQuery,
  deadline: Deadline,
) -> Found<Championship, S> {
  let found = deadline.run(store.championships_upcoming()).await?;
  apply_filter("section", &q.section, found, deadline, |v| {
    store.championships_by_section(v)
  })
  .await
}

/// Strain of one trainer; the trainer id is required.
pub async fn strain<S: ClubStore>(
  store: &S,
  q: &StrainQuery,
  deadline: Deadline,
) -> Found<Strain, S> {
  let trainer = parse_int("trainer", &q.trainer)?;
  let (from, to) = period(&q.from_date, &q.to_date)?;
  deadline.run(store.strain(trainer, from, to)).await
}

/// A closed date range with open ends replaced by [`earliest`] and
/// [`latest`].
pub fn period(from: &str, to: &str) -> crate::Result<(NaiveDate, NaiveDate)> {
  Ok((
    optional_date("from_date", from)?.unwrap_or_else(earliest),
    optional_date("to_date", to)?.unwrap_or_else(latest),
  ))
}
