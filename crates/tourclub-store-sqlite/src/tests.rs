//! Integration tests for `SqliteStore` against an in-memory database.

use std::time::Duration;

use chrono::{Datelike as _, Days, NaiveDate, NaiveTime, Utc};
use tourclub_core::{
  Error as CoreError, ErrorKind, StoreError as _,
  attribute::{AttrKind, AttrValue, NewAttribute, well_known},
  filter::Deadline,
  org::{NewChampionship, NewGroup},
  person::{NewPerson, Person, PersonKind, role},
  search::{self, TouristQuery},
  store::ClubStore,
  tour::{NewRoute, NewSession, NewTour, NewWorkout},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

fn time(h: u32, m: u32, s: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, m, s).unwrap() }

fn today() -> NaiveDate { Utc::now().date_naive() }

fn deadline() -> Deadline { Deadline::after(Duration::from_secs(30)) }

async fn person(s: &SqliteStore, name: &str) -> Person {
  let new = NewPerson {
    name:       name.into(),
    surname:    format!("{name}ov"),
    patronymic: String::new(),
  };
  let id = s.create_person(new).await.unwrap();
  s.get_person(id).await.unwrap().unwrap()
}

async fn section(s: &SqliteStore, title: &str) -> i64 {
  s.create_section(title.into()).await.unwrap()
}

async fn route(s: &SqliteStore, length: i64, difficulty: i64) -> i64 {
  s.create_route(NewRoute {
    title: format!("route {length}"),
    route_type: 1,
    difficulty,
    length,
  })
  .await
  .unwrap()
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let s = store().await;
  let new = NewPerson {
    name:       "Anna".into(),
    surname:    "Petrova".into(),
    patronymic: "Ivanovna".into(),
  };
  let id = s.create_person(new.clone()).await.unwrap();

  let fetched = s.get_person(id).await.unwrap().unwrap();
  assert_eq!(fetched.id, id);
  assert_eq!(fetched.name, new.name);
  assert_eq!(fetched.surname, new.surname);
  assert_eq!(fetched.patronymic, new.patronymic);
}

#[tokio::test]
async fn generated_ids_are_distinct() {
  let s = store().await;
  let a = person(&s, "A").await;
  let b = person(&s, "B").await;
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  assert!(s.get_person(404).await.unwrap().is_none());
}

#[tokio::test]
async fn update_then_delete_person() {
  let s = store().await;
  let mut p = person(&s, "Oleg").await;
  p.surname = "Sidorov".into();
  s.update_person(p.clone()).await.unwrap();
  assert_eq!(s.get_person(p.id).await.unwrap(), Some(p.clone()));

  s.delete_person(p.id).await.unwrap();
  assert!(s.get_person(p.id).await.unwrap().is_none());
}

// ─── Roles ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn setting_a_role_twice_keeps_the_second() {
  let s = store().await;
  let p = person(&s, "Ivan").await;
  let sec = section(&s, "hiking").await;

  s.set_role(p.id, sec, role::TOURIST).await.unwrap();
  s.set_role(p.id, sec, role::TRAINER).await.unwrap();

  assert_eq!(s.get_role(p.id, sec).await.unwrap(), Some(role::TRAINER));
  let trainers = s.persons_in_section(PersonKind::Trainer, sec).await.unwrap();
  assert_eq!(trainers, vec![p.clone()]);
  assert!(s.persons_in_section(PersonKind::Tourist, sec).await.unwrap().is_empty());

  s.delete_role(p.id, sec).await.unwrap();
  assert_eq!(s.get_role(p.id, sec).await.unwrap(), None);
}

#[tokio::test]
async fn role_dictionary_is_seeded() {
  let s = store().await;
  let roles = s.list_roles().await.unwrap();
  let names: Vec<_> = roles.iter().map(|r| r.role.as_str()).collect();
  assert_eq!(names, ["tourist", "sportsman", "trainer", "manager"]);
}

#[tokio::test]
async fn role_in_missing_section_is_a_parameter_error() {
  let s = store().await;
  let p = person(&s, "Ghost").await;
  let err = s.set_role(p.id, 77, role::TOURIST).await.unwrap_err();
  assert!(err.is_constraint_violation());
  assert_eq!(err.kind(), ErrorKind::Parameter);
}

// ─── Attributes ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn well_known_attributes_are_seeded() {
  let s = store().await;
  let sex = s.get_attribute(well_known::SEX).await.unwrap().unwrap();
  assert_eq!(sex.kind, AttrKind::Int);
  assert_eq!(sex.role, None);

  let specialization = s.get_attribute(well_known::SPECIALIZATION).await.unwrap().unwrap();
  assert_eq!(specialization.kind, AttrKind::Text);
  assert_eq!(specialization.role, Some(role::TRAINER));

  assert_eq!(s.list_attributes().await.unwrap().len(), 6);
}

#[tokio::test]
async fn attribute_definition_crud() {
  let s = store().await;
  let id = s
    .create_attribute(NewAttribute {
      name: "height".into(),
      role: None,
      kind: AttrKind::Float,
    })
    .await
    .unwrap();

  let mut def = s.get_attribute(id).await.unwrap().unwrap();
  assert_eq!(def.name, "height");
  def.role = Some(role::SPORTSMAN);
  s.update_attribute(def.clone()).await.unwrap();
  assert_eq!(s.get_attribute(id).await.unwrap(), Some(def));

  s.delete_attribute(id).await.unwrap();
  assert!(s.get_attribute(id).await.unwrap().is_none());
}

#[tokio::test]
async fn attribute_values_route_by_kind() {
  let s = store().await;
  let p = person(&s, "Vera").await;

  s.set_attr_value(p.id, well_known::SEX, AttrValue::Int(1)).await.unwrap();
  assert_eq!(
    s.get_attr_value(p.id, well_known::SEX, AttrKind::Int).await.unwrap(),
    Some(AttrValue::Int(1))
  );
  assert_eq!(s.get_attr_value(p.id, well_known::SEX, AttrKind::Float).await.unwrap(), None);
  assert_eq!(s.get_attr_value(p.id, well_known::SEX, AttrKind::Text).await.unwrap(), None);

  // Upsert replaces the value.
  s.set_attr_value(p.id, well_known::SEX, AttrValue::Int(0)).await.unwrap();
  assert_eq!(
    s.get_attr_value(p.id, well_known::SEX, AttrKind::Int).await.unwrap(),
    Some(AttrValue::Int(0))
  );

  s.delete_attr_value(p.id, well_known::SEX, AttrKind::Int).await.unwrap();
  assert_eq!(s.get_attr_value(p.id, well_known::SEX, AttrKind::Int).await.unwrap(), None);
}

#[tokio::test]
async fn date_values_round_trip() {
  let s = store().await;
  let p = person(&s, "Lev").await;
  let born = date(1987, 3, 9);
  s.set_attr_value(p.id, well_known::BIRTH_DATE, AttrValue::Date(born)).await.unwrap();
  assert_eq!(
    s.get_attr_value(p.id, well_known::BIRTH_DATE, AttrKind::Date).await.unwrap(),
    Some(AttrValue::Date(born))
  );
}

#[tokio::test]
async fn value_of_the_wrong_kind_is_rejected() {
  let s = store().await;
  let p = person(&s, "Rita").await;

  let err = s
    .set_attr_value(p.id, well_known::SEX, AttrValue::Text("f".into()))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::AttributeTypeMismatch {
      declared: AttrKind::Int,
      requested: AttrKind::Text,
      ..
    })
  ));
  assert_eq!(err.kind(), ErrorKind::Parameter);

  let err = s.set_attr_value(p.id, 999, AttrValue::Int(1)).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::UnknownAttribute(999))));

  assert_eq!(s.get_attr_value(p.id, well_known::SEX, AttrKind::Text).await.unwrap(), None);
}

// ─── Person filters ──────────────────────────────────────────────────────────

#[tokio::test]
async fn tourists_by_section_and_sex() {
  let s = store().await;
  let sec1 = section(&s, "one").await;
  let sec2 = section(&s, "two").await;
  let p1 = person(&s, "P1").await;
  let p2 = person(&s, "P2").await;
  let p3 = person(&s, "P3").await;

  s.set_role(p1.id, sec2, role::TOURIST).await.unwrap();
  s.set_role(p2.id, sec2, role::SPORTSMAN).await.unwrap();
  s.set_role(p3.id, sec1, role::TOURIST).await.unwrap();
  s.set_attr_value(p1.id, well_known::SEX, AttrValue::Int(0)).await.unwrap();
  s.set_attr_value(p2.id, well_known::SEX, AttrValue::Int(1)).await.unwrap();
  s.set_attr_value(p3.id, well_known::SEX, AttrValue::Int(1)).await.unwrap();

  let q = TouristQuery {
    section: sec2.to_string(),
    sex: "1".into(),
    ..Default::default()
  };
  let found = search::tourists(&s, &q, deadline()).await.unwrap();
  assert_eq!(found, vec![p2]);

  let all = search::tourists(&s, &TouristQuery::default(), deadline()).await.unwrap();
  assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn tourist_filter_rejects_non_numeric_parameters() {
  let s = store().await;
  let sec = section(&s, "one").await;
  let p = person(&s, "P").await;
  s.set_role(p.id, sec, role::TOURIST).await.unwrap();

  let q = TouristQuery { group: "first".into(), ..Default::default() };
  let err = search::tourists(&s, &q, deadline()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::Parameter { name: "group", .. })));
  assert_eq!(err.kind(), ErrorKind::Parameter);
  assert_eq!(err.to_string(), "invalid value \"first\" for parameter `group`");
}

#[tokio::test]
async fn persons_by_birth_year_and_age() {
  let s = store().await;
  let sec = section(&s, "one").await;
  let young = person(&s, "Young").await;
  let old = person(&s, "Old").await;
  for p in [&young, &old] {
    s.set_role(p.id, sec, role::TOURIST).await.unwrap();
  }
  // January 1st: the birthday has always passed this year.
  let thirty = date(today().year() - 30, 1, 1);
  let sixty = date(today().year() - 60, 1, 1);
  s.set_attr_value(young.id, well_known::BIRTH_DATE, AttrValue::Date(thirty)).await.unwrap();
  s.set_attr_value(old.id, well_known::BIRTH_DATE, AttrValue::Date(sixty)).await.unwrap();

  let aged = s
    .persons_aged(PersonKind::Tourist, well_known::BIRTH_DATE, 30)
    .await
    .unwrap();
  assert_eq!(aged, vec![young.clone()]);

  let born = s
    .persons_born_in(PersonKind::Tourist, well_known::BIRTH_DATE, i64::from(sixty.year()))
    .await
    .unwrap();
  assert_eq!(born, vec![old]);

  // Trainers see nobody: neither person holds the trainer role.
  let aged = s
    .persons_aged(PersonKind::Trainer, well_known::BIRTH_DATE, 30)
    .await
    .unwrap();
  assert!(aged.is_empty());
}

#[tokio::test]
async fn trainers_by_specialization() {
  let s = store().await;
  let sec = section(&s, "one").await;
  let a = person(&s, "A").await;
  let b = person(&s, "B").await;
  for p in [&a, &b] {
    s.set_role(p.id, sec, role::TRAINER).await.unwrap();
  }
  s.set_attr_value(a.id, well_known::SPECIALIZATION, AttrValue::Text("climbing".into()))
    .await
    .unwrap();
  s.set_attr_value(b.id, well_known::SPECIALIZATION, AttrValue::Text("rafting".into()))
    .await
    .unwrap();

  let q = search::TrainerQuery { specialization: "rafting".into(), ..Default::default() };
  assert_eq!(search::trainers(&s, &q, deadline()).await.unwrap(), vec![b]);
}

// ─── Groups and sections ─────────────────────────────────────────────────────

#[tokio::test]
async fn missing_group_is_none() {
  let s = store().await;
  assert!(s.get_group(999).await.unwrap().is_none());
}

#[tokio::test]
async fn group_membership() {
  let s = store().await;
  let sec = section(&s, "water").await;
  let g = s.create_group(NewGroup { group_number: 11, section: sec }).await.unwrap();
  let p = person(&s, "Member").await;

  s.add_group_member(g, p.id).await.unwrap();
  s.add_group_member(g, p.id).await.unwrap();
  assert_eq!(s.persons_in_group(g).await.unwrap(), vec![p.clone()]);
  assert_eq!(s.section_groups(sec).await.unwrap().len(), 1);

  s.remove_group_member(g, p.id).await.unwrap();
  assert!(s.persons_in_group(g).await.unwrap().is_empty());
}

#[tokio::test]
async fn member_of_missing_group_is_a_parameter_error() {
  let s = store().await;
  let p = person(&s, "Lost").await;
  let err = s.add_group_member(12345, p.id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Parameter);
}

#[tokio::test]
async fn deleting_a_section_removes_its_groups() {
  let s = store().await;
  let sec = section(&s, "ski").await;
  let g = s.create_group(NewGroup { group_number: 1, section: sec }).await.unwrap();
  s.delete_section(sec).await.unwrap();
  assert!(s.get_group(g).await.unwrap().is_none());
  assert!(s.list_sections().await.unwrap().is_empty());
}

// ─── Championships ───────────────────────────────────────────────────────────

#[tokio::test]
async fn upcoming_championships_need_a_sportsman() {
  let s = store().await;
  let sec1 = section(&s, "one").await;
  let sec2 = section(&s, "two").await;
  let sportsman = person(&s, "Fast").await;
  let tourist = person(&s, "Slow").await;
  s.set_role(sportsman.id, sec1, role::SPORTSMAN).await.unwrap();
  s.set_role(tourist.id, sec2, role::TOURIST).await.unwrap();

  let next_year = today().checked_add_days(Days::new(365)).unwrap();
  let last_year = today().checked_sub_days(Days::new(365)).unwrap();
  let future = s
    .create_championship(NewChampionship { title: "Cup".into(), date: next_year })
    .await
    .unwrap();
  let past = s
    .create_championship(NewChampionship { title: "Old cup".into(), date: last_year })
    .await
    .unwrap();
  let tourists_only = s
    .create_championship(NewChampionship { title: "Fun run".into(), date: next_year })
    .await
    .unwrap();
  s.add_championship_participant(future, sportsman.id).await.unwrap();
  s.add_championship_participant(past, sportsman.id).await.unwrap();
  s.add_championship_participant(tourists_only, tourist.id).await.unwrap();

  let upcoming = s.championships_upcoming().await.unwrap();
  assert_eq!(upcoming.len(), 1);
  assert_eq!(upcoming[0].id, future);
  assert_eq!(upcoming[0].date, next_year);

  assert_eq!(s.championships_by_section(sec1).await.unwrap().len(), 1);
  assert!(s.championships_by_section(sec2).await.unwrap().is_empty());
}

// ─── Routes and tours ────────────────────────────────────────────────────────

#[tokio::test]
async fn route_geo_filters() {
  let s = store().await;
  let short = route(&s, 10, 1).await;
  let long = route(&s, 80, 3).await;
  let place = s.create_place("Lake".into()).await.unwrap();
  s.link_place(place, long).await.unwrap();

  let ids = |v: Vec<tourclub_core::tour::RouteRef>| v.into_iter().map(|r| r.id).collect::<Vec<_>>();
  assert_eq!(ids(s.routes().await.unwrap()), vec![short, long]);
  assert_eq!(ids(s.routes_by_length(10).await.unwrap()), vec![short, long]);
  assert_eq!(ids(s.routes_by_length(11).await.unwrap()), vec![long]);
  assert_eq!(ids(s.routes_by_difficulty(1).await.unwrap()), vec![short]);
  assert_eq!(ids(s.routes_by_place(place).await.unwrap()), vec![long]);
  assert_eq!(s.route_types().await.unwrap().len(), 4);
}

#[tokio::test]
async fn tours_drive_route_and_tourist_filters() {
  let s = store().await;
  let sec = section(&s, "hiking").await;
  let g = s.create_group(NewGroup { group_number: 3, section: sec }).await.unwrap();
  let guide = person(&s, "Guide").await;
  let walker = person(&s, "Walker").await;
  let idler = person(&s, "Idler").await;
  for p in [&walker, &idler] {
    s.set_role(p.id, sec, role::TOURIST).await.unwrap();
  }

  let r1 = route(&s, 20, 2).await;
  let r2 = route(&s, 40, 2).await;
  let start = today().checked_sub_days(Days::new(10)).unwrap();
  let finished = s
    .create_tour(NewTour { route: r1, instructor: guide.id, group: Some(g), start, duration_days: 3 })
    .await
    .unwrap();
  s.add_tour_participant(finished, walker.id).await.unwrap();

  assert_eq!(s.tourists_on_tour(finished).await.unwrap(), vec![walker.clone()]);
  assert_eq!(s.tourists_by_tour_count(1).await.unwrap(), vec![walker.clone()]);
  assert_eq!(s.tourists_by_route(r1).await.unwrap(), vec![walker.clone()]);
  assert_eq!(s.tourists_completed_route(r1).await.unwrap(), vec![walker.clone()]);

  let during = start.checked_add_days(Days::new(2)).unwrap();
  let after = start.checked_add_days(Days::new(3)).unwrap();
  assert_eq!(s.tourists_on_tour_at(during).await.unwrap(), vec![walker.clone()]);
  assert!(s.tourists_on_tour_at(after).await.unwrap().is_empty());

  // Two routes exist and only one is completed.
  assert!(s.tourists_completed_all().await.unwrap().is_empty());
  let second = s
    .create_tour(NewTour { route: r2, instructor: guide.id, group: None, start, duration_days: 1 })
    .await
    .unwrap();
  s.add_tour_participant(second, walker.id).await.unwrap();
  assert_eq!(s.tourists_completed_all().await.unwrap(), vec![walker]);

  let ids = |v: Vec<tourclub_core::tour::RouteRef>| v.into_iter().map(|r| r.id).collect::<Vec<_>>();
  assert_eq!(ids(s.routes_by_section(sec).await.unwrap()), vec![r1]);
  assert_eq!(ids(s.routes_by_instructor(guide.id).await.unwrap()), vec![r1, r2]);
  assert_eq!(ids(s.routes_by_group_count(1).await.unwrap()), vec![r1]);
  assert_eq!(ids(s.routes_in_period(start, start).await.unwrap()), vec![r1, r2]);

  assert_eq!(s.instructors().await.unwrap(), vec![guide.clone()]);
  assert_eq!(s.instructors_by_tour_count(2).await.unwrap(), vec![guide.clone()]);
  assert_eq!(s.instructors_by_category(1, 2).await.unwrap(), vec![guide.clone()]);
  assert!(s.instructors_by_category(1, 5).await.unwrap().is_empty());
  assert_eq!(s.instructors_by_tour(second).await.unwrap(), vec![guide]);
}

#[tokio::test]
async fn place_and_role_narrow_instructors_and_tourists() {
  let s = store().await;
  let sec = section(&s, "hiking").await;
  let trainer = person(&s, "Trainer").await;
  let manager = person(&s, "Manager").await;
  let rower = person(&s, "Rower").await;
  let bystander = person(&s, "Bystander").await;
  s.set_role(trainer.id, sec, role::TRAINER).await.unwrap();
  s.set_role(manager.id, sec, role::MANAGER).await.unwrap();
  for p in [&rower, &bystander] {
    s.set_role(p.id, sec, role::TOURIST).await.unwrap();
  }

  let lake_route = route(&s, 10, 1).await;
  let hill_route = route(&s, 20, 1).await;
  let lake = s.create_place("Lake".into()).await.unwrap();
  let hill = s.create_place("Hill".into()).await.unwrap();
  s.link_place(lake, lake_route).await.unwrap();
  s.link_place(hill, hill_route).await.unwrap();

  for (r, guide, tourist) in [(lake_route, &trainer, &rower), (hill_route, &manager, &bystander)] {
    let tour = s
      .create_tour(NewTour {
        route:         r,
        instructor:    guide.id,
        group:         None,
        start:         date(2023, 7, 1),
        duration_days: 2,
      })
      .await
      .unwrap();
    s.add_tour_participant(tour, tourist.id).await.unwrap();
  }

  assert_eq!(s.instructors_by_role(role::TRAINER).await.unwrap(), vec![trainer.clone()]);
  assert_eq!(s.instructors_by_role(role::MANAGER).await.unwrap(), vec![manager.clone()]);
  // Tourists hold a role but never led a tour.
  assert!(s.instructors_by_role(role::TOURIST).await.unwrap().is_empty());

  assert_eq!(s.instructors_by_place(lake).await.unwrap(), vec![trainer]);
  assert_eq!(s.instructors_by_place(hill).await.unwrap(), vec![manager]);
  assert_eq!(s.tourists_by_place(lake).await.unwrap(), vec![rower]);
  assert_eq!(s.tourists_by_place(hill).await.unwrap(), vec![bystander]);
}

#[tokio::test]
async fn tourist_trained_by_their_instructor() {
  let s = store().await;
  let sec = section(&s, "mountain").await;
  let g = s.create_group(NewGroup { group_number: 7, section: sec }).await.unwrap();
  let coach = person(&s, "Coach").await;
  let pupil = person(&s, "Pupil").await;
  let stranger = person(&s, "Stranger").await;
  for p in [&pupil, &stranger] {
    s.set_role(p.id, sec, role::TOURIST).await.unwrap();
  }
  s.add_group_member(g, pupil.id).await.unwrap();
  s.create_workout(NewWorkout { trainer: coach.id, workout_type: "climb".into(), groups: vec![g] })
    .await
    .unwrap();

  let r = route(&s, 5, 1).await;
  let tour = s
    .create_tour(NewTour {
      route: r,
      instructor: coach.id,
      group: None,
      start: date(2024, 6, 1),
      duration_days: 2,
    })
    .await
    .unwrap();
  s.add_tour_participant(tour, pupil.id).await.unwrap();
  s.add_tour_participant(tour, stranger.id).await.unwrap();

  assert_eq!(s.tourists_with_trainer_instructor().await.unwrap(), vec![pupil]);
}

// ─── Workouts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn strain_sums_sessions_per_workout_type() {
  let s = store().await;
  let sec = section(&s, "one").await;
  let g = s.create_group(NewGroup { group_number: 5, section: sec }).await.unwrap();
  let trainer = person(&s, "Trainer").await;
  let other = person(&s, "Other").await;

  let run = s
    .create_workout(NewWorkout { trainer: trainer.id, workout_type: "run".into(), groups: vec![g] })
    .await
    .unwrap();
  let swim = s
    .create_workout(NewWorkout { trainer: trainer.id, workout_type: "swim".into(), groups: vec![] })
    .await
    .unwrap();
  let foreign = s
    .create_workout(NewWorkout { trainer: other.id, workout_type: "run".into(), groups: vec![] })
    .await
    .unwrap();

  let sessions = [
    (run, date(2024, 1, 5), time(10, 0, 0), time(11, 30, 0)),
    (run, date(2024, 1, 20), time(18, 0, 0), time(18, 45, 30)),
    (swim, date(2024, 1, 31), time(7, 0, 0), time(8, 0, 0)),
    (run, date(2024, 2, 1), time(9, 0, 0), time(10, 0, 0)),
    (foreign, date(2024, 1, 10), time(9, 0, 0), time(12, 0, 0)),
  ];
  for (workout, date, start_time, finish_time) in sessions {
    s.add_session(NewSession { workout, date, start_time, finish_time }).await.unwrap();
  }

  let strain = s.strain(trainer.id, date(2024, 1, 1), date(2024, 1, 31)).await.unwrap();
  let rows: Vec<_> = strain
    .iter()
    .map(|s| (s.workout_type.as_str(), s.duration_hhmm()))
    .collect();
  assert_eq!(rows, [("run", "02:15".to_owned()), ("swim", "01:00".to_owned())]);

  let trainers = s
    .trainers_by_workout(5, date(2024, 1, 1), date(2024, 1, 31))
    .await
    .unwrap();
  assert_eq!(trainers, vec![trainer]);
  assert!(s.trainers_by_workout(6, date(2024, 1, 1), date(2024, 1, 31)).await.unwrap().is_empty());
}

// ─── Connection ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn ping_and_close() {
  let s = store().await;
  s.ping().await.unwrap();
  s.close().await.unwrap();
}

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let dir = std::env::temp_dir().join(format!("tourclub-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("reopen.db");
  let _ = std::fs::remove_file(&path);

  let s = SqliteStore::open(&path).await.unwrap();
  let id = s.create_section("kept".into()).await.unwrap();
  s.close().await.unwrap();

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.get_section(id).await.unwrap().unwrap().title, "kept");
  assert_eq!(s.list_roles().await.unwrap().len(), 4);
  s.close().await.unwrap();
  let _ = std::fs::remove_dir_all(&dir);
}
