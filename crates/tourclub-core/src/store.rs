//! The `ClubStore` trait: one method per record accessor.
//!
//! Implemented by storage backends (e.g. `tourclub-store-sqlite`). The HTTP
//! layer and the search compositions depend on this abstraction only.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  StoreError,
  attribute::{AttrKind, AttrValue, AttributeDef, NewAttribute},
  org::{Championship, Group, NewChampionship, NewGroup, Section},
  person::{NewPerson, Person, PersonKind, Role},
  tour::{NewRoute, NewSession, NewTour, NewWorkout, RouteRef, RouteType, Strain},
};

/// Abstraction over a tourist-club store backend.
///
/// Each method issues a single statement (creates additionally read back the
/// generated id). A lookup that matches nothing is `Ok(None)` or an empty
/// vector, never an error.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait ClubStore: Send + Sync {
  type Error: StoreError;

  /// Cheap liveness probe.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Insert a person and return the generated id.
  fn create_person(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Replace every mutable field of the person with `person.id`.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Roles ─────────────────────────────────────────────────────────────

  fn get_role(
    &self,
    person: i64,
    section: i64,
  ) -> impl Future<Output = Result<Option<i64>, Self::Error>> + Send + '_;

  /// Assign `role` to the person within the section, replacing any role the
  /// pair already has in a single statement.
  fn set_role(
    &self,
    person: i64,
    section: i64,
    role: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_role(
    &self,
    person: i64,
    section: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The role dictionary.
  fn list_roles(
    &self,
  ) -> impl Future<Output = Result<Vec<Role>, Self::Error>> + Send + '_;

  // ── Attribute definitions ─────────────────────────────────────────────

  fn create_attribute(
    &self,
    attribute: NewAttribute,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn get_attribute(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<AttributeDef>, Self::Error>> + Send + '_;

  fn list_attributes(
    &self,
  ) -> impl Future<Output = Result<Vec<AttributeDef>, Self::Error>> + Send + '_;

  fn update_attribute(
    &self,
    attribute: AttributeDef,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_attribute(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Attribute values ──────────────────────────────────────────────────

  /// Read a value through the table of `kind`. A value stored under another
  /// kind is not visible.
  fn get_attr_value(
    &self,
    person: i64,
    attribute: i64,
    kind: AttrKind,
  ) -> impl Future<Output = Result<Option<AttrValue>, Self::Error>> + Send + '_;

  /// Upsert a value. Fails with [`crate::Error::UnknownAttribute`] or
  /// [`crate::Error::AttributeTypeMismatch`] when the definition does not
  /// admit the value's kind.
  fn set_attr_value(
    &self,
    person: i64,
    attribute: i64,
    value: AttrValue,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_attr_value(
    &self,
    person: i64,
    attribute: i64,
    kind: AttrKind,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Person sets ───────────────────────────────────────────────────────

  /// Every person holding one of the kind's roles in any section.
  fn persons_of_kind(
    &self,
    kind: PersonKind,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn persons_in_section(
    &self,
    kind: PersonKind,
    section: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Members of a group, whatever their role.
  fn persons_in_group(
    &self,
    group: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn persons_with_int_attr(
    &self,
    kind: PersonKind,
    attribute: i64,
    value: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn persons_with_text_attr(
    &self,
    kind: PersonKind,
    attribute: i64,
    value: String,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Persons whose date attribute falls in `year`.
  fn persons_born_in(
    &self,
    kind: PersonKind,
    attribute: i64,
    year: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Persons whose date attribute lies exactly `age` whole years before the
  /// store's current date.
  fn persons_aged(
    &self,
    kind: PersonKind,
    attribute: i64,
    age: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  // ── Groups ────────────────────────────────────────────────────────────

  fn create_group(
    &self,
    group: NewGroup,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn get_group(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Group>, Self::Error>> + Send + '_;

  fn update_group(
    &self,
    group: Group,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_group(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_groups(
    &self,
  ) -> impl Future<Output = Result<Vec<Group>, Self::Error>> + Send + '_;

  fn add_group_member(
    &self,
    group: i64,
    person: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn remove_group_member(
    &self,
    group: i64,
    person: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Sections ──────────────────────────────────────────────────────────

  fn create_section(
    &self,
    title: String,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn get_section(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Section>, Self::Error>> + Send + '_;

  fn update_section(
    &self,
    section: Section,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_section(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_sections(
    &self,
  ) -> impl Future<Output = Result<Vec<Section>, Self::Error>> + Send + '_;

  fn section_groups(
    &self,
    section: i64,
  ) -> impl Future<Output = Result<Vec<Group>, Self::Error>> + Send + '_;

  // ── Championships ─────────────────────────────────────────────────────

  fn create_championship(
    &self,
    championship: NewChampionship,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn add_championship_participant(
    &self,
    championship: i64,
    person: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Championships dated after today with at least one sportsman taking
  /// part.
  fn championships_upcoming(
    &self,
  ) -> impl Future<Output = Result<Vec<Championship>, Self::Error>> + Send + '_;

  /// Upcoming championships with a sportsman of `section` taking part.
  fn championships_by_section(
    &self,
    section: i64,
  ) -> impl Future<Output = Result<Vec<Championship>, Self::Error>> + Send + '_;

  // ── Routes ────────────────────────────────────────────────────────────

  fn create_route(
    &self,
    route: NewRoute,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn create_place(
    &self,
    title: String,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn link_place(
    &self,
    place: i64,
    route: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn route_types(
    &self,
  ) -> impl Future<Output = Result<Vec<RouteType>, Self::Error>> + Send + '_;

  fn routes(
    &self,
  ) -> impl Future<Output = Result<Vec<RouteRef>, Self::Error>> + Send + '_;

  /// Routes walked on a tour by a group of the section.
  fn routes_by_section(
    &self,
    section: i64,
  ) -> impl Future<Output = Result<Vec<RouteRef>, Self::Error>> + Send + '_;

  fn routes_by_instructor(
    &self,
    instructor: i64,
  ) -> impl Future<Output = Result<Vec<RouteRef>, Self::Error>> + Send + '_;

  /// Routes walked by at least `min` distinct groups.
  fn routes_by_group_count(
    &self,
    min: i64,
  ) -> impl Future<Output = Result<Vec<RouteRef>, Self::Error>> + Send + '_;

  /// Routes with a tour starting within `from..=to`.
  fn routes_in_period(
    &self,
    from: NaiveDate,
    to: NaiveDate,
  ) -> impl Future<Output = Result<Vec<RouteRef>, Self::Error>> + Send + '_;

  fn routes_by_place(
    &self,
    place: i64,
  ) -> impl Future<Output = Result<Vec<RouteRef>, Self::Error>> + Send + '_;

  /// Routes at least `min_length` long.
  fn routes_by_length(
    &self,
    min_length: i64,
  ) -> impl Future<Output = Result<Vec<RouteRef>, Self::Error>> + Send + '_;

  fn routes_by_difficulty(
    &self,
    difficulty: i64,
  ) -> impl Future<Output = Result<Vec<RouteRef>, Self::Error>> + Send + '_;

  // ── Tours ─────────────────────────────────────────────────────────────

  fn create_tour(
    &self,
    tour: NewTour,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn add_tour_participant(
    &self,
    tour: i64,
    person: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Tourists who have started at least `min` tours.
  fn tourists_by_tour_count(
    &self,
    min: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn tourists_on_tour(
    &self,
    tour: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Tourists who were on a tour on `date`.
  fn tourists_on_tour_at(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn tourists_by_route(
    &self,
    route: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn tourists_by_place(
    &self,
    place: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Tourists who went on a tour led by someone who also trains one of
  /// their groups.
  fn tourists_with_trainer_instructor(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn tourists_completed_route(
    &self,
    route: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Tourists who have completed every route currently known.
  fn tourists_completed_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  // ── Instructors ───────────────────────────────────────────────────────

  /// Every person who has led a tour.
  fn instructors(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Instructors holding `role` in some section.
  fn instructors_by_role(
    &self,
    role: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Instructors who led a tour on a route of this type and difficulty.
  fn instructors_by_category(
    &self,
    route_type: i64,
    difficulty: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Instructors who have led at least `min` started tours.
  fn instructors_by_tour_count(
    &self,
    min: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn instructors_by_tour(
    &self,
    tour: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn instructors_by_place(
    &self,
    place: i64,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  // ── Workouts ──────────────────────────────────────────────────────────

  /// Create a workout description and attach it to its groups.
  fn create_workout(
    &self,
    workout: NewWorkout,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn add_session(
    &self,
    session: NewSession,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Trainers who held a session for the group numbered `group_number`
  /// within `from..=to`.
  fn trainers_by_workout(
    &self,
    group_number: i64,
    from: NaiveDate,
    to: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Total session time of the trainer within `from..=to`, one row per
  /// workout type.
  fn strain(
    &self,
    trainer: i64,
    from: NaiveDate,
    to: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Strain>, Self::Error>> + Send + '_;
}
