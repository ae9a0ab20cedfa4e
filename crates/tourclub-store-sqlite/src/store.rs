//! [`SqliteStore`]: the SQLite implementation of [`ClubStore`].

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{OptionalExtension as _, types::Value};

use tourclub_core::{
  attribute::{AttrKind, AttrValue, AttributeDef, NewAttribute},
  org::{Championship, Group, NewChampionship, NewGroup, Section},
  person::{NewPerson, Person, PersonKind, Role, role},
  store::ClubStore,
  tour::{NewRoute, NewSession, NewTour, NewWorkout, RouteRef, RouteType, Strain},
};

use crate::{
  Error, Result,
  encode::{
    PERSON_COLUMNS, RawAttribute, RawChampionship, decode_value, encode_date, encode_time,
    encode_value, holds_kind, holds_kind_in_section, person_from_row, value_table,
  },
  schema::SCHEMA,
};

/// A tour that started before today.
const STARTED: &str = "t.start < date('now')";

/// A tour whose last day is over.
const COMPLETED: &str = "date(t.start, '+' || t.duration_days || ' days') <= date('now')";

fn persons_where(condition: &str) -> String {
  format!("SELECT {PERSON_COLUMNS} FROM persons p WHERE {condition} ORDER BY p.id")
}

fn routes_where(condition: &str) -> String {
  format!("SELECT r.id FROM routes r WHERE {condition} ORDER BY r.id")
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tourist-club store backed by a single SQLite connection.
///
/// Statements run on the connection's dedicated thread, so the async runtime
/// is never blocked. Cloning is cheap; clones share the connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await.map_err(Error::Connection)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store; useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await.map_err(Error::Connection)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the connection once pending statements have finished.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await.map_err(|source| Error::Query { op: "close", source })
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::Connection)
  }

  /// Run `f` on the connection thread, tagging any failure with `op`.
  async fn call<R, F>(&self, op: &'static str, f: F) -> Result<R>
  where
    R: Send + 'static,
    F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<R> + Send + 'static,
  {
    tracing::debug!(op, "query");
    self
      .conn
      .call(move |conn| Ok(f(conn)?))
      .await
      .map_err(|source| Error::Query { op, source })
  }

  async fn execute(&self, op: &'static str, sql: &'static str, params: Vec<Value>) -> Result<()> {
    self
      .call(op, move |conn| {
        conn.execute(sql, rusqlite::params_from_iter(params))?;
        Ok(())
      })
      .await
  }

  /// Insert one row and return its generated id.
  async fn insert(&self, op: &'static str, sql: &'static str, params: Vec<Value>) -> Result<i64> {
    self
      .call(op, move |conn| {
        conn.execute(sql, rusqlite::params_from_iter(params))?;
        Ok(conn.last_insert_rowid())
      })
      .await
  }

  async fn persons(&self, op: &'static str, sql: String, params: Vec<Value>) -> Result<Vec<Person>> {
    self
      .call(op, move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        stmt
          .query_map(rusqlite::params_from_iter(params), person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await
  }

  async fn route_refs(
    &self,
    op: &'static str,
    sql: String,
    params: Vec<Value>,
  ) -> Result<Vec<RouteRef>> {
    self
      .call(op, move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        stmt
          .query_map(rusqlite::params_from_iter(params), |row| Ok(RouteRef { id: row.get(0)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await
  }

  async fn championships(
    &self,
    op: &'static str,
    extra: &'static str,
    params: Vec<Value>,
  ) -> Result<Vec<Championship>> {
    let sql = format!(
      "SELECT c.id, c.title, c.date FROM championships c
       WHERE c.date > date('now')
         AND EXISTS (
           SELECT 1 FROM persons_championships pc
           JOIN persons_roles r ON r.person = pc.person
           WHERE pc.championship = c.id AND r.role = {sportsman} {extra}
         )
       ORDER BY c.date, c.id",
      sportsman = role::SPORTSMAN,
    );
    let raws: Vec<RawChampionship> = self
      .call(op, move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        stmt
          .query_map(rusqlite::params_from_iter(params), RawChampionship::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await?;
    raws.into_iter().map(RawChampionship::into_championship).collect()
  }

  /// Persons of `kind` holding a value of a date attribute that satisfies
  /// `test`, an expression over `a.value` with `?2` bound to `arg`.
  async fn persons_by_date_attr(
    &self,
    op: &'static str,
    kind: PersonKind,
    attribute: i64,
    test: &str,
    arg: i64,
  ) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (
         SELECT 1 FROM persons_attrs_date a
         WHERE a.person = p.id AND a.attr = ?1 AND {test}
       )",
      holds_kind(kind),
    ));
    self.persons(op, sql, vec![attribute.into(), arg.into()]).await
  }
}

// ─── ClubStore impl ──────────────────────────────────────────────────────────

impl ClubStore for SqliteStore {
  type Error = Error;

  async fn ping(&self) -> Result<()> {
    self
      .call("ping", |conn| conn.query_row("SELECT 1", [], |_| Ok(())))
      .await
  }

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn create_person(&self, person: NewPerson) -> Result<i64> {
    self
      .insert(
        "create person",
        "INSERT INTO persons (name, surname, patronymic) VALUES (?1, ?2, ?3)",
        vec![person.name.into(), person.surname.into(), person.patronymic.into()],
      )
      .await
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    self
      .call("get person", move |conn| {
        conn
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM persons p WHERE p.id = ?1"),
            [id],
            person_from_row,
          )
          .optional()
      })
      .await
  }

  async fn update_person(&self, person: Person) -> Result<()> {
    self
      .execute(
        "update person",
        "UPDATE persons SET name = ?2, surname = ?3, patronymic = ?4 WHERE id = ?1",
        vec![
          person.id.into(),
          person.name.into(),
          person.surname.into(),
          person.patronymic.into(),
        ],
      )
      .await
  }

  async fn delete_person(&self, id: i64) -> Result<()> {
    self.execute("delete person", "DELETE FROM persons WHERE id = ?1", vec![id.into()]).await
  }

  // ── Roles ─────────────────────────────────────────────────────────────────

  async fn get_role(&self, person: i64, section: i64) -> Result<Option<i64>> {
    self
      .call("get role", move |conn| {
        conn
          .query_row(
            "SELECT role FROM persons_roles WHERE person = ?1 AND section = ?2",
            [person, section],
            |row| row.get(0),
          )
          .optional()
      })
      .await
  }

  async fn set_role(&self, person: i64, section: i64, role: i64) -> Result<()> {
    self
      .execute(
        "set role",
        "INSERT INTO persons_roles (person, section, role) VALUES (?1, ?2, ?3)
         ON CONFLICT (person, section) DO UPDATE SET role = excluded.role",
        vec![person.into(), section.into(), role.into()],
      )
      .await
  }

  async fn delete_role(&self, person: i64, section: i64) -> Result<()> {
    self
      .execute(
        "delete role",
        "DELETE FROM persons_roles WHERE person = ?1 AND section = ?2",
        vec![person.into(), section.into()],
      )
      .await
  }

  async fn list_roles(&self) -> Result<Vec<Role>> {
    self
      .call("list roles", |conn| {
        let mut stmt = conn.prepare("SELECT id, role FROM roles ORDER BY id")?;
        stmt
          .query_map([], |row| Ok(Role { id: row.get(0)?, role: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await
  }

  // ── Attribute definitions ─────────────────────────────────────────────────

  async fn create_attribute(&self, attribute: NewAttribute) -> Result<i64> {
    self
      .insert(
        "create attribute",
        "INSERT INTO attributes (attr, role, attr_type) VALUES (?1, ?2, ?3)",
        vec![
          attribute.name.into(),
          attribute.role.map_or(Value::Null, Value::from),
          attribute.kind.tag().into(),
        ],
      )
      .await
  }

  async fn get_attribute(&self, id: i64) -> Result<Option<AttributeDef>> {
    let raw = self
      .call("get attribute", move |conn| {
        conn
          .query_row(
            "SELECT id, attr, role, attr_type FROM attributes WHERE id = ?1",
            [id],
            RawAttribute::from_row,
          )
          .optional()
      })
      .await?;
    raw.map(RawAttribute::into_def).transpose()
  }

  async fn list_attributes(&self) -> Result<Vec<AttributeDef>> {
    let raws = self
      .call("list attributes", |conn| {
        let mut stmt = conn.prepare("SELECT id, attr, role, attr_type FROM attributes ORDER BY id")?;
        stmt
          .query_map([], RawAttribute::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await?;
    raws.into_iter().map(RawAttribute::into_def).collect()
  }

  async fn update_attribute(&self, attribute: AttributeDef) -> Result<()> {
    self
      .execute(
        "update attribute",
        "UPDATE attributes SET attr = ?2, role = ?3, attr_type = ?4 WHERE id = ?1",
        vec![
          attribute.id.into(),
          attribute.name.into(),
          attribute.role.map_or(Value::Null, Value::from),
          attribute.kind.tag().into(),
        ],
      )
      .await
  }

  async fn delete_attribute(&self, id: i64) -> Result<()> {
    self.execute("delete attribute", "DELETE FROM attributes WHERE id = ?1", vec![id.into()]).await
  }

  // ── Attribute values ──────────────────────────────────────────────────────

  async fn get_attr_value(
    &self,
    person: i64,
    attribute: i64,
    kind: AttrKind,
  ) -> Result<Option<AttrValue>> {
    let sql = format!("SELECT value FROM {} WHERE person = ?1 AND attr = ?2", value_table(kind));
    let raw: Option<Value> = self
      .call("get attribute value", move |conn| {
        conn.query_row(&sql, [person, attribute], |row| row.get(0)).optional()
      })
      .await?;
    raw.map(|v| decode_value(kind, v)).transpose()
  }

  async fn set_attr_value(&self, person: i64, attribute: i64, value: AttrValue) -> Result<()> {
    let kind = value.kind();
    let sql = format!(
      "INSERT INTO {} (person, attr, value) VALUES (?1, ?2, ?3)
       ON CONFLICT (person, attr) DO UPDATE SET value = excluded.value",
      value_table(kind),
    );
    let stored = encode_value(&value);

    // Type check and write share one call.
    let declared: Option<i64> = self
      .call("set attribute value", move |conn| {
        let declared: Option<i64> = conn
          .query_row("SELECT attr_type FROM attributes WHERE id = ?1", [attribute], |row| {
            row.get(0)
          })
          .optional()?;
        if declared == Some(kind.tag()) {
          conn.execute(&sql, rusqlite::params![person, attribute, stored])?;
        }
        Ok(declared)
      })
      .await?;

    match declared {
      None => Err(tourclub_core::Error::UnknownAttribute(attribute).into()),
      Some(tag) if tag == kind.tag() => Ok(()),
      Some(tag) => Err(
        tourclub_core::Error::AttributeTypeMismatch {
          attribute,
          declared: AttrKind::from_tag(tag)?,
          requested: kind,
        }
        .into(),
      ),
    }
  }

  async fn delete_attr_value(&self, person: i64, attribute: i64, kind: AttrKind) -> Result<()> {
    let sql = format!("DELETE FROM {} WHERE person = ?1 AND attr = ?2", value_table(kind));
    self
      .call("delete attribute value", move |conn| {
        conn.execute(&sql, [person, attribute])?;
        Ok(())
      })
      .await
  }

  // ── Person sets ───────────────────────────────────────────────────────────

  async fn persons_of_kind(&self, kind: PersonKind) -> Result<Vec<Person>> {
    self.persons("persons of kind", persons_where(&holds_kind(kind)), vec![]).await
  }

  async fn persons_in_section(&self, kind: PersonKind, section: i64) -> Result<Vec<Person>> {
    let sql = persons_where(&holds_kind_in_section(kind));
    self.persons("persons in section", sql, vec![section.into()]).await
  }

  async fn persons_in_group(&self, group: i64) -> Result<Vec<Person>> {
    let sql = persons_where(
      "EXISTS (SELECT 1 FROM groups_persons gp WHERE gp.person = p.id AND gp.group_id = ?1)",
    );
    self.persons("persons in group", sql, vec![group.into()]).await
  }

  async fn persons_with_int_attr(
    &self,
    kind: PersonKind,
    attribute: i64,
    value: i64,
  ) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (
         SELECT 1 FROM persons_attrs_int a
         WHERE a.person = p.id AND a.attr = ?1 AND a.value = ?2
       )",
      holds_kind(kind),
    ));
    self.persons("persons with int attribute", sql, vec![attribute.into(), value.into()]).await
  }

  async fn persons_with_text_attr(
    &self,
    kind: PersonKind,
    attribute: i64,
    value: String,
  ) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (
         SELECT 1 FROM persons_attrs_text a
         WHERE a.person = p.id AND a.attr = ?1 AND a.value = ?2
       )",
      holds_kind(kind),
    ));
    self.persons("persons with text attribute", sql, vec![attribute.into(), value.into()]).await
  }

  async fn persons_born_in(&self, kind: PersonKind, attribute: i64, year: i64) -> Result<Vec<Person>> {
    self
      .persons_by_date_attr(
        "persons by date year",
        kind,
        attribute,
        "CAST(strftime('%Y', a.value) AS INTEGER) = ?2",
        year,
      )
      .await
  }

  async fn persons_aged(&self, kind: PersonKind, attribute: i64, age: i64) -> Result<Vec<Person>> {
    self
      .persons_by_date_attr(
        "persons by age",
        kind,
        attribute,
        "CAST(strftime('%Y', 'now') AS INTEGER) - CAST(strftime('%Y', a.value) AS INTEGER)
           - (strftime('%m-%d', 'now') < strftime('%m-%d', a.value)) = ?2",
        age,
      )
      .await
  }

  // ── Groups ────────────────────────────────────────────────────────────────

  async fn create_group(&self, group: NewGroup) -> Result<i64> {
    self
      .insert(
        "create group",
        "INSERT INTO club_groups (group_number, section) VALUES (?1, ?2)",
        vec![group.group_number.into(), group.section.into()],
      )
      .await
  }

  async fn get_group(&self, id: i64) -> Result<Option<Group>> {
    self
      .call("get group", move |conn| {
        conn
          .query_row(
            "SELECT id, group_number, section FROM club_groups WHERE id = ?1",
            [id],
            |row| Ok(Group { id: row.get(0)?, group_number: row.get(1)?, section: row.get(2)? }),
          )
          .optional()
      })
      .await
  }

  async fn update_group(&self, group: Group) -> Result<()> {
    self
      .execute(
        "update group",
        "UPDATE club_groups SET group_number = ?2, section = ?3 WHERE id = ?1",
        vec![group.id.into(), group.group_number.into(), group.section.into()],
      )
      .await
  }

  async fn delete_group(&self, id: i64) -> Result<()> {
    self.execute("delete group", "DELETE FROM club_groups WHERE id = ?1", vec![id.into()]).await
  }

  async fn list_groups(&self) -> Result<Vec<Group>> {
    self
      .call("list groups", |conn| {
        let mut stmt =
          conn.prepare("SELECT id, group_number, section FROM club_groups ORDER BY id")?;
        stmt
          .query_map([], |row| {
            Ok(Group { id: row.get(0)?, group_number: row.get(1)?, section: row.get(2)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await
  }

  async fn add_group_member(&self, group: i64, person: i64) -> Result<()> {
    self
      .execute(
        "add group member",
        "INSERT OR IGNORE INTO groups_persons (group_id, person) VALUES (?1, ?2)",
        vec![group.into(), person.into()],
      )
      .await
  }

  async fn remove_group_member(&self, group: i64, person: i64) -> Result<()> {
    self
      .execute(
        "remove group member",
        "DELETE FROM groups_persons WHERE group_id = ?1 AND person = ?2",
        vec![group.into(), person.into()],
      )
      .await
  }

  // ── Sections ──────────────────────────────────────────────────────────────

  async fn create_section(&self, title: String) -> Result<i64> {
    self
      .insert("create section", "INSERT INTO sections (title) VALUES (?1)", vec![title.into()])
      .await
  }

  async fn get_section(&self, id: i64) -> Result<Option<Section>> {
    self
      .call("get section", move |conn| {
        conn
          .query_row("SELECT id, title FROM sections WHERE id = ?1", [id], |row| {
            Ok(Section { id: row.get(0)?, title: row.get(1)? })
          })
          .optional()
      })
      .await
  }

  async fn update_section(&self, section: Section) -> Result<()> {
    self
      .execute(
        "update section",
        "UPDATE sections SET title = ?2 WHERE id = ?1",
        vec![section.id.into(), section.title.into()],
      )
      .await
  }

  async fn delete_section(&self, id: i64) -> Result<()> {
    self.execute("delete section", "DELETE FROM sections WHERE id = ?1", vec![id.into()]).await
  }

  async fn list_sections(&self) -> Result<Vec<Section>> {
    self
      .call("list sections", |conn| {
        let mut stmt = conn.prepare("SELECT id, title FROM sections ORDER BY id")?;
        stmt
          .query_map([], |row| Ok(Section { id: row.get(0)?, title: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await
  }

  async fn section_groups(&self, section: i64) -> Result<Vec<Group>> {
    self
      .call("section groups", move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, group_number, section FROM club_groups WHERE section = ?1 ORDER BY id",
        )?;
        stmt
          .query_map([section], |row| {
            Ok(Group { id: row.get(0)?, group_number: row.get(1)?, section: row.get(2)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await
  }

  // ── Championships ─────────────────────────────────────────────────────────

  async fn create_championship(&self, championship: NewChampionship) -> Result<i64> {
    self
      .insert(
        "create championship",
        "INSERT INTO championships (title, date) VALUES (?1, ?2)",
        vec![championship.title.into(), encode_date(championship.date).into()],
      )
      .await
  }

  async fn add_championship_participant(&self, championship: i64, person: i64) -> Result<()> {
    self
      .execute(
        "add championship participant",
        "INSERT OR IGNORE INTO persons_championships (person, championship) VALUES (?1, ?2)",
        vec![person.into(), championship.into()],
      )
      .await
  }

  async fn championships_upcoming(&self) -> Result<Vec<Championship>> {
    self.championships("upcoming championships", "", vec![]).await
  }

  async fn championships_by_section(&self, section: i64) -> Result<Vec<Championship>> {
    self
      .championships("championships by section", "AND r.section = ?1", vec![section.into()])
      .await
  }

  // ── Routes ────────────────────────────────────────────────────────────────

  async fn create_route(&self, route: NewRoute) -> Result<i64> {
    self
      .insert(
        "create route",
        "INSERT INTO routes (title, type, difficulty, length) VALUES (?1, ?2, ?3, ?4)",
        vec![
          route.title.into(),
          route.route_type.into(),
          route.difficulty.into(),
          route.length.into(),
        ],
      )
      .await
  }

  async fn create_place(&self, title: String) -> Result<i64> {
    self.insert("create place", "INSERT INTO places (title) VALUES (?1)", vec![title.into()]).await
  }

  async fn link_place(&self, place: i64, route: i64) -> Result<()> {
    self
      .execute(
        "link place",
        "INSERT OR IGNORE INTO places_routes (place, route) VALUES (?1, ?2)",
        vec![place.into(), route.into()],
      )
      .await
  }

  async fn route_types(&self) -> Result<Vec<RouteType>> {
    self
      .call("route types", |conn| {
        let mut stmt = conn.prepare("SELECT id, type FROM route_types ORDER BY id")?;
        stmt
          .query_map([], |row| Ok(RouteType { id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await
  }

  async fn routes(&self) -> Result<Vec<RouteRef>> {
    self.route_refs("routes", routes_where("1"), vec![]).await
  }

  async fn routes_by_section(&self, section: i64) -> Result<Vec<RouteRef>> {
    let sql = routes_where(
      "EXISTS (
         SELECT 1 FROM tours t JOIN club_groups g ON g.id = t.group_id
         WHERE t.route = r.id AND g.section = ?1
       )",
    );
    self.route_refs("routes by section", sql, vec![section.into()]).await
  }

  async fn routes_by_instructor(&self, instructor: i64) -> Result<Vec<RouteRef>> {
    let sql =
      routes_where("EXISTS (SELECT 1 FROM tours t WHERE t.route = r.id AND t.instructor = ?1)");
    self.route_refs("routes by instructor", sql, vec![instructor.into()]).await
  }

  async fn routes_by_group_count(&self, min: i64) -> Result<Vec<RouteRef>> {
    let sql =
      routes_where("(SELECT COUNT(DISTINCT t.group_id) FROM tours t WHERE t.route = r.id) >= ?1");
    self.route_refs("routes by group count", sql, vec![min.into()]).await
  }

  async fn routes_in_period(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<RouteRef>> {
    let sql = routes_where(
      "EXISTS (SELECT 1 FROM tours t WHERE t.route = r.id AND t.start BETWEEN ?1 AND ?2)",
    );
    self
      .route_refs("routes in period", sql, vec![encode_date(from).into(), encode_date(to).into()])
      .await
  }

  async fn routes_by_place(&self, place: i64) -> Result<Vec<RouteRef>> {
    let sql = routes_where(
      "EXISTS (SELECT 1 FROM places_routes pr WHERE pr.route = r.id AND pr.place = ?1)",
    );
    self.route_refs("routes by place", sql, vec![place.into()]).await
  }

  async fn routes_by_length(&self, min_length: i64) -> Result<Vec<RouteRef>> {
    self.route_refs("routes by length", routes_where("r.length >= ?1"), vec![min_length.into()]).await
  }

  async fn routes_by_difficulty(&self, difficulty: i64) -> Result<Vec<RouteRef>> {
    self
      .route_refs("routes by difficulty", routes_where("r.difficulty = ?1"), vec![difficulty.into()])
      .await
  }

  // ── Tours ─────────────────────────────────────────────────────────────────

  async fn create_tour(&self, tour: NewTour) -> Result<i64> {
    self
      .insert(
        "create tour",
        "INSERT INTO tours (route, instructor, group_id, start, duration_days)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        vec![
          tour.route.into(),
          tour.instructor.into(),
          tour.group.map_or(Value::Null, Value::from),
          encode_date(tour.start).into(),
          tour.duration_days.into(),
        ],
      )
      .await
  }

  async fn add_tour_participant(&self, tour: i64, person: i64) -> Result<()> {
    self
      .execute(
        "add tour participant",
        "INSERT OR IGNORE INTO persons_tours (person, tour) VALUES (?1, ?2)",
        vec![person.into(), tour.into()],
      )
      .await
  }

  async fn tourists_by_tour_count(&self, min: i64) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND (
         SELECT COUNT(*) FROM persons_tours pt JOIN tours t ON t.id = pt.tour
         WHERE pt.person = p.id AND {STARTED}
       ) >= ?1",
      holds_kind(PersonKind::Tourist),
    ));
    self.persons("tourists by tour count", sql, vec![min.into()]).await
  }

  async fn tourists_on_tour(&self, tour: i64) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (SELECT 1 FROM persons_tours pt WHERE pt.person = p.id AND pt.tour = ?1)",
      holds_kind(PersonKind::Tourist),
    ));
    self.persons("tourists on tour", sql, vec![tour.into()]).await
  }

  async fn tourists_on_tour_at(&self, date: NaiveDate) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (
         SELECT 1 FROM persons_tours pt JOIN tours t ON t.id = pt.tour
         WHERE pt.person = p.id
           AND t.start <= ?1
           AND ?1 < date(t.start, '+' || t.duration_days || ' days')
       )",
      holds_kind(PersonKind::Tourist),
    ));
    self.persons("tourists on tour at", sql, vec![encode_date(date).into()]).await
  }

  async fn tourists_by_route(&self, route: i64) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (
         SELECT 1 FROM persons_tours pt JOIN tours t ON t.id = pt.tour
         WHERE pt.person = p.id AND t.route = ?1
       )",
      holds_kind(PersonKind::Tourist),
    ));
    self.persons("tourists by route", sql, vec![route.into()]).await
  }

  async fn tourists_by_place(&self, place: i64) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (
         SELECT 1 FROM persons_tours pt
         JOIN tours t          ON t.id = pt.tour
         JOIN places_routes pr ON pr.route = t.route
         WHERE pt.person = p.id AND pr.place = ?1
       )",
      holds_kind(PersonKind::Tourist),
    ));
    self.persons("tourists by place", sql, vec![place.into()]).await
  }

  async fn tourists_with_trainer_instructor(&self) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (
         SELECT 1 FROM persons_tours pt
         JOIN tours t                 ON t.id = pt.tour
         JOIN workout_descriptions wd ON wd.trainer = t.instructor
         JOIN groups_workouts gw      ON gw.workout = wd.id
         JOIN groups_persons gp       ON gp.group_id = gw.group_id
         WHERE pt.person = p.id AND gp.person = p.id
       )",
      holds_kind(PersonKind::Tourist),
    ));
    self.persons("tourists with trainer instructor", sql, vec![]).await
  }

  async fn tourists_completed_route(&self, route: i64) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND EXISTS (
         SELECT 1 FROM persons_tours pt JOIN tours t ON t.id = pt.tour
         WHERE pt.person = p.id AND t.route = ?1 AND {COMPLETED}
       )",
      holds_kind(PersonKind::Tourist),
    ));
    self.persons("tourists completed route", sql, vec![route.into()]).await
  }

  async fn tourists_completed_all(&self) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "{} AND (
         SELECT COUNT(DISTINCT t.route) FROM persons_tours pt JOIN tours t ON t.id = pt.tour
         WHERE pt.person = p.id AND {COMPLETED}
       ) = (SELECT COUNT(*) FROM routes)",
      holds_kind(PersonKind::Tourist),
    ));
    self.persons("tourists completed all routes", sql, vec![]).await
  }

  // ── Instructors ───────────────────────────────────────────────────────────

  async fn instructors(&self) -> Result<Vec<Person>> {
    let sql = persons_where("EXISTS (SELECT 1 FROM tours t WHERE t.instructor = p.id)");
    self.persons("instructors", sql, vec![]).await
  }

  async fn instructors_by_role(&self, role: i64) -> Result<Vec<Person>> {
    let sql = persons_where(
      "EXISTS (SELECT 1 FROM tours t WHERE t.instructor = p.id)
       AND EXISTS (SELECT 1 FROM persons_roles r WHERE r.person = p.id AND r.role = ?1)",
    );
    self.persons("instructors by role", sql, vec![role.into()]).await
  }

  async fn instructors_by_category(&self, route_type: i64, difficulty: i64) -> Result<Vec<Person>> {
    let sql = persons_where(
      "EXISTS (
         SELECT 1 FROM tours t JOIN routes r ON r.id = t.route
         WHERE t.instructor = p.id AND r.type = ?1 AND r.difficulty = ?2
       )",
    );
    self
      .persons("instructors by category", sql, vec![route_type.into(), difficulty.into()])
      .await
  }

  async fn instructors_by_tour_count(&self, min: i64) -> Result<Vec<Person>> {
    let sql = persons_where(&format!(
      "EXISTS (SELECT 1 FROM tours t WHERE t.instructor = p.id)
       AND (SELECT COUNT(*) FROM tours t WHERE t.instructor = p.id AND {STARTED}) >= ?1"
    ));
    self.persons("instructors by tour count", sql, vec![min.into()]).await
  }

  async fn instructors_by_tour(&self, tour: i64) -> Result<Vec<Person>> {
    let sql =
      persons_where("EXISTS (SELECT 1 FROM tours t WHERE t.instructor = p.id AND t.id = ?1)");
    self.persons("instructors by tour", sql, vec![tour.into()]).await
  }

  async fn instructors_by_place(&self, place: i64) -> Result<Vec<Person>> {
    let sql = persons_where(
      "EXISTS (
         SELECT 1 FROM tours t JOIN places_routes pr ON pr.route = t.route
         WHERE t.instructor = p.id AND pr.place = ?1
       )",
    );
    self.persons("instructors by place", sql, vec![place.into()]).await
  }

  // ── Workouts ──────────────────────────────────────────────────────────────

  async fn create_workout(&self, workout: NewWorkout) -> Result<i64> {
    self
      .call("create workout", move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO workout_descriptions (trainer, type) VALUES (?1, ?2)",
          rusqlite::params![workout.trainer, workout.workout_type],
        )?;
        let id = tx.last_insert_rowid();
        for group in &workout.groups {
          tx.execute(
            "INSERT OR IGNORE INTO groups_workouts (group_id, workout) VALUES (?1, ?2)",
            [*group, id],
          )?;
        }
        tx.commit()?;
        Ok(id)
      })
      .await
  }

  async fn add_session(&self, session: NewSession) -> Result<i64> {
    self
      .insert(
        "add workout session",
        "INSERT INTO workouts (description, date, start_time, finish_time)
         VALUES (?1, ?2, ?3, ?4)",
        vec![
          session.workout.into(),
          encode_date(session.date).into(),
          encode_time(session.start_time).into(),
          encode_time(session.finish_time).into(),
        ],
      )
      .await
  }

  async fn trainers_by_workout(
    &self,
    group_number: i64,
    from: NaiveDate,
    to: NaiveDate,
  ) -> Result<Vec<Person>> {
    let sql = persons_where(
      "EXISTS (
         SELECT 1 FROM workout_descriptions wd
         JOIN groups_workouts gw ON gw.workout = wd.id
         JOIN club_groups g      ON g.id = gw.group_id
         JOIN workouts w         ON w.description = wd.id
         WHERE wd.trainer = p.id
           AND g.group_number = ?1
           AND w.date BETWEEN ?2 AND ?3
       )",
    );
    self
      .persons(
        "trainers by workout",
        sql,
        vec![group_number.into(), encode_date(from).into(), encode_date(to).into()],
      )
      .await
  }

  async fn strain(&self, trainer: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<Strain>> {
    let (from, to) = (encode_date(from), encode_date(to));
    self
      .call("strain", move |conn| {
        let mut stmt = conn.prepare(
          "SELECT wd.type,
                  SUM(CAST(strftime('%s', w.finish_time) AS INTEGER)
                    - CAST(strftime('%s', w.start_time) AS INTEGER))
           FROM workouts w
           JOIN workout_descriptions wd ON wd.id = w.description
           WHERE wd.trainer = ?1 AND w.date BETWEEN ?2 AND ?3
           GROUP BY wd.type
           ORDER BY wd.type",
        )?;
        stmt
          .query_map(rusqlite::params![trainer, from, to], |row| {
            Ok(Strain { workout_type: row.get(0)?, seconds: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()
      })
      .await
  }
}
