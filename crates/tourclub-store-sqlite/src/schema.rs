//! SQL schema for the tourist-club SQLite store.
//!
//! Executed at every connection startup. Reference rows (roles, route types
//! and the attribute definitions the person filters rely on) are seeded with
//! `INSERT OR IGNORE`, so re-running is harmless.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    surname     TEXT NOT NULL,
    patronymic  TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS sections (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    title  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS roles (
    id    INTEGER PRIMARY KEY,
    role  TEXT NOT NULL
);

-- At most one role per (person, section); writes are upserts.
CREATE TABLE IF NOT EXISTS persons_roles (
    person   INTEGER NOT NULL REFERENCES persons(id)  ON DELETE CASCADE,
    section  INTEGER NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
    role     INTEGER NOT NULL REFERENCES roles(id),
    PRIMARY KEY (person, section)
);

CREATE TABLE IF NOT EXISTS attributes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    attr       TEXT NOT NULL,
    role       INTEGER REFERENCES roles(id),   -- NULL: any role
    attr_type  INTEGER NOT NULL CHECK (attr_type BETWEEN 0 AND 3)
);

-- One value table per attribute type tag: 0 int, 1 real, 2 text, 3 date.
CREATE TABLE IF NOT EXISTS persons_attrs_int (
    person  INTEGER NOT NULL REFERENCES persons(id)    ON DELETE CASCADE,
    attr    INTEGER NOT NULL REFERENCES attributes(id) ON DELETE CASCADE,
    value   INTEGER NOT NULL,
    PRIMARY KEY (person, attr)
);

CREATE TABLE IF NOT EXISTS persons_attrs_real (
    person  INTEGER NOT NULL REFERENCES persons(id)    ON DELETE CASCADE,
    attr    INTEGER NOT NULL REFERENCES attributes(id) ON DELETE CASCADE,
    value   REAL NOT NULL,
    PRIMARY KEY (person, attr)
);

CREATE TABLE IF NOT EXISTS persons_attrs_text (
    person  INTEGER NOT NULL REFERENCES persons(id)    ON DELETE CASCADE,
    attr    INTEGER NOT NULL REFERENCES attributes(id) ON DELETE CASCADE,
    value   TEXT NOT NULL,
    PRIMARY KEY (person, attr)
);

CREATE TABLE IF NOT EXISTS persons_attrs_date (
    person  INTEGER NOT NULL REFERENCES persons(id)    ON DELETE CASCADE,
    attr    INTEGER NOT NULL REFERENCES attributes(id) ON DELETE CASCADE,
    value   TEXT NOT NULL,                   -- YYYY-MM-DD
    PRIMARY KEY (person, attr)
);

CREATE TABLE IF NOT EXISTS club_groups (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    group_number  INTEGER NOT NULL,
    section       INTEGER NOT NULL REFERENCES sections(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS groups_persons (
    group_id  INTEGER NOT NULL REFERENCES club_groups(id) ON DELETE CASCADE,
    person    INTEGER NOT NULL REFERENCES persons(id)     ON DELETE CASCADE,
    PRIMARY KEY (group_id, person)
);

CREATE TABLE IF NOT EXISTS championships (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    title  TEXT NOT NULL,
    date   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS persons_championships (
    person        INTEGER NOT NULL REFERENCES persons(id)       ON DELETE CASCADE,
    championship  INTEGER NOT NULL REFERENCES championships(id) ON DELETE CASCADE,
    PRIMARY KEY (person, championship)
);

CREATE TABLE IF NOT EXISTS route_types (
    id    INTEGER PRIMARY KEY,
    type  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS routes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    type        INTEGER NOT NULL REFERENCES route_types(id),
    difficulty  INTEGER NOT NULL,
    length      INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS places (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    title  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS places_routes (
    place  INTEGER NOT NULL REFERENCES places(id) ON DELETE CASCADE,
    route  INTEGER NOT NULL REFERENCES routes(id) ON DELETE CASCADE,
    PRIMARY KEY (place, route)
);

CREATE TABLE IF NOT EXISTS tours (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    route          INTEGER NOT NULL REFERENCES routes(id)  ON DELETE CASCADE,
    instructor     INTEGER NOT NULL REFERENCES persons(id) ON DELETE CASCADE,
    group_id       INTEGER REFERENCES club_groups(id)      ON DELETE SET NULL,
    start          TEXT NOT NULL,                  -- YYYY-MM-DD
    duration_days  INTEGER NOT NULL CHECK (duration_days > 0)
);

CREATE TABLE IF NOT EXISTS persons_tours (
    person  INTEGER NOT NULL REFERENCES persons(id) ON DELETE CASCADE,
    tour    INTEGER NOT NULL REFERENCES tours(id)   ON DELETE CASCADE,
    PRIMARY KEY (person, tour)
);

CREATE TABLE IF NOT EXISTS workout_descriptions (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    trainer  INTEGER NOT NULL REFERENCES persons(id) ON DELETE CASCADE,
    type     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS groups_workouts (
    group_id  INTEGER NOT NULL REFERENCES club_groups(id)          ON DELETE CASCADE,
    workout   INTEGER NOT NULL REFERENCES workout_descriptions(id) ON DELETE CASCADE,
    PRIMARY KEY (group_id, workout)
);

CREATE TABLE IF NOT EXISTS workouts (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    description  INTEGER NOT NULL REFERENCES workout_descriptions(id) ON DELETE CASCADE,
    date         TEXT NOT NULL,                    -- YYYY-MM-DD
    start_time   TEXT NOT NULL,                    -- HH:MM:SS
    finish_time  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS persons_roles_section_idx ON persons_roles(section);
CREATE INDEX IF NOT EXISTS tours_route_idx           ON tours(route);
CREATE INDEX IF NOT EXISTS tours_instructor_idx      ON tours(instructor);
CREATE INDEX IF NOT EXISTS workouts_date_idx         ON workouts(date);

INSERT OR IGNORE INTO roles (id, role) VALUES
    (0, 'tourist'),
    (1, 'sportsman'),
    (2, 'trainer'),
    (3, 'manager');

INSERT OR IGNORE INTO route_types (id, type) VALUES
    (1, 'hiking'),
    (2, 'water'),
    (3, 'mountain'),
    (4, 'ski');

INSERT OR IGNORE INTO attributes (id, attr, role, attr_type) VALUES
    (1, 'sex',            NULL, 0),
    (2, 'birth_date',     NULL, 3),
    (3, 'salary',         2,    0),
    (4, 'specialization', 2,    2),
    (5, 'begin_date',     3,    3),
    (6, 'salary',         3,    0);

PRAGMA user_version = 1;
";
