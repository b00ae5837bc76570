//! SQLite-backed [`GraphStore`] implementation.
//!
//! All query helpers return typed structs (never raw rows) and attach
//! context on failure. Dates are stored as ISO-8601 `YYYY-MM-DD` text and
//! parsed back into `chrono::NaiveDate` at the row boundary.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, params, types::Type};
use std::path::Path;

use super::{DEFAULT_BUSY_TIMEOUT, GraphStore, InsertEdgeError, migrations};
use crate::model::{NewPerson, Person, Relationship};

const DATE_FMT: &str = "%Y-%m-%d";

/// A store backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store database, apply runtime pragmas, and
    /// migrate the schema to the latest version.
    ///
    /// # Errors
    ///
    /// Returns an error if opening/configuring/migrating the database fails.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create store directory {}", parent.display()))?;
        }

        let mut conn = Connection::open(path)
            .with_context(|| format!("open store database {}", path.display()))?;

        configure_connection(&conn).context("configure sqlite pragmas")?;
        migrations::migrate(&mut conn).context("apply store migrations")?;

        Ok(Self { conn })
    }

    /// Open a fresh in-memory store. Used by tests and disposable setups.
    ///
    /// # Errors
    ///
    /// Returns an error if configuring or migrating the database fails.
    pub fn in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn).context("configure sqlite pragmas")?;
        migrations::migrate(&mut conn).context("apply store migrations")?;
        Ok(Self { conn })
    }
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    let _journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
    Ok(())
}

fn now_us() -> i64 {
    Utc::now().timestamp_micros()
}

fn row_to_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
    let raw_dob: String = row.get(2)?;
    let date_of_birth = NaiveDate::parse_from_str(&raw_dob, DATE_FMT)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        date_of_birth,
        place_of_birth: row.get(3)?,
        created_at_us: row.get(4)?,
    })
}

fn row_to_relationship(row: &rusqlite::Row<'_>) -> rusqlite::Result<Relationship> {
    Ok(Relationship {
        parent_id: row.get(0)?,
        child_id: row.get(1)?,
        created_at_us: row.get(2)?,
    })
}

/// Returns `true` when the failure is the `(parent_id, child_id)` uniqueness
/// constraint firing, as opposed to any other constraint or storage fault.
fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl GraphStore for SqliteStore {
    fn get_person(&self, id: &str) -> Result<Option<Person>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT person_id, name, date_of_birth, place_of_birth, created_at_us
                 FROM persons WHERE person_id = ?1",
            )
            .context("prepare get_person")?;
        let mut rows = stmt
            .query_map(params![id], row_to_person)
            .with_context(|| format!("get_person '{id}'"))?;
        rows.next()
            .transpose()
            .with_context(|| format!("decode person '{id}'"))
    }

    fn all_persons(&self) -> Result<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT person_id, name, date_of_birth, place_of_birth, created_at_us
                 FROM persons ORDER BY date_of_birth ASC, person_id ASC",
            )
            .context("prepare all_persons")?;
        let rows = stmt.query_map([], row_to_person).context("all_persons")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("decode persons")
    }

    fn all_relationships(&self) -> Result<Vec<Relationship>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT parent_id, child_id, created_at_us
                 FROM relationships ORDER BY created_at_us ASC, parent_id ASC, child_id ASC",
            )
            .context("prepare all_relationships")?;
        let rows = stmt
            .query_map([], row_to_relationship)
            .context("all_relationships")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("decode relationships")
    }

    fn count_parents(&self, child_id: &str) -> Result<u32> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM relationships WHERE child_id = ?1",
                params![child_id],
                |row| row.get(0),
            )
            .with_context(|| format!("count_parents '{child_id}'"))
    }

    fn parents_of(&self, child_id: &str) -> Result<Vec<Relationship>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT parent_id, child_id, created_at_us
                 FROM relationships WHERE child_id = ?1
                 ORDER BY created_at_us ASC, parent_id ASC",
            )
            .context("prepare parents_of")?;
        let rows = stmt
            .query_map(params![child_id], row_to_relationship)
            .with_context(|| format!("parents_of '{child_id}'"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("decode parent edges")
    }

    fn children_of(&self, parent_id: &str) -> Result<Vec<Relationship>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT parent_id, child_id, created_at_us
                 FROM relationships WHERE parent_id = ?1
                 ORDER BY created_at_us ASC, child_id ASC",
            )
            .context("prepare children_of")?;
        let rows = stmt
            .query_map(params![parent_id], row_to_relationship)
            .with_context(|| format!("children_of '{parent_id}'"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("decode child edges")
    }

    fn insert_person(&self, new: NewPerson) -> Result<Person> {
        let person = Person {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            date_of_birth: new.date_of_birth,
            place_of_birth: new.place_of_birth,
            created_at_us: now_us(),
        };
        self.conn
            .execute(
                "INSERT INTO persons (person_id, name, date_of_birth, place_of_birth, created_at_us)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    person.id,
                    person.name,
                    person.date_of_birth.format(DATE_FMT).to_string(),
                    person.place_of_birth,
                    person.created_at_us,
                ],
            )
            .with_context(|| format!("insert person '{}'", person.id))?;
        Ok(person)
    }

    fn insert_relationship(
        &self,
        parent_id: &str,
        child_id: &str,
    ) -> Result<Relationship, InsertEdgeError> {
        let created_at_us = now_us();
        let result = self.conn.execute(
            "INSERT INTO relationships (parent_id, child_id, created_at_us)
             VALUES (?1, ?2, ?3)",
            params![parent_id, child_id, created_at_us],
        );

        match result {
            Ok(_) => Ok(Relationship {
                parent_id: parent_id.to_string(),
                child_id: child_id.to_string(),
                created_at_us,
            }),
            Err(error) if is_unique_violation(&error) => Err(InsertEdgeError::Duplicate),
            Err(error) => Err(InsertEdgeError::Store(anyhow::Error::new(error).context(
                format!("insert relationship '{parent_id}' -> '{child_id}'"),
            ))),
        }
    }
}
