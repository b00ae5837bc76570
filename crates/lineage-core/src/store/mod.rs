//! Persistent graph store: persons plus directed parent→child edges.
//!
//! Runtime defaults are intentionally conservative:
//! - `journal_mode = WAL` to allow concurrent readers while a writer appends
//! - `busy_timeout = 5s` to reduce transient lock failures under contention
//! - `foreign_keys = ON` so edges can never reference missing persons
//!
//! # Concurrency
//!
//! A commit is atomic: the `(parent_id, child_id)` primary key is enforced
//! at insert time, which is how duplicates are detected — optimistically,
//! not by a prior existence check. Two writers racing on the same child's
//! parent count (or on cycle-closing edges) are serialized only by SQLite's
//! write lock; a validation pass is not transactional across its reads.
//! This is an accepted limitation, documented in DESIGN.md.

pub mod migrations;
pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;

use anyhow::Result;
use std::time::Duration;

use crate::model::{NewPerson, Person, Relationship};

/// Busy timeout used for store connections.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Error returned by [`GraphStore::insert_relationship`].
///
/// `Duplicate` is the one commit failure the validator translates into a
/// domain rejection; everything else is an opaque storage fault.
#[derive(Debug, thiserror::Error)]
pub enum InsertEdgeError {
    #[error("relationship already exists")]
    Duplicate,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// The persistence seam between the graph algorithms and storage.
///
/// The validator and the tree builder are pure with respect to everything
/// except this one injected dependency, which keeps the check ordering and
/// the traversal algorithms unit-testable against an in-memory database.
pub trait GraphStore {
    /// Fetch a person by exact id. `Ok(None)` when absent.
    fn get_person(&self, id: &str) -> Result<Option<Person>>;

    /// All person records, ordered by date of birth then id.
    fn all_persons(&self) -> Result<Vec<Person>>;

    /// All relationship edges, in commit order.
    fn all_relationships(&self) -> Result<Vec<Relationship>>;

    /// Number of recorded parents of `child_id`.
    fn count_parents(&self, child_id: &str) -> Result<u32>;

    /// Edges where `child_id` is the child (0, 1, or 2 entries).
    fn parents_of(&self, child_id: &str) -> Result<Vec<Relationship>>;

    /// Edges where `parent_id` is the parent.
    fn children_of(&self, parent_id: &str) -> Result<Vec<Relationship>>;

    /// Record a new person and assign its id. Intake is append-only.
    fn insert_person(&self, new: NewPerson) -> Result<Person>;

    /// Commit a parent→child edge. Fails with [`InsertEdgeError::Duplicate`]
    /// when the exact ordered pair already exists.
    fn insert_relationship(
        &self,
        parent_id: &str,
        child_id: &str,
    ) -> Result<Relationship, InsertEdgeError>;
}
