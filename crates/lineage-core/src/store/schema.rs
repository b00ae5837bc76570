//! Canonical SQLite schema for the lineage store.
//!
//! The schema is normalized and small:
//! - `persons` holds the immutable intake records
//! - `relationships` models the directed parent→child edge set; the ordered
//!   pair is the primary key, which is the uniqueness constraint duplicate
//!   detection relies on at commit time

/// Migration v1: person and relationship tables.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS persons (
    person_id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    date_of_birth TEXT NOT NULL
        CHECK (date_of_birth GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]'),
    place_of_birth TEXT,
    created_at_us INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS relationships (
    parent_id TEXT NOT NULL REFERENCES persons(person_id),
    child_id TEXT NOT NULL REFERENCES persons(person_id),
    created_at_us INTEGER NOT NULL,
    PRIMARY KEY (parent_id, child_id),
    CHECK (parent_id <> child_id)
);
";

/// Migration v2: read-path indexes for the upward and downward walks.
pub const MIGRATION_V2_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_relationships_child
    ON relationships(child_id, parent_id);

CREATE INDEX IF NOT EXISTS idx_persons_dob
    ON persons(date_of_birth, person_id);
";
