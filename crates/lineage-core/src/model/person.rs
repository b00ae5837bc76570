use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A person record as stored.
///
/// Created once at intake and immutable afterwards; the validator and the
/// tree builder only ever read these fields. Dates serialize as `YYYY-MM-DD`
/// calendar strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Opaque unique identifier (UUID v4 assigned at intake).
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    /// Intake timestamp, microseconds since the Unix epoch. Audit only.
    pub created_at_us: i64,
}

/// Intake payload for a new person record.
///
/// The request layer is responsible for field-format validation (non-empty
/// trimmed name, parseable date) before constructing one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub place_of_birth: Option<String>,
}
