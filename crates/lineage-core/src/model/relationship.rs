use serde::{Deserialize, Serialize};

/// A directed parent→child edge between two person records.
///
/// The ordered pair `(parent_id, child_id)` is unique in the store; the
/// creation timestamp exists for audit and never participates in validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub parent_id: String,
    pub child_id: String,
    /// Commit timestamp, microseconds since the Unix epoch. Audit only.
    pub created_at_us: i64,
}
