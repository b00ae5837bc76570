//! Admission rules for proposed parent-child relationships.
//!
//! A proposal passes through a fixed sequence of checks; the first failure
//! short-circuits with its own rejection kind:
//!
//! 1. identity — the two ids must differ (`SELF_PARENT`)
//! 2. existence — both ids must resolve to persons (`PERSON_NOT_FOUND`)
//! 3. age gap — the parent must be at least 15 calendar years older,
//!    month/day exact (`AGE_RULE`)
//! 4. cardinality — the child must have fewer than 2 recorded parents
//!    (`TOO_MANY_PARENTS`)
//! 5. acyclicity — the child must not already be an ancestor of the parent
//!    (`CYCLE`)
//! 6. uniqueness — detected at commit time by the store's pair constraint
//!    (`DUPLICATE`); it is last because a uniqueness violation only means
//!    anything once the edge is otherwise valid to attempt

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::ancestry;
use crate::error::{LineageError, Rejection, RejectionKind};
use crate::model::Relationship;
use crate::store::{GraphStore, InsertEdgeError};

/// Minimum number of whole calendar years a parent must precede its child.
pub const MIN_PARENT_AGE_GAP_YEARS: i32 = 15;

/// Maximum number of recorded parents per child.
pub const MAX_PARENTS_PER_CHILD: u32 = 2;

/// Whole calendar years between two birth dates, month/day exact.
///
/// The raw year difference is decremented by one when the younger person's
/// (month, day) falls before the older person's within the aligned year:
/// someone born 1980-06-01 is 15 whole years older than someone born
/// 1995-06-01, but only 14 ahead of someone born 1995-05-31.
#[must_use]
pub fn age_gap_years(older: NaiveDate, younger: NaiveDate) -> i32 {
    let mut years = younger.year() - older.year();
    if (younger.month(), younger.day()) < (older.month(), older.day()) {
        years -= 1;
    }
    years
}

/// Validate a proposed parent→child edge and commit it on success.
///
/// On success exactly one new edge exists in the store. On rejection the
/// store is untouched and the returned [`Rejection`] carries the kind of the
/// first failed check. Store faults propagate as [`LineageError::Store`] and
/// are never reported as rejections.
///
/// # Errors
///
/// [`LineageError::Rejected`] for any failed admission rule;
/// [`LineageError::Store`] when the store collaborator fails.
pub fn propose_relationship(
    store: &dyn GraphStore,
    parent_id: &str,
    child_id: &str,
) -> Result<Relationship, LineageError> {
    if parent_id == child_id {
        return Err(reject(
            RejectionKind::SelfParent,
            "a person cannot be their own parent",
        ));
    }

    let parent = store.get_person(parent_id)?;
    let child = store.get_person(child_id)?;
    let (Some(parent), Some(child)) = (parent, child) else {
        return Err(reject(
            RejectionKind::PersonNotFound,
            "parent or child was not found",
        ));
    };

    let gap = age_gap_years(parent.date_of_birth, child.date_of_birth);
    if gap < MIN_PARENT_AGE_GAP_YEARS {
        return Err(reject(
            RejectionKind::AgeRule,
            format!(
                "parent must be at least {MIN_PARENT_AGE_GAP_YEARS} years older than the child (gap: {gap})"
            ),
        ));
    }

    let parent_count = store.count_parents(child_id)?;
    if parent_count >= MAX_PARENTS_PER_CHILD {
        return Err(reject(
            RejectionKind::TooManyParents,
            format!("'{child_id}' already has {parent_count} recorded parents"),
        ));
    }

    if ancestry::would_create_cycle(store, parent_id, child_id)? {
        return Err(reject(
            RejectionKind::Cycle,
            "this relationship would create a cycle",
        ));
    }

    match store.insert_relationship(parent_id, child_id) {
        Ok(edge) => {
            debug!(parent = parent_id, child = child_id, "relationship recorded");
            Ok(edge)
        }
        Err(InsertEdgeError::Duplicate) => Err(reject(
            RejectionKind::Duplicate,
            "this relationship already exists",
        )),
        Err(InsertEdgeError::Store(error)) => Err(LineageError::Store(error)),
    }
}

fn reject(kind: RejectionKind, message: impl Into<String>) -> LineageError {
    let rejection = Rejection::new(kind, message);
    debug!(code = rejection.kind.code(), "proposal rejected: {}", rejection.message);
    LineageError::Rejected(rejection)
}
