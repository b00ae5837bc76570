//! Ancestor-closure traversal over the relationship store.
//!
//! Every child may have up to two recorded parents, so walking "upward" is a
//! traversal over all ancestor branches, not a single linear chain. Both
//! functions use an explicit worklist with a visited set: depth stays under
//! our control instead of the call stack's, and termination holds even if the
//! edge set were ever malformed.

use std::collections::{HashSet, VecDeque};

use anyhow::Result;

use crate::store::GraphStore;

/// Collect the full transitive ancestor closure of `person_id`.
///
/// The person itself is not part of its own closure.
///
/// # Errors
///
/// Returns an error if reading edges from the store fails.
pub fn ancestor_ids(store: &dyn GraphStore, person_id: &str) -> Result<HashSet<String>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    seen.insert(person_id.to_string());
    queue.push_back(person_id.to_string());

    while let Some(current) = queue.pop_front() {
        for edge in store.parents_of(&current)? {
            if seen.insert(edge.parent_id.clone()) {
                queue.push_back(edge.parent_id);
            }
        }
    }

    seen.remove(person_id);
    Ok(seen)
}

/// Check whether committing the edge `parent_id → child_id` would close a
/// cycle in the existing graph.
///
/// Walks upward from `parent_id` through every existing ancestor branch and
/// returns `true` the moment `child_id` appears in the chain; `false` only
/// after the whole closure is exhausted. Checking only the immediate parents
/// would miss deep cycles (a grandchild becoming an ancestor), so the walk
/// covers the entire transitive closure.
///
/// # Errors
///
/// Returns an error if reading edges from the store fails.
pub fn would_create_cycle(
    store: &dyn GraphStore,
    parent_id: &str,
    child_id: &str,
) -> Result<bool> {
    if parent_id == child_id {
        return Ok(true);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    seen.insert(parent_id.to_string());
    queue.push_back(parent_id.to_string());

    while let Some(current) = queue.pop_front() {
        if current == child_id {
            return Ok(true);
        }
        for edge in store.parents_of(&current)? {
            if seen.insert(edge.parent_id.clone()) {
                queue.push_back(edge.parent_id);
            }
        }
    }

    Ok(false)
}
