//! Descendant-tree projection.
//!
//! The builder loads the whole person and edge sets once, indexes them by id,
//! and assembles the tree from in-memory lookups only. That trades memory for
//! round-trip elimination: the alternative (one store query per node) is both
//! slower and carries the same unbounded-recursion risk the depth ceiling
//! exists to catch. The trade-off is deliberate and load-bearing.

use std::collections::HashMap;

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::Serialize;

use crate::config::TreeConfig;
use crate::error::{LineageError, Rejection, RejectionKind};
use crate::model::Person;
use crate::store::GraphStore;

/// One node of the descendant tree: the person's attributes plus child
/// subtrees ordered ascending by date of birth (eldest first).
///
/// A freshly computed, read-only projection; it is rebuilt on every query
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Total number of persons in this subtree, the root included.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Self::size).sum::<usize>()
    }
}

/// Build the descendant tree rooted at `root_id`.
///
/// # Errors
///
/// `PERSON_NOT_FOUND` when the root id does not resolve; `TREE_TOO_DEEP`
/// when assembly exceeds `config.max_depth` levels below the root;
/// [`LineageError::Store`] when loading the graph fails.
pub fn build_descendant_tree(
    store: &dyn GraphStore,
    root_id: &str,
    config: &TreeConfig,
) -> Result<TreeNode, LineageError> {
    let persons: HashMap<String, Person> = store
        .all_persons()?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    if !persons.contains_key(root_id) {
        return Err(LineageError::Rejected(Rejection::new(
            RejectionKind::PersonNotFound,
            format!("root person not found: '{root_id}'"),
        )));
    }

    let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
    for edge in store.all_relationships()? {
        children_of.entry(edge.parent_id).or_default().push(edge.child_id);
    }

    assemble(root_id, 0, config.max_depth, &persons, &children_of)
}

fn assemble(
    id: &str,
    depth: u32,
    max_depth: u32,
    persons: &HashMap<String, Person>,
    children_of: &HashMap<String, Vec<String>>,
) -> Result<TreeNode, LineageError> {
    if depth > max_depth {
        return Err(LineageError::Rejected(Rejection::new(
            RejectionKind::TreeTooDeep,
            format!("descendant tree exceeds the depth bound ({max_depth})"),
        )));
    }

    // Foreign keys guarantee every edge endpoint resolves; a miss here means
    // the store handed us torn state, which is a fault, not a rejection.
    let Some(person) = persons.get(id) else {
        return Err(LineageError::Store(anyhow!(
            "relationship references unknown person '{id}'"
        )));
    };

    let mut children = Vec::new();
    if let Some(child_ids) = children_of.get(id) {
        for child_id in child_ids {
            children.push(assemble(child_id, depth + 1, max_depth, persons, children_of)?);
        }
    }
    children.sort_by_key(|node| node.date_of_birth);

    Ok(TreeNode {
        id: person.id.clone(),
        name: person.name.clone(),
        date_of_birth: person.date_of_birth,
        place_of_birth: person.place_of_birth.clone(),
        children,
    })
}
