//! Property suite: no interleaving of accepted proposals may ever leave the
//! edge set cyclic or give any child more than two parents.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use lineage_core::model::NewPerson;
use lineage_core::propose_relationship;
use lineage_core::store::{GraphStore, SqliteStore};
use proptest::prelude::*;

const POPULATION: usize = 8;

/// Birth years are deliberately bunched so that some pairs violate the age
/// rule and others satisfy it, exercising both paths.
const BIRTH_YEARS: [i32; POPULATION] = [1900, 1905, 1925, 1942, 1958, 1960, 1979, 1995];

fn seeded_store() -> (SqliteStore, Vec<String>) {
    let store = SqliteStore::in_memory().expect("open in-memory store");
    let ids = BIRTH_YEARS
        .iter()
        .enumerate()
        .map(|(i, year)| {
            store
                .insert_person(NewPerson {
                    name: format!("person {i}"),
                    date_of_birth: NaiveDate::from_ymd_opt(*year, 6, 1).expect("valid date"),
                    place_of_birth: None,
                })
                .expect("insert person")
                .id
        })
        .collect();
    (store, ids)
}

/// Standalone DFS cycle check over the committed edge set, independent of the
/// traversal code under test.
fn edge_set_is_acyclic(edges: &[(String, String)]) -> bool {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut nodes: HashSet<&str> = HashSet::new();
    for (parent, child) in edges {
        children.entry(parent).or_default().push(child);
        nodes.insert(parent);
        nodes.insert(child);
    }

    // 0 = unvisited, 1 = on stack, 2 = done.
    let mut color: HashMap<&str, u8> = HashMap::new();

    fn visit<'a>(
        node: &'a str,
        children: &HashMap<&'a str, Vec<&'a str>>,
        color: &mut HashMap<&'a str, u8>,
    ) -> bool {
        match color.get(node) {
            Some(1) => return false,
            Some(2) => return true,
            _ => {}
        }
        color.insert(node, 1);
        if let Some(next) = children.get(node) {
            for child in next {
                if !visit(child, children, color) {
                    return false;
                }
            }
        }
        color.insert(node, 2);
        true
    }

    nodes.iter().all(|node| visit(node, &children, &mut color))
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn accepted_proposals_preserve_the_family_dag(
        proposals in proptest::collection::vec((0..POPULATION, 0..POPULATION), 1..40)
    ) {
        let (store, ids) = seeded_store();

        for (parent_idx, child_idx) in proposals {
            // Rejections are expected; only store faults would be a bug.
            if let Err(lineage_core::LineageError::Store(e)) =
                propose_relationship(&store, &ids[parent_idx], &ids[child_idx])
            {
                prop_assert!(false, "store fault: {e:#}");
            }
        }

        // Invariant 1: in-degree <= 2 for every person.
        for id in &ids {
            let count = store.count_parents(id).expect("count_parents");
            prop_assert!(count <= 2, "person {id} has {count} parents");
        }

        // Invariant 2: the committed edge set is acyclic.
        let edges: Vec<(String, String)> = store
            .all_relationships()
            .expect("all_relationships")
            .into_iter()
            .map(|e| (e.parent_id, e.child_id))
            .collect();
        prop_assert!(edge_set_is_acyclic(&edges), "cycle in {edges:?}");

        // Invariant 3: every committed edge respects the age rule.
        let by_id: HashMap<String, NaiveDate> = store
            .all_persons()
            .expect("all_persons")
            .into_iter()
            .map(|p| (p.id, p.date_of_birth))
            .collect();
        for (parent, child) in &edges {
            let gap = lineage_core::graph::validate::age_gap_years(by_id[parent], by_id[child]);
            prop_assert!(gap >= 15, "edge {parent}->{child} has gap {gap}");
        }
    }
}
