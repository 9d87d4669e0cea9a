//! Summarization planner (C7): produces ordered traversal sequences from a
//! set of seed modules. The planner never calls the LLM; it only computes
//! order (§4.7).
//!
//! §4.7 walks inbound, visits the seed, then walks outbound — across *both*
//! edge kinds, not dependencies alone, which is what pulls a module's
//! contained classes/functions/directories into the plan alongside its
//! dependency neighbours. Containment edges run parent -> child, the
//! opposite of I-EDGE's dependency -> dependent, so "inbound" and "outbound"
//! resolve to different sides per kind:
//!
//! - [`before_set`] (walked first in bottom-up, last in top-down): a node's
//!   direct dependencies, plus its direct containment children.
//! - [`after_set`] (walked last in bottom-up, first in top-down): a node's
//!   direct dependents, plus its direct containment parent.
//!
//! Bottom-up is postorder over this adjacency (before_set, self, after_set);
//! top-down is preorder (after_set, self, before_set) — the same shape as
//! before, just over the richer adjacency.

use std::collections::HashSet;

use fenec_graph::{EdgeKind, GraphStore};

/// Which half of the pass schedule (§4.7: "pass 1 (odd): bottom-up, pass 2
/// (even): top-down, pass 3 (odd): bottom-up") a given pass number is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    BottomUp,
    TopDown,
}

impl Direction {
    pub fn for_pass(pass_number: u32) -> Self {
        if pass_number % 2 == 0 {
            Direction::TopDown
        } else {
            Direction::BottomUp
        }
    }
}

/// Dependencies a node needs summarized before it, plus its containment
/// children (a directory's or module's contents).
fn before_set(store: &dyn GraphStore, id: &str) -> Vec<String> {
    let mut ids: Vec<String> = store
        .direct_inbound(id, EdgeKind::Dependency)
        .into_iter()
        .map(|e| e.id().to_string())
        .collect();
    ids.extend(
        store
            .direct_outbound(id, EdgeKind::Containment)
            .into_iter()
            .map(|e| e.id().to_string()),
    );
    ids
}

/// Dependents a node feeds into, plus its containment parent (the enclosing
/// module or directory).
fn after_set(store: &dyn GraphStore, id: &str) -> Vec<String> {
    let mut ids: Vec<String> = store
        .direct_outbound(id, EdgeKind::Dependency)
        .into_iter()
        .map(|e| e.id().to_string())
        .collect();
    ids.extend(
        store
            .direct_inbound(id, EdgeKind::Containment)
            .into_iter()
            .map(|e| e.id().to_string()),
    );
    ids
}

fn postorder(store: &dyn GraphStore, seed: &str, visited: &mut HashSet<String>, out: &mut Vec<String>) {
    if !visited.insert(seed.to_string()) {
        return;
    }
    for dep in before_set(store, seed) {
        postorder(store, &dep, visited, out);
    }
    out.push(seed.to_string());
    for dep in after_set(store, seed) {
        postorder(store, &dep, visited, out);
    }
}

fn preorder(store: &dyn GraphStore, seed: &str, visited: &mut HashSet<String>, out: &mut Vec<String>) {
    if !visited.insert(seed.to_string()) {
        return;
    }
    for dep in after_set(store, seed) {
        preorder(store, &dep, visited, out);
    }
    out.push(seed.to_string());
    for dep in before_set(store, seed) {
        preorder(store, &dep, visited, out);
    }
}

fn dedup_keep_last(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut kept: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids.into_iter().rev() {
        if seen.insert(id.clone()) {
            kept.push(id);
        }
    }
    kept.reverse();
    kept
}

fn dedup_keep_first(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Bottom-up plan: dependencies before dependents. `visited` is reset
/// between seeds; duplicates across seeds are dropped keeping the last
/// occurrence.
pub fn bottom_up(store: &dyn GraphStore, seeds: &[String]) -> Vec<String> {
    let mut all = Vec::new();
    for seed in seeds {
        let mut visited = HashSet::new();
        postorder(store, seed, &mut visited, &mut all);
    }
    dedup_keep_last(all)
}

/// Top-down plan: dependents before dependencies. Duplicates across seeds
/// are dropped keeping the first occurrence.
pub fn top_down(store: &dyn GraphStore, seeds: &[String]) -> Vec<String> {
    let mut all = Vec::new();
    for seed in seeds {
        let mut visited = HashSet::new();
        preorder(store, seed, &mut visited, &mut all);
    }
    dedup_keep_first(all)
}

pub fn plan_for_pass(store: &dyn GraphStore, seeds: &[String], pass_number: u32) -> Vec<String> {
    match Direction::for_pass(pass_number) {
        Direction::BottomUp => bottom_up(store, seeds),
        Direction::TopDown => top_down(store, seeds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenec_core::Entity;
    use fenec_test_utils::{
        directory_with_mixed_children, store_with, three_module_chain, two_node_cycle,
    };

    fn ids(entities: &[Entity]) -> Vec<String> {
        entities.iter().map(|e| e.id().to_string()).collect()
    }

    #[test]
    fn bottom_up_orders_dependencies_before_dependents() {
        let entities = three_module_chain();
        let a_id = entities
            .iter()
            .find(|e| e.file_path() == Some("a.py"))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities.clone());
        let plan = bottom_up(&store, &[a_id]);
        let expected = {
            let mut by_path = entities.clone();
            by_path.sort_by_key(|e| match e.file_path() {
                Some("c.py") => 0,
                Some("b.py") => 1,
                _ => 2,
            });
            ids(&by_path)
        };
        assert_eq!(plan, expected);
    }

    #[test]
    fn top_down_orders_dependents_before_dependencies() {
        let entities = three_module_chain();
        let a_id = entities
            .iter()
            .find(|e| e.file_path() == Some("a.py"))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities);
        let plan = top_down(&store, &[a_id]);
        assert!(plan[0].contains("a.py"));
        assert!(plan[1].contains("b.py"));
        assert!(plan[2].contains("c.py"));
    }

    #[test]
    fn cycle_is_broken_and_each_node_emitted_once() {
        let entities = two_node_cycle();
        let a_id = entities[0].id().to_string();
        let store = store_with(entities);
        let plan = bottom_up(&store, &[a_id]);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn pass_schedule_alternates_direction() {
        assert_eq!(Direction::for_pass(1), Direction::BottomUp);
        assert_eq!(Direction::for_pass(2), Direction::TopDown);
        assert_eq!(Direction::for_pass(3), Direction::BottomUp);
    }

    #[test]
    fn bottom_up_reaches_every_contained_entity_from_a_module_seed() {
        let entities = directory_with_mixed_children();
        let module_id = entities
            .iter()
            .find(|e| matches!(e, Entity::Module(_)))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities.clone());
        let plan = bottom_up(&store, &[module_id]);
        assert_eq!(plan.len(), 4, "plan should include directory, module, class, and function");
        for entity in &entities {
            assert!(plan.contains(&entity.id().to_string()), "missing {}", entity.id());
        }
    }

    #[test]
    fn bottom_up_orders_function_before_class_before_module_before_directory() {
        let entities = directory_with_mixed_children();
        let module_id = entities
            .iter()
            .find(|e| matches!(e, Entity::Module(_)))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities.clone());
        let plan = bottom_up(&store, &[module_id]);

        let position = |want: &dyn Fn(&Entity) -> bool| {
            let id = entities.iter().find(|e| want(e)).unwrap().id();
            plan.iter().position(|p| p == id).unwrap()
        };
        let function_pos = position(&|e| matches!(e, Entity::Function(_)));
        let class_pos = position(&|e| matches!(e, Entity::Class(_)));
        let module_pos = position(&|e| matches!(e, Entity::Module(_)));
        let directory_pos = position(&|e| matches!(e, Entity::Directory(_)));

        assert!(function_pos < class_pos);
        assert!(class_pos < module_pos);
        assert!(module_pos < directory_pos);
    }

    #[test]
    fn top_down_reaches_every_contained_entity_from_a_module_seed() {
        let entities = directory_with_mixed_children();
        let module_id = entities
            .iter()
            .find(|e| matches!(e, Entity::Module(_)))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities.clone());
        let plan = top_down(&store, &[module_id]);
        assert_eq!(plan.len(), 4);
        for entity in &entities {
            assert!(plan.contains(&entity.id().to_string()));
        }
    }
}
