//! Change detector (C6): given changed file paths, computes the transitive
//! closure of entity IDs that need resummarizing.
//!
//! Grounded in `graph_db_summarization_manager.py`'s incremental-update path
//! (it recomputes descendants of changed modules before re-running the
//! summarizer), generalized per `spec.md` §4.6 to walk the graph store's
//! edges rather than re-deriving dependents ad hoc.

use std::collections::HashSet;

use fenec_core::Entity;
use fenec_graph::{EdgeKind, GraphStore};

/// `A = { s } ∪ containment-descendants(s) ∪ outbound(s)
/// [∪ inbound(s) if both_directions] for each seed s in S`, where `S` is
/// every module whose `file_path` is in `changed_files`. P-CHANGE requires
/// every entity with a module ancestor whose file path is in `F` — a changed
/// module's own classes, functions, and standalone blocks — in addition to
/// the dependency closure.
pub fn affected_ids(
    store: &dyn GraphStore,
    changed_files: &[String],
    both_directions: bool,
) -> HashSet<String> {
    let seeds: Vec<String> = store
        .all()
        .into_iter()
        .filter_map(|e| match e {
            Entity::Module(m) if changed_files.iter().any(|f| f == &m.common.file_path) => {
                Some(m.common.id)
            }
            _ => None,
        })
        .collect();

    let mut affected = HashSet::new();
    for seed in seeds {
        affected.insert(seed.clone());
        for e in store.outbound(&seed, Some(EdgeKind::Containment)) {
            affected.insert(e.id().to_string());
        }
        for e in store.outbound(&seed, Some(EdgeKind::Dependency)) {
            affected.insert(e.id().to_string());
        }
        if both_directions {
            for e in store.inbound(&seed, Some(EdgeKind::Dependency)) {
                affected.insert(e.id().to_string());
            }
        }
    }
    affected
}
