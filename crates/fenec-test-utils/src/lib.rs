#![doc = r#"
fenec-test-utils — fixture builders shared by the planner, engine, and
ingest test suites, plus a one-call helper to get a populated, ready-to-plan
graph store without repeating the upsert/edge boilerplate in every test.
"#]

pub mod fixtures;

pub use fixtures::{
    directory_with_mixed_children, third_party_import, three_module_chain, two_node_cycle,
};

use fenec_core::Entity;
use fenec_graph::InMemoryGraphStore;

/// Populates a fresh [`InMemoryGraphStore`] with `entities`, deriving edges
/// the same way the CLI's ingest step does.
pub fn store_with(entities: Vec<Entity>) -> InMemoryGraphStore {
    let store = InMemoryGraphStore::new();
    fenec_ingest::populate(&store, entities).expect("fixture entities always populate cleanly");
    store
}
