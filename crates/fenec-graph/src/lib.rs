#![doc = r#"
fenec-graph — the graph store adapter (C3): upsert, reachability, and
per-node summary mutation over the code graph.

The real graph database is out of scope (`spec.md` §1); this crate defines
the [`GraphStore`] trait every other crate programs against and ships
[`InMemoryGraphStore`], a `DashMap`-backed reference implementation good
enough to drive the planner and engine end to end without an external
process.
"#]

pub mod edge;
pub mod store;

pub use edge::{Edge, EdgeKind};
pub use store::{Collection, GraphStore, InMemoryGraphStore};
