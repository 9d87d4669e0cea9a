//! The graph store adapter (C3).
//!
//! The real backend (a graph database) is an external collaborator per
//! `spec.md` §1; what this crate owns is the trait every other crate
//! programs against, plus an in-memory reference implementation — analogous
//! to how `ploke-db::Database` wraps an embedded Cozo instance behind a
//! narrow, typed surface, except here the "embedded instance" is a pair of
//! `DashMap`s so the reference impl needs no external process either.

use std::collections::VecDeque;

use dashmap::DashMap;
use fenec_core::Entity;
use fenec_error::{DomainError, Result};

use crate::edge::{Edge, EdgeKind};

/// One of the logical collections named in §6 (`modules`, `classes`,
/// `functions`, `standalone_blocks`, `directories`). The reference store
/// keeps a single map keyed by id and uses this only for `delete_collection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Modules,
    Classes,
    Functions,
    StandaloneBlocks,
    Directories,
}

impl Collection {
    fn matches(self, entity: &Entity) -> bool {
        matches!(
            (self, entity),
            (Collection::Modules, Entity::Module(_))
                | (Collection::Classes, Entity::Class(_))
                | (Collection::Functions, Entity::Function(_))
                | (Collection::StandaloneBlocks, Entity::Standalone(_))
                | (Collection::Directories, Entity::Directory(_))
        )
    }
}

/// The adapter surface every other crate programs against (C3).
pub trait GraphStore: Send + Sync {
    fn upsert(&self, entity: Entity) -> Result<()>;
    fn upsert_edge(
        &self,
        from_id: &str,
        to_id: &str,
        from_type: fenec_core::BlockType,
        to_type: fenec_core::BlockType,
        kind: EdgeKind,
    ) -> Result<()>;
    fn get(&self, id: &str) -> Option<Entity>;
    fn update_summary(&self, id: &str, text: &str) -> Result<()>;
    /// All entities at distance 1..N along edges in `kind`'s direction,
    /// following edges forward (from -> to). De-duplicated, never includes
    /// the start node.
    fn outbound(&self, id: &str, kind: Option<EdgeKind>) -> Vec<Entity>;
    /// Symmetric to [`GraphStore::outbound`], walking edges backward
    /// (to -> from).
    fn inbound(&self, id: &str, kind: Option<EdgeKind>) -> Vec<Entity>;
    /// The 1-hop neighbourhood walking backward (to -> from) for a single
    /// edge kind — used by the planner (C7), which needs direct
    /// dependencies (or direct containment parents) rather than the full
    /// transitive closure `inbound` returns.
    fn direct_inbound(&self, id: &str, kind: EdgeKind) -> Vec<Entity>;
    /// Symmetric to [`GraphStore::direct_inbound`]: the 1-hop neighbourhood
    /// walking forward (from -> to) for a single edge kind — used by the
    /// planner (C7) to reach direct containment children and dependents.
    fn direct_outbound(&self, id: &str, kind: EdgeKind) -> Vec<Entity>;
    fn all(&self) -> Vec<Entity>;
    fn delete_collection(&self, collection: Collection) -> Result<()>;
    /// No-op for the in-memory reference store; a real backend would create
    /// collections/indices here.
    fn ensure_schema(&self) -> Result<()>;
}

/// `DashMap`-backed reference implementation. Concurrent-safe: multiple
/// entities may be upserted or have their summary updated from different
/// tasks at once (§5, "writes to graph-store summaries are serialized per
/// entity; concurrent writes to distinct entities are permitted").
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    nodes: DashMap<String, Entity>,
    edges: DashMap<(String, String), Edge>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn neighbors(&self, id: &str, kind: Option<EdgeKind>, forward: bool) -> Vec<String> {
        self.edges
            .iter()
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .filter_map(|e| {
                if forward && e.from_id == id {
                    Some(e.to_id.clone())
                } else if !forward && e.to_id == id {
                    Some(e.from_id.clone())
                } else {
                    None
                }
            })
            .collect()
    }

    fn reachable(&self, id: &str, kind: Option<EdgeKind>, forward: bool) -> Vec<Entity> {
        let mut visited = std::collections::HashSet::new();
        visited.insert(id.to_string());
        let mut queue: VecDeque<String> = self.neighbors(id, kind, forward).into();
        let mut out = Vec::new();
        while let Some(next) = queue.pop_front() {
            if !visited.insert(next.clone()) {
                continue;
            }
            if let Some(entity) = self.get(&next) {
                out.push(entity);
            }
            for n in self.neighbors(&next, kind, forward) {
                if !visited.contains(&n) {
                    queue.push_back(n);
                }
            }
        }
        out
    }
}

impl GraphStore for InMemoryGraphStore {
    fn upsert(&self, entity: Entity) -> Result<()> {
        self.nodes.insert(entity.id().to_string(), entity);
        Ok(())
    }

    fn upsert_edge(
        &self,
        from_id: &str,
        to_id: &str,
        from_type: fenec_core::BlockType,
        to_type: fenec_core::BlockType,
        kind: EdgeKind,
    ) -> Result<()> {
        let key = (from_id.to_string(), to_id.to_string());
        self.edges
            .insert(key, Edge::new(from_id, to_id, from_type, to_type, kind));
        Ok(())
    }

    fn get(&self, id: &str) -> Option<Entity> {
        self.nodes.get(id).map(|e| e.clone())
    }

    fn update_summary(&self, id: &str, text: &str) -> Result<()> {
        let mut entry = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| DomainError::store(id, "no such entity in graph store"))?;
        entry.set_summary(text);
        Ok(())
    }

    fn outbound(&self, id: &str, kind: Option<EdgeKind>) -> Vec<Entity> {
        self.reachable(id, kind, true)
    }

    fn inbound(&self, id: &str, kind: Option<EdgeKind>) -> Vec<Entity> {
        self.reachable(id, kind, false)
    }

    fn direct_inbound(&self, id: &str, kind: EdgeKind) -> Vec<Entity> {
        self.neighbors(id, Some(kind), false)
            .into_iter()
            .filter_map(|n| self.get(&n))
            .collect()
    }

    fn direct_outbound(&self, id: &str, kind: EdgeKind) -> Vec<Entity> {
        self.neighbors(id, Some(kind), true)
            .into_iter()
            .filter_map(|n| self.get(&n))
            .collect()
    }

    fn all(&self) -> Vec<Entity> {
        self.nodes.iter().map(|e| e.clone()).collect()
    }

    fn delete_collection(&self, collection: Collection) -> Result<()> {
        let ids: Vec<String> = self
            .nodes
            .iter()
            .filter(|e| collection.matches(&e))
            .map(|e| e.key().clone())
            .collect();
        for id in ids {
            self.nodes.remove(&id);
        }
        Ok(())
    }

    fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenec_core::{id, ClassEntity, Common, ModuleEntity};

    fn module(path: &str) -> Entity {
        Entity::Module(ModuleEntity {
            common: Common::new(id::module_id(path), path),
            docstring: None,
            header: Vec::new(),
            footer: Vec::new(),
            imports: Vec::new(),
        })
    }

    #[test]
    fn outbound_excludes_start_and_dedups_cycles() {
        let store = InMemoryGraphStore::new();
        let a = module("a.py");
        let b = module("b.py");
        let c = module("c.py");
        let (a_id, b_id, c_id) = (a.id().to_string(), b.id().to_string(), c.id().to_string());
        store.upsert(a).unwrap();
        store.upsert(b).unwrap();
        store.upsert(c).unwrap();
        // a -> b -> c -> a (cycle), dependency direction
        store
            .upsert_edge(&a_id, &b_id, fenec_core::BlockType::Module, fenec_core::BlockType::Module, EdgeKind::Dependency)
            .unwrap();
        store
            .upsert_edge(&b_id, &c_id, fenec_core::BlockType::Module, fenec_core::BlockType::Module, EdgeKind::Dependency)
            .unwrap();
        store
            .upsert_edge(&c_id, &a_id, fenec_core::BlockType::Module, fenec_core::BlockType::Module, EdgeKind::Dependency)
            .unwrap();

        let out = store.outbound(&a_id, Some(EdgeKind::Dependency));
        assert_eq!(out.len(), 2);
        assert!(!out.iter().any(|e| e.id() == a_id));
    }

    #[test]
    fn update_summary_on_unknown_id_is_store_error() {
        let store = InMemoryGraphStore::new();
        assert!(store.update_summary("missing", "x").is_err());
    }

    #[test]
    fn delete_collection_only_removes_matching_kind() {
        let store = InMemoryGraphStore::new();
        let m = module("a.py");
        let m_id = m.id().to_string();
        store.upsert(m).unwrap();
        let c = Entity::Class(ClassEntity {
            common: {
                let mut c = Common::new(id::class_id(&m_id, "Foo"), "a.py");
                c.parent_id = Some(m_id.clone());
                c
            },
            class_name: "Foo".into(),
            decorators: None,
            bases: None,
            docstring: None,
            keywords: None,
        });
        store.upsert(c).unwrap();
        store.delete_collection(Collection::Classes).unwrap();
        assert!(store.get(&m_id).is_some());
        assert_eq!(store.all().len(), 1);
    }
}
