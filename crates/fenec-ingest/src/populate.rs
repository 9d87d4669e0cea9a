//! Turns a resolved entity set into graph-store nodes and edges (§3,
//! invariant I-EDGE): one containment edge per parent-child pair, plus one
//! dependency edge per resolved `LOCAL` import or `LocalDep`, running from
//! the dependency to the dependent.

use fenec_core::{BlockType, Entity};
use fenec_error::Result;
use fenec_graph::{EdgeKind, GraphStore};

pub fn populate(store: &dyn GraphStore, entities: Vec<Entity>) -> Result<()> {
    let block_type_by_id: std::collections::HashMap<&str, BlockType> = entities
        .iter()
        .map(|e| (e.id(), e.block_type()))
        .collect();
    let type_of = |id: &str| {
        block_type_by_id
            .get(id)
            .copied()
            .unwrap_or(BlockType::Unknown)
    };

    for entity in &entities {
        for child_id in entity.children_ids() {
            store.upsert_edge(
                entity.id(),
                child_id,
                entity.block_type(),
                type_of(child_id),
                EdgeKind::Containment,
            )?;
        }
    }

    for entity in &entities {
        match entity {
            Entity::Module(m) => {
                for import in &m.imports {
                    if let Some(target_module) = &import.local_module_id {
                        store.upsert_edge(
                            target_module,
                            &m.common.id,
                            type_of(target_module),
                            BlockType::Module,
                            EdgeKind::Dependency,
                        )?;
                    }
                }
            }
            Entity::Class(c) => emit_local_dep_edges(store, &c.common, &type_of, entity.block_type())?,
            Entity::Function(f) => emit_local_dep_edges(store, &f.common, &type_of, entity.block_type())?,
            Entity::Standalone(s) => emit_local_dep_edges(store, &s.common, &type_of, entity.block_type())?,
            Entity::Directory(_) => {}
        }
    }

    for entity in entities {
        store.upsert(entity)?;
    }
    Ok(())
}

fn emit_local_dep_edges(
    store: &dyn GraphStore,
    common: &fenec_core::Common,
    type_of: &dyn Fn(&str) -> BlockType,
    dependent_type: BlockType,
) -> Result<()> {
    for dep in &common.dependencies {
        if let fenec_core::Dependency::Local(local) = dep {
            if let Some(target) = &local.local_module_id {
                store.upsert_edge(
                    target,
                    &common.id,
                    type_of(target),
                    dependent_type,
                    EdgeKind::Dependency,
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenec_core::{id, Common, Import, ImportModuleType, ModuleEntity};
    use fenec_graph::InMemoryGraphStore;

    #[test]
    fn emits_dependency_edge_from_dependency_to_dependent() {
        let b = ModuleEntity {
            common: Common::new(id::module_id("b.py"), "b.py"),
            docstring: None,
            header: Vec::new(),
            footer: Vec::new(),
            imports: Vec::new(),
        };
        let mut import = Import::new(ImportModuleType::Local);
        import.local_module_id = Some(b.common.id.clone());
        let a = ModuleEntity {
            common: Common::new(id::module_id("a.py"), "a.py"),
            docstring: None,
            header: Vec::new(),
            footer: Vec::new(),
            imports: vec![import],
        };
        let (a_id, b_id) = (a.common.id.clone(), b.common.id.clone());

        let store = InMemoryGraphStore::new();
        populate(&store, vec![Entity::Module(a), Entity::Module(b)]).unwrap();

        let outbound = store.outbound(&b_id, Some(EdgeKind::Dependency));
        assert_eq!(outbound.len(), 1);
        assert_eq!(outbound[0].id(), a_id);
    }
}
