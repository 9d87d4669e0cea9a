#![doc = r#"
fenec-core — the entity model and identifier scheme shared by every other
crate in the workspace (C1, C2).

This crate owns the data, not the behavior: parsing, storage, and
summarization all depend on it, but it depends on nothing beyond
`fenec-error` and serde. Keeping it dependency-light means every other crate
can share one definition of "what an entity is" without pulling in tokio,
a graph backend, or an LLM client.
"#]

pub mod dependency;
pub mod entity;
pub mod id;
pub mod metadata;

pub use dependency::{Dependency, Import, ImportModuleType, ImportName, LocalDep};
pub use entity::{
    parent_child_pairs, parse_import_module_type, ClassEntity, Common, DirectoryEntity, Entity,
    FunctionEntity, ModuleEntity, StandaloneEntity,
};
pub use id::{
    block_type_of, class_id, directory_id, function_id, module_id, standalone_id,
    strip_terminal_segment, BlockType, SEGMENT_SEP,
};
pub use metadata::{MetaValue, Metadata};
