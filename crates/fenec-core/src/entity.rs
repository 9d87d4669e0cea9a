//! The entity model (C2): a closed sum type over the kinds of node that can
//! appear in the code graph.
//!
//! Per the design note in `spec.md` §9 ("Dynamic validation → compile-time
//! variants"), what the source system expresses as optional-field records
//! plus runtime validators, we express as an enum of record types plus a
//! validated constructor. `block_type` is never stored as a separate field —
//! the enum tag already is that discriminator, so there is nothing to get
//! out of sync.

use std::collections::BTreeMap;

use fenec_error::DomainError;
use serde::{Deserialize, Serialize};

use crate::dependency::{Dependency, Import, ImportModuleType};
use crate::id::BlockType;
use crate::metadata::{MetaValue, Metadata};

/// Fields shared by every non-directory entity (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Common {
    pub id: String,
    pub file_path: String,
    /// Required unless this is a `Module` with no containing directory.
    pub parent_id: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
    pub code_content: String,
    pub important_comments: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub summary: Option<String>,
    pub children_ids: Vec<String>,
}

impl Common {
    pub fn new(id: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_path: file_path.into(),
            parent_id: None,
            start_line: 0,
            end_line: 0,
            code_content: String::new(),
            important_comments: Vec::new(),
            dependencies: Vec::new(),
            summary: None,
            children_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntity {
    pub id: String,
    pub directory_name: String,
    pub sub_directories_ids: Vec<String>,
    pub children_ids: Vec<String>,
    pub parent_id: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntity {
    pub common: Common,
    pub docstring: Option<String>,
    pub header: Vec<String>,
    pub footer: Vec<String>,
    pub imports: Vec<Import>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEntity {
    pub common: Common,
    pub class_name: String,
    pub decorators: Option<Vec<String>>,
    pub bases: Option<Vec<String>>,
    pub docstring: Option<String>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionEntity {
    pub common: Common,
    pub function_name: String,
    pub docstring: Option<String>,
    pub decorators: Option<Vec<String>>,
    pub parameters: Option<Vec<String>>,
    pub returns: Option<String>,
    pub is_method: bool,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandaloneEntity {
    pub common: Common,
    pub variable_assignments: Option<Vec<String>>,
}

/// `Entity = Directory | Module | Class | Function | Standalone` (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Directory(DirectoryEntity),
    Module(ModuleEntity),
    Class(ClassEntity),
    Function(FunctionEntity),
    Standalone(StandaloneEntity),
}

impl Entity {
    pub fn id(&self) -> &str {
        match self {
            Entity::Directory(d) => &d.id,
            Entity::Module(m) => &m.common.id,
            Entity::Class(c) => &c.common.id,
            Entity::Function(f) => &f.common.id,
            Entity::Standalone(s) => &s.common.id,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Entity::Directory(d) => d.parent_id.as_deref(),
            Entity::Module(m) => m.common.parent_id.as_deref(),
            Entity::Class(c) => c.common.parent_id.as_deref(),
            Entity::Function(f) => f.common.parent_id.as_deref(),
            Entity::Standalone(s) => s.common.parent_id.as_deref(),
        }
    }

    pub fn children_ids(&self) -> &[String] {
        match self {
            Entity::Directory(d) => &d.children_ids,
            Entity::Module(m) => &m.common.children_ids,
            Entity::Class(c) => &c.common.children_ids,
            Entity::Function(f) => &f.common.children_ids,
            Entity::Standalone(s) => &s.common.children_ids,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            Entity::Directory(d) => d.summary.as_deref(),
            Entity::Module(m) => m.common.summary.as_deref(),
            Entity::Class(c) => c.common.summary.as_deref(),
            Entity::Function(f) => f.common.summary.as_deref(),
            Entity::Standalone(s) => s.common.summary.as_deref(),
        }
    }

    pub fn set_summary(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self {
            Entity::Directory(d) => d.summary = Some(text),
            Entity::Module(m) => m.common.summary = Some(text),
            Entity::Class(c) => c.common.summary = Some(text),
            Entity::Function(f) => f.common.summary = Some(text),
            Entity::Standalone(s) => s.common.summary = Some(text),
        }
    }

    /// The document fed to the vector store, and to the LLM in the absence
    /// of a summary. Directories have no code content (§4.8 "Directories").
    pub fn code_content(&self) -> Option<&str> {
        match self {
            Entity::Directory(_) => None,
            Entity::Module(m) => Some(&m.common.code_content),
            Entity::Class(c) => Some(&c.common.code_content),
            Entity::Function(f) => Some(&f.common.code_content),
            Entity::Standalone(s) => Some(&s.common.code_content),
        }
    }

    pub fn dependencies(&self) -> &[Dependency] {
        const EMPTY: &[Dependency] = &[];
        match self {
            Entity::Directory(_) => EMPTY,
            Entity::Module(_) => EMPTY, // modules carry dependencies via `imports`, not `dependencies`
            Entity::Class(c) => &c.common.dependencies,
            Entity::Function(f) => &f.common.dependencies,
            Entity::Standalone(s) => &s.common.dependencies,
        }
    }

    pub fn imports(&self) -> &[Import] {
        match self {
            Entity::Module(m) => &m.imports,
            _ => &[],
        }
    }

    pub fn file_path(&self) -> Option<&str> {
        match self {
            Entity::Directory(_) => None,
            Entity::Module(m) => Some(&m.common.file_path),
            Entity::Class(c) => Some(&c.common.file_path),
            Entity::Function(f) => Some(&f.common.file_path),
            Entity::Standalone(s) => Some(&s.common.file_path),
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            Entity::Directory(_) => BlockType::Directory,
            Entity::Module(_) => BlockType::Module,
            Entity::Class(_) => BlockType::Class,
            Entity::Function(_) => BlockType::Function,
            Entity::Standalone(_) => BlockType::Standalone,
        }
    }

    /// Validates the invariants named in §4.2: non-empty `parent_id` unless
    /// this is a directory-less module, non-empty names, and (structurally
    /// enforced by the type system for everything already parsed)
    /// `import_module_type` within the closed enum.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Entity::Directory(_) => Ok(()),
            Entity::Module(m) => {
                // A module's parent_id may legitimately be absent only when
                // it has no containing directory (e.g. a root-level file).
                let _ = &m.common;
                Ok(())
            }
            Entity::Class(c) => {
                if c.common.parent_id.as_deref().unwrap_or("").is_empty() {
                    return Err(DomainError::invalid_entity(
                        &c.common.id,
                        "class entity requires a non-empty parent_id",
                    ));
                }
                if c.class_name.is_empty() {
                    return Err(DomainError::invalid_entity(
                        &c.common.id,
                        "class_name must be non-empty",
                    ));
                }
                Ok(())
            }
            Entity::Function(f) => {
                if f.common.parent_id.as_deref().unwrap_or("").is_empty() {
                    return Err(DomainError::invalid_entity(
                        &f.common.id,
                        "function entity requires a non-empty parent_id",
                    ));
                }
                if f.function_name.is_empty() {
                    return Err(DomainError::invalid_entity(
                        &f.common.id,
                        "function_name must be non-empty",
                    ));
                }
                Ok(())
            }
            Entity::Standalone(s) => {
                if s.common.parent_id.as_deref().unwrap_or("").is_empty() {
                    return Err(DomainError::invalid_entity(
                        &s.common.id,
                        "standalone block entity requires a non-empty parent_id",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Flat projection to scalar/stringified values for the vector store's
    /// metadata (§4.2). String-valued keys whose source field is absent map
    /// to the empty string rather than being omitted, so the schema stays
    /// stable across entities.
    pub fn to_metadata(&self) -> Metadata {
        let mut m = Metadata::new();
        m.insert("id", MetaValue::Text(self.id().to_string()));
        m.insert(
            "block_type",
            MetaValue::Text(self.block_type().as_str().to_string()),
        );
        m.insert(
            "file_path",
            MetaValue::Text(self.file_path().unwrap_or("").to_string()),
        );
        m.insert(
            "parent_id",
            MetaValue::Text(self.parent_id().unwrap_or("").to_string()),
        );
        m.insert(
            "summary",
            MetaValue::Text(self.summary().unwrap_or("").to_string()),
        );
        match self {
            Entity::Directory(_) => {}
            Entity::Module(md) => {
                m.insert("start_line", MetaValue::Int(md.common.start_line as i64));
                m.insert("end_line", MetaValue::Int(md.common.end_line as i64));
                m.insert(
                    "docstring",
                    MetaValue::Text(md.docstring.clone().unwrap_or_default()),
                );
            }
            Entity::Class(c) => {
                m.insert("start_line", MetaValue::Int(c.common.start_line as i64));
                m.insert("end_line", MetaValue::Int(c.common.end_line as i64));
                m.insert("class_name", MetaValue::Text(c.class_name.clone()));
                m.insert(
                    "docstring",
                    MetaValue::Text(c.docstring.clone().unwrap_or_default()),
                );
            }
            Entity::Function(f) => {
                m.insert("start_line", MetaValue::Int(f.common.start_line as i64));
                m.insert("end_line", MetaValue::Int(f.common.end_line as i64));
                m.insert("function_name", MetaValue::Text(f.function_name.clone()));
                m.insert("is_method", MetaValue::Bool(f.is_method));
                m.insert("is_async", MetaValue::Bool(f.is_async));
                m.insert(
                    "docstring",
                    MetaValue::Text(f.docstring.clone().unwrap_or_default()),
                );
            }
            Entity::Standalone(s) => {
                m.insert("start_line", MetaValue::Int(s.common.start_line as i64));
                m.insert("end_line", MetaValue::Int(s.common.end_line as i64));
            }
        }
        m
    }

    /// Inverse of [`Entity::to_metadata`], used when reading entities back
    /// from the vector store. Required fields absent fail with
    /// `InvalidEntity`.
    pub fn from_metadata(meta: &Metadata, code_content: String) -> Result<Entity, DomainError> {
        let id = meta.require_text("id")?;
        let block_type = meta.require_text("block_type")?;
        let file_path = meta.get_text("file_path").unwrap_or_default();
        let parent_id = meta
            .get_text("parent_id")
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let summary = meta
            .get_text("summary")
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let start_line = meta.get_int("start_line").unwrap_or(0) as u32;
        let end_line = meta.get_int("end_line").unwrap_or(0) as u32;

        let mut common = Common::new(id, file_path);
        common.parent_id = parent_id;
        common.start_line = start_line;
        common.end_line = end_line;
        common.code_content = code_content;
        common.summary = summary;

        match block_type.as_str() {
            "DIRECTORY" => Err(DomainError::invalid_entity(
                common.id,
                "directories are not stored in the vector collection",
            )),
            "MODULE" => Ok(Entity::Module(ModuleEntity {
                docstring: meta.get_text("docstring").map(str::to_string),
                header: Vec::new(),
                footer: Vec::new(),
                imports: Vec::new(),
                common,
            })),
            "CLASS" => {
                let class_name = meta.require_text("class_name")?;
                Ok(Entity::Class(ClassEntity {
                    class_name,
                    decorators: None,
                    bases: None,
                    docstring: meta.get_text("docstring").map(str::to_string),
                    keywords: None,
                    common,
                }))
            }
            "FUNCTION" => {
                let function_name = meta.require_text("function_name")?;
                Ok(Entity::Function(FunctionEntity {
                    function_name,
                    docstring: meta.get_text("docstring").map(str::to_string),
                    decorators: None,
                    parameters: None,
                    returns: None,
                    is_method: meta.get_bool("is_method").unwrap_or(false),
                    is_async: meta.get_bool("is_async").unwrap_or(false),
                    common,
                }))
            }
            "STANDALONE_BLOCK" => Ok(Entity::Standalone(StandaloneEntity {
                variable_assignments: None,
                common,
            })),
            other => Err(DomainError::invalid_entity(
                common.id,
                format!("unknown block_type '{other}' in stored metadata"),
            )),
        }
    }
}

/// Validates the closed enum used for import classification when parsing it
/// back from an untyped string (e.g. from a serialized fixture). Any value
/// outside the three known variants is `InvalidEntity` per §4.2.
pub fn parse_import_module_type(raw: &str) -> Result<ImportModuleType, DomainError> {
    ImportModuleType::parse(raw)
        .ok_or_else(|| DomainError::invalid_entity(raw, format!("unknown import_module_type '{raw}'")))
}

/// Flattens the entity set's cross-references into an explicit edge list,
/// used by callers that build a graph store from a freshly parsed set. Not
/// part of the entity model's invariants per se, but a convenience shared by
/// every collaborator that needs "parent edges + dependency edges" (C3's
/// ensure_schema callers, tests, and the resolver).
pub fn parent_child_pairs(entities: &[Entity]) -> Vec<(String, String)> {
    let mut pairs = BTreeMap::new();
    for e in entities {
        for child in e.children_ids() {
            pairs.insert((e.id().to_string(), child.clone()), ());
        }
    }
    pairs.into_keys().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id;

    fn sample_module(path: &str) -> ModuleEntity {
        ModuleEntity {
            common: Common::new(id::module_id(path), path),
            docstring: None,
            header: Vec::new(),
            footer: Vec::new(),
            imports: Vec::new(),
        }
    }

    #[test]
    fn class_without_parent_is_invalid() {
        let mut c = ClassEntity {
            common: Common::new("free-floating", "a.py"),
            class_name: "Foo".into(),
            decorators: None,
            bases: None,
            docstring: None,
            keywords: None,
        };
        c.common.parent_id = None;
        let e = Entity::Class(c);
        assert!(e.validate().is_err());
    }

    #[test]
    fn module_with_no_parent_is_valid() {
        let m = sample_module("a.py");
        assert!(Entity::Module(m).validate().is_ok());
    }

    #[test]
    fn metadata_roundtrip_preserves_required_fields() {
        let m = sample_module("a.py");
        let e = Entity::Module(m);
        let meta = e.to_metadata();
        let back = Entity::from_metadata(&meta, "code".into()).unwrap();
        assert_eq!(back.id(), e.id());
        assert_eq!(back.block_type(), BlockType::Module);
    }

    #[test]
    fn metadata_missing_required_field_fails() {
        let mut meta = Metadata::new();
        meta.insert("block_type", MetaValue::Text("CLASS".into()));
        meta.insert("id", MetaValue::Text("x".into()));
        // class_name intentionally omitted
        assert!(Entity::from_metadata(&meta, String::new()).is_err());
    }
}
