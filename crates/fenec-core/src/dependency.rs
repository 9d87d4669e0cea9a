//! Import and local-dependency records attached to entities (§3).

use serde::{Deserialize, Serialize};

/// Classification of where an imported name comes from. Only `Local`
/// imports are eligible for resolution by the import resolver (C5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportModuleType {
    StandardLibrary,
    ThirdParty,
    Local,
}

impl ImportModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportModuleType::StandardLibrary => "STANDARD_LIBRARY",
            ImportModuleType::ThirdParty => "THIRD_PARTY",
            ImportModuleType::Local => "LOCAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "STANDARD_LIBRARY" => Some(Self::StandardLibrary),
            "THIRD_PARTY" => Some(Self::ThirdParty),
            "LOCAL" => Some(Self::Local),
            _ => None,
        }
    }
}

/// One name brought in by an `Import`, e.g. `b as c` in `from a import b as c`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportName {
    pub name: String,
    pub as_name: Option<String>,
    /// Set by the import resolver (C5) when `name` resolves to a concrete
    /// child entity of the imported module.
    pub local_block_id: Option<String>,
}

impl ImportName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            as_name: None,
            local_block_id: None,
        }
    }

    /// The name a reader of the importing module would use to refer to this
    /// import: the alias if present, otherwise the original name.
    pub fn effective_name(&self) -> &str {
        self.as_name.as_deref().unwrap_or(&self.name)
    }
}

/// A single `import ...` / `from ... import ...` statement's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub import_names: Vec<ImportName>,
    pub imported_from: Option<String>,
    pub import_module_type: ImportModuleType,
    /// Set by the import resolver (C5) when this is a `Local` import and a
    /// target module was found.
    pub local_module_id: Option<String>,
}

impl Import {
    pub fn new(import_module_type: ImportModuleType) -> Self {
        Self {
            import_names: Vec::new(),
            imported_from: None,
            import_module_type,
            local_module_id: None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.import_module_type == ImportModuleType::Local
    }

    /// Renders `from X import a as b, c` / `import a as b, c`, used as raw
    /// context for non-local imports (§4.8c, "import details").
    pub fn render_details(&self) -> String {
        let names = self
            .import_names
            .iter()
            .map(|n| match &n.as_name {
                Some(alias) => format!("{} as {alias}", n.name),
                None => n.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        match &self.imported_from {
            Some(from) => format!("from {from} import {names}"),
            None => format!("import {names}"),
        }
    }
}

/// A dependency on another entity within the same graph (as opposed to an
/// external import).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDep {
    pub code_block_id: String,
    /// Mirrors the owning import's resolution once the resolver has run, so
    /// the engine can look up a dependency's summary without re-resolving.
    pub local_module_id: Option<String>,
    pub local_block_id: Option<String>,
}

impl LocalDep {
    pub fn new(code_block_id: impl Into<String>) -> Self {
        Self {
            code_block_id: code_block_id.into(),
            local_module_id: None,
            local_block_id: None,
        }
    }
}

/// Either kind of dependency record an entity can carry (§3: "dependencies
/// (list of `Import | LocalDep`)").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dependency {
    Import(Import),
    Local(LocalDep),
}
