//! On-disk JSON export (§6 "On-disk state", supplemented by
//! `json_handler.py`'s per-id file naming, §11): one file per entity under
//! `<output_dir>/json/`, plus a `directory_map.json` mirroring the parser's
//! `directory_modules` map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fenec_core::{id::BlockType, Entity};
use fenec_error::Result;

/// Maximum file-name length for a directory entity's exported JSON. The
/// original truncates directory ids specifically because they are built
/// from a full directory path and can get long; non-directory ids are never
/// truncated.
const DIRECTORY_ID_FILENAME_LIMIT: usize = 50;

fn file_name_for(entity: &Entity) -> String {
    let raw = entity.id().replace('/', ":");
    if entity.block_type() == BlockType::Directory {
        raw.chars().take(DIRECTORY_ID_FILENAME_LIMIT).collect()
    } else {
        raw
    }
}

/// Writes `<output_dir>/json/<file_name>.json` for every entity and
/// `<directory_map_path>` for the directory map, overwriting any prior
/// export of the same ids.
pub fn export(
    json_dir: &Path,
    directory_map_path: &Path,
    entities: &[Entity],
    directory_modules: &BTreeMap<String, Vec<String>>,
) -> Result<()> {
    std::fs::create_dir_all(json_dir)?;
    for entity in entities {
        let path: PathBuf = json_dir.join(format!("{}.json", file_name_for(entity)));
        let body = serde_json::to_string_pretty(entity).map_err(|e| {
            fenec_error::DomainError::store(entity.id(), format!("failed to serialize entity: {e}"))
        })?;
        std::fs::write(path, body)?;
    }

    if let Some(parent) = directory_map_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(directory_modules).map_err(|e| {
        fenec_error::DomainError::store("directory_map.json", format!("failed to serialize: {e}"))
    })?;
    std::fs::write(directory_map_path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenec_core::{id, Common, DirectoryEntity, ModuleEntity};

    #[test]
    fn module_file_name_replaces_slashes_and_is_not_truncated() {
        let m = ModuleEntity {
            common: Common::new(id::module_id("pkg/sub/deep/module.py"), "pkg/sub/deep/module.py"),
            docstring: None,
            header: Vec::new(),
            footer: Vec::new(),
            imports: Vec::new(),
        };
        let name = file_name_for(&Entity::Module(m));
        assert!(!name.contains('/'));
        assert!(name.contains("pkg:sub:deep:module.py"));
    }

    #[test]
    fn directory_file_name_is_truncated() {
        let long_path = "a/".repeat(40) + "tail";
        let d = Entity::Directory(DirectoryEntity {
            id: id::directory_id(&long_path),
            directory_name: "tail".into(),
            sub_directories_ids: Vec::new(),
            children_ids: Vec::new(),
            parent_id: None,
            summary: None,
        });
        let name = file_name_for(&d);
        assert!(name.len() <= DIRECTORY_ID_FILENAME_LIMIT);
    }

    #[test]
    fn export_writes_one_file_per_entity_and_the_directory_map() {
        let dir = tempfile::tempdir().unwrap();
        let json_dir = dir.path().join("json");
        let directory_map_path = dir.path().join("directory_map.json");
        let entities = fenec_test_utils::three_module_chain();
        let mut directory_modules = BTreeMap::new();
        directory_modules.insert("".to_string(), vec!["a.py".to_string()]);

        export(&json_dir, &directory_map_path, &entities, &directory_modules).unwrap();

        let written: Vec<_> = std::fs::read_dir(&json_dir).unwrap().collect();
        assert_eq!(written.len(), entities.len());
        assert!(directory_map_path.exists());
    }
}
