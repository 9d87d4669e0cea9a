//! The parser interface (§6, "Parser interface (inbound to core)"): the
//! concrete source-language parser is an external collaborator per
//! `spec.md` §1, so this crate only defines the trait boundary plus a
//! reference implementation that reloads a previously exported JSON corpus
//! — enough to drive the full pipeline end to end in tests and dry runs
//! without a real language frontend.

use std::collections::BTreeMap;
use std::path::Path;

use fenec_core::Entity;
use fenec_error::{DomainError, Result};

/// What a source-language parser hands to the core (§6): every entity it
/// found, plus the directory -> file-name listing the JSON export mirrors
/// into `directory_map.json`.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub entities: Vec<Entity>,
    pub directory_modules: BTreeMap<String, Vec<String>>,
}

/// A concrete source-language frontend, supplied by the caller. The core
/// only requires that `parse` assign ids per §4.1, populate every field
/// named in §3 except import resolution (left to `fenec_ingest::resolve`),
/// and report file paths relative to `root_directory`.
pub trait SourceParser: Send + Sync {
    fn parse(&self, root_directory: &Path) -> Result<ParseResult>;
}

/// Reloads entities from a prior run's JSON export (`fenec-cli`'s own
/// on-disk format, §6 "On-disk state") rather than parsing source text.
/// Used by the CLI's dry-run/demo path and by integration tests that want a
/// deterministic, parser-free corpus.
pub struct JsonCorpusParser {
    pub json_dir: std::path::PathBuf,
    pub directory_map_path: std::path::PathBuf,
}

impl SourceParser for JsonCorpusParser {
    fn parse(&self, _root_directory: &Path) -> Result<ParseResult> {
        if !self.json_dir.exists() {
            tracing::info!(
                json_dir = %self.json_dir.display(),
                "no prior export to reload; starting from an empty corpus"
            );
            return Ok(ParseResult::default());
        }
        let mut entities = Vec::new();
        let read_dir = std::fs::read_dir(&self.json_dir)?;
        for entry in read_dir {
            let entry = entry?;
            if entry.path().extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = std::fs::read_to_string(entry.path())?;
            let entity: Entity = serde_json::from_str(&contents).map_err(|e| {
                DomainError::invalid_entity(
                    entry.path().display().to_string(),
                    format!("malformed entity json: {e}"),
                )
            })?;
            entities.push(entity);
        }

        let directory_modules = if self.directory_map_path.exists() {
            let contents = std::fs::read_to_string(&self.directory_map_path)?;
            serde_json::from_str(&contents).map_err(|e| {
                DomainError::invalid_entity(
                    self.directory_map_path.display().to_string(),
                    format!("malformed directory_map.json: {e}"),
                )
            })?
        } else {
            BTreeMap::new()
        };

        Ok(ParseResult {
            entities,
            directory_modules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::export;
    use fenec_test_utils::three_module_chain;

    #[test]
    fn round_trips_a_previously_exported_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let json_dir = dir.path().join("json");
        let directory_map_path = dir.path().join("directory_map.json");
        let directory_map = BTreeMap::new();

        export(&json_dir, &directory_map_path, &three_module_chain(), &directory_map).unwrap();

        let parser = JsonCorpusParser {
            json_dir,
            directory_map_path,
        };
        let result = parser.parse(Path::new(".")).unwrap();
        assert_eq!(result.entities.len(), 3);
    }
}
