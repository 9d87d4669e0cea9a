//! The `last_commit.json` sidecar (§6, "stored in `<output_dir>/last_commit.json`
//! as `{"last_commit": "<marker>"}"). Ported directly from
//! `graph_db_updater.py`'s `_save_last_commit_hash`/`_get_last_commit_hash`.

use std::path::{Path, PathBuf};

use fenec_error::{DomainError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LastCommit {
    last_commit: String,
}

pub fn sidecar_path(output_dir: &Path) -> PathBuf {
    output_dir.join("last_commit.json")
}

/// Returns the empty string if the sidecar doesn't exist yet, matching the
/// original's "file doesn't exist" fallback.
pub fn read_marker(output_dir: &Path) -> Result<String> {
    let path = sidecar_path(output_dir);
    if !path.exists() {
        return Ok(String::new());
    }
    let contents = std::fs::read_to_string(&path)?;
    let parsed: LastCommit = serde_json::from_str(&contents).map_err(|e| {
        DomainError::store(path.display().to_string(), format!("malformed last_commit.json: {e}"))
    })?;
    Ok(parsed.last_commit)
}

pub fn write_marker(output_dir: &Path, marker: &str) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;
    let path = sidecar_path(output_dir);
    let body = LastCommit {
        last_commit: marker.to_string(),
    };
    let serialized = serde_json::to_string(&body).map_err(|e| {
        DomainError::store(path.display().to_string(), format!("failed to serialize marker: {e}"))
    })?;
    std::fs::write(&path, serialized)?;
    Ok(())
}
