#![doc = r#"
fenec-vcs — the version-control integration (§6): reports changed files
since a marker and persists the marker across runs.
"#]

pub mod git;
pub mod sidecar;

pub use git::{GitVcs, Vcs};
pub use sidecar::{read_marker, sidecar_path, write_marker};
