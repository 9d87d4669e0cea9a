#![doc = r#"
fenec-ingest — the two post-parse passes that sit between the external
parser and the summarization engine: import/dependency resolution (C5) and
change detection (C6).
"#]

pub mod change_detector;
pub mod populate;
pub mod resolver;

pub use change_detector::affected_ids;
pub use populate::populate;
pub use resolver::resolve;
