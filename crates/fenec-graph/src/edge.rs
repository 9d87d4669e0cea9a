//! The single edge collection's row shape (§6: "edge collection `code_edges`.
//! Edges carry `source_type`, `target_type` in addition to endpoints").
//!
//! Two edges are the same edge iff `(from_id, to_id)` match — `upsert_edge`
//! is idempotent on that pair regardless of `kind`, matching §4.3.

use fenec_core::BlockType;

/// Distinguishes a containment (parent→child) edge from a dependency
/// (dependency→dependent, per invariant I-EDGE) edge. Not named in the
/// spec's literal edge shape, but needed so the planner (C7) can walk only
/// dependency edges while change detection and generic reachability (C3)
/// walk all of them — both views share one underlying collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Containment,
    Dependency,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from_id: String,
    pub to_id: String,
    pub from_type: BlockType,
    pub to_type: BlockType,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        from_type: BlockType,
        to_type: BlockType,
        kind: EdgeKind,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            from_type,
            to_type,
            kind,
        }
    }
}
