//! Flat scalar metadata attached to a vector-store record (§4.2).
//!
//! The vector store backend is an external collaborator (out of scope, per
//! `spec.md` §1); what this crate owns is the shape of the metadata it sends
//! and expects back — a flat map of string keys to a small set of scalar
//! value kinds, mirroring what embedding/vector APIs typically accept.

use std::collections::BTreeMap;

use fenec_error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

/// A flat, ordered metadata map. Ordered (`BTreeMap`) so exported JSON and
/// test fixtures are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata(BTreeMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(MetaValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(MetaValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(MetaValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Reads a required text field, failing with `InvalidEntity` if it is
    /// missing or of the wrong kind — used when deserializing an entity back
    /// from stored metadata.
    pub fn require_text(&self, key: &str) -> Result<String, DomainError> {
        self.get_text(key)
            .map(str::to_string)
            .ok_or_else(|| DomainError::invalid_entity("<unknown>", format!("missing required field '{key}'")))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_text_is_invalid_entity() {
        let m = Metadata::new();
        assert!(m.require_text("id").is_err());
    }

    #[test]
    fn round_trips_scalars() {
        let mut m = Metadata::new();
        m.insert("a", MetaValue::Text("x".into()));
        m.insert("b", MetaValue::Int(3));
        m.insert("c", MetaValue::Bool(true));
        assert_eq!(m.get_text("a"), Some("x"));
        assert_eq!(m.get_int("b"), Some(3));
        assert_eq!(m.get_bool("c"), Some(true));
    }
}
