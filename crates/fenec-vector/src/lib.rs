#![doc = r#"
fenec-vector — the vector store adapter (C4): a single flat collection of
`(id, document, metadata)` records.

The real embedding/ANN backend is out of scope (`spec.md` §1, "the ... vector
database backends"); this crate defines the [`VectorStore`] trait the engine
writes through, plus [`InMemoryVectorStore`], a reference implementation that
scores queries by lexical token overlap rather than a learned embedding —
enough to exercise upsert/query/reset end to end without a model.
"#]

use std::collections::HashSet;

use dashmap::DashMap;
use fenec_core::{Entity, Metadata};
use fenec_error::Result;

/// Default collection name (§6, "One collection (default name `fenec`)").
pub const DEFAULT_COLLECTION: &str = "fenec";

/// Subset of `{metadatas, documents, embeddings, distances}` a caller wants
/// back from [`VectorStore::query`]. `embeddings` is accepted but the
/// in-memory store never returns them (it has none to return).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Metadatas,
    Documents,
    Embeddings,
    Distances,
}

#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub ids: Vec<Vec<String>>,
    pub documents: Vec<Vec<String>>,
    pub metadatas: Vec<Vec<Metadata>>,
    pub distances: Vec<Vec<f32>>,
}

pub trait VectorStore: Send + Sync {
    /// Flattens every non-directory entity to `(id, code_content, metadata)`
    /// and upserts it (§4.4).
    fn upsert_many(&self, entities: &[Entity]) -> Result<()>;
    fn query(&self, texts: &[String], n: usize, include: &[Include]) -> QueryResult;
    fn reset(&self) -> Result<()>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
struct Record {
    document: String,
    metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    records: DashMap<String, Record>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tokenize(text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }

    fn score(query_tokens: &HashSet<String>, document: &str) -> f32 {
        let doc_tokens = Self::tokenize(document);
        if doc_tokens.is_empty() || query_tokens.is_empty() {
            return 0.0;
        }
        let overlap = query_tokens.intersection(&doc_tokens).count();
        overlap as f32 / query_tokens.len() as f32
    }
}

impl VectorStore for InMemoryVectorStore {
    fn upsert_many(&self, entities: &[Entity]) -> Result<()> {
        for entity in entities {
            let Some(content) = entity.code_content() else {
                continue;
            };
            self.records.insert(
                entity.id().to_string(),
                Record {
                    document: content.to_string(),
                    metadata: entity.to_metadata(),
                },
            );
        }
        Ok(())
    }

    fn query(&self, texts: &[String], n: usize, include: &[Include]) -> QueryResult {
        let want = |i: Include| include.contains(&i);
        let mut result = QueryResult::default();
        for text in texts {
            let query_tokens = Self::tokenize(text);
            let mut scored: Vec<(String, f32, Metadata)> = self
                .records
                .iter()
                .map(|entry| {
                    let score = Self::score(&query_tokens, &entry.document);
                    (entry.key().clone(), score, entry.metadata.clone())
                })
                .collect();
            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            scored.truncate(n);

            let mut ids = Vec::with_capacity(scored.len());
            let mut documents = Vec::with_capacity(scored.len());
            let mut metadatas = Vec::with_capacity(scored.len());
            let mut distances = Vec::with_capacity(scored.len());
            for (id, score, meta) in &scored {
                if want(Include::Documents) {
                    if let Some(entry) = self.records.get(id) {
                        documents.push(entry.document.clone());
                    }
                }
                if want(Include::Metadatas) {
                    metadatas.push(meta.clone());
                }
                if want(Include::Distances) {
                    distances.push(1.0 - score);
                }
                ids.push(id.clone());
            }
            result.ids.push(ids);
            if want(Include::Documents) {
                result.documents.push(documents);
            }
            if want(Include::Metadatas) {
                result.metadatas.push(metadatas);
            }
            if want(Include::Distances) {
                result.distances.push(distances);
            }
        }
        result
    }

    fn reset(&self) -> Result<()> {
        self.records.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenec_core::{id, Common, ModuleEntity};

    fn module(path: &str, code: &str) -> Entity {
        let mut common = Common::new(id::module_id(path), path);
        common.code_content = code.to_string();
        Entity::Module(ModuleEntity {
            common,
            docstring: None,
            header: Vec::new(),
            footer: Vec::new(),
            imports: Vec::new(),
        })
    }

    #[test]
    fn upsert_many_skips_directories_and_counts_the_rest() {
        let store = InMemoryVectorStore::new();
        let entities = vec![
            module("a.py", "def handshake(): pass"),
            module("b.py", "def teardown(): pass"),
        ];
        store.upsert_many(&entities).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn query_ranks_by_token_overlap() {
        let store = InMemoryVectorStore::new();
        let entities = vec![
            module("a.py", "def handshake(): pass"),
            module("b.py", "def teardown(): pass"),
        ];
        store.upsert_many(&entities).unwrap();
        let result = store.query(&["handshake".to_string()], 1, &[Include::Documents]);
        assert_eq!(result.documents[0][0], "def handshake(): pass");
    }

    #[test]
    fn reset_empties_the_collection() {
        let store = InMemoryVectorStore::new();
        store.upsert_many(&[module("a.py", "x")]).unwrap();
        store.reset().unwrap();
        assert!(store.is_empty());
    }
}
