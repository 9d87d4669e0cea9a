//! The structured, non-fatal-by-default error kinds named in the core design.
//!
//! Each variant corresponds to one of the error kinds enumerated in the
//! propagation policy: `InvalidEntity`, `StoreError`, `LLMError`,
//! `PromptError`, `PlanError`, `ConfigError`.

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum DomainError {
    /// Model validation failed while constructing or loading an entity.
    #[error("invalid entity {id}: {message}")]
    InvalidEntity { id: String, message: String },

    /// The graph or vector store backend rejected or failed an operation.
    #[error("store error for {id}: {message}")]
    StoreError { id: String, message: String },

    /// The LLM call failed outright or returned an empty response.
    #[error("LLM call failed for {entity_id}: {message}")]
    LLMError { entity_id: String, message: String },

    /// No prompt template is registered for the given strategy key.
    #[error("no prompt template for key {key}")]
    PromptError { key: String },

    /// An unknown block type was encountered while planning traversal order.
    #[error("unknown block type for id {id} encountered during planning")]
    PlanError { id: String },

    /// Invalid run configuration (e.g. `num_passes` outside `{1, 3}`).
    #[error("invalid configuration: {message}")]
    ConfigError { message: String },
}

impl DomainError {
    pub fn invalid_entity(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            id: id.into(),
            message: message.into(),
        }
    }

    pub fn store(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreError {
            id: id.into(),
            message: message.into(),
        }
    }

    pub fn llm(entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LLMError {
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    pub fn prompt(key: impl Into<String>) -> Self {
        Self::PromptError { key: key.into() }
    }

    pub fn plan(id: impl Into<String>) -> Self {
        Self::PlanError { id: id.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Whether this error is fatal to the whole run per the propagation
    /// policy (`PromptError` and `ConfigError` are; everything else is
    /// recoverable at the call site).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::PromptError { .. } | Self::ConfigError { .. })
    }
}
