use thiserror::Error;

/// Failure kinds specific to an LLM call, folded into [`fenec_error::Error`]
/// at the boundary via `From`. Mirrors the shape of a provider client's own
/// error enum (network/API/empty-response), narrowed to what the
/// summarization engine needs to decide "treat as no summary" vs abort.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("request to LLM provider failed: {0}")]
    Request(String),

    #[error("LLM provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("LLM call timed out")]
    Timeout,

    #[error("LLM returned an empty response for {entity_id}")]
    EmptyResponse { entity_id: String },
}

impl From<LlmError> for fenec_error::Error {
    fn from(value: LlmError) -> Self {
        let entity_id = match &value {
            LlmError::EmptyResponse { entity_id } => entity_id.clone(),
            _ => "<unknown>".to_string(),
        };
        fenec_error::Error::Domain(fenec_error::DomainError::llm(entity_id, value.to_string()))
    }
}
