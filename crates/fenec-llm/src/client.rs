//! The LLM client surface (§6: "A single call `summarize(prompt,
//! system_message) -> {text, prompt_tokens, completion_tokens}` or an
//! equivalent test stub that echoes its inputs with fixed token counts").
//!
//! The real HTTP client (prompt rendering already done upstream, retries,
//! provider routing) is an external collaborator — see `ploke-llm`'s
//! `manager` module for what that looks like at full scale. This crate only
//! owns the trait and a deterministic stand-in used for dry runs and tests.

use async_trait::async_trait;

use crate::error::LlmError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub text: String,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn summarize(&self, prompt: &str, system_message: &str) -> Result<LlmResponse, LlmError>;
}

/// Echoes a fixed-size slice of the prompt back as the "summary", with token
/// counts derived from whitespace-split word counts. Used for `--no-chat`
/// dry runs and throughout the test suite so summarization can be exercised
/// without a network call.
#[derive(Debug, Clone, Default)]
pub struct DryRunLlm {
    pub echo_chars: usize,
}

impl DryRunLlm {
    pub fn new() -> Self {
        Self { echo_chars: 200 }
    }
}

#[async_trait]
impl LlmClient for DryRunLlm {
    async fn summarize(&self, prompt: &str, system_message: &str) -> Result<LlmResponse, LlmError> {
        let snippet: String = prompt.chars().take(self.echo_chars).collect();
        let text = format!("[dry-run summary] {snippet}");
        Ok(LlmResponse {
            text,
            prompt_tokens: (prompt.split_whitespace().count() + system_message.split_whitespace().count())
                as u64,
            completion_tokens: text.split_whitespace().count() as u64,
        })
    }
}
