#![doc = r#"
fenec-llm — the LLM client trait and a dry-run stub.

Everything that makes a real call (provider routing, retries, prompt
templating beyond what `fenec-summarize::prompt` already did) is out of
scope; this crate is the seam the engine calls through.
"#]

pub mod client;
pub mod error;

pub use client::{DryRunLlm, LlmClient, LlmResponse};
pub use error::LlmError;
