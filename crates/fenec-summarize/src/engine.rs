//! The summarization engine (C8): drives the planner across one or three
//! passes, gathers context per entity, calls the LLM, and writes results
//! back to the graph store.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use fenec_core::{id, Dependency, Entity, Import};
use fenec_error::{DomainError, Result};
use fenec_graph::GraphStore;
use fenec_llm::LlmClient;

use crate::cancel::CancellationToken;
use crate::key::PromptKey;
use crate::planner::{plan_for_pass, Direction};
use crate::renderer::render;

const SYSTEM_MESSAGE: &str =
    "You are a code summarization assistant producing prose descriptions for a retrieval index.";

const FINAL_SUMMARY_MARKER: &str = "FINAL SUMMARY:";

/// Drives multi-pass summarization and accounts for token spend. One
/// `Engine` is built per run; its counters accumulate across every pass.
pub struct Engine {
    price_per_prompt_token: f64,
    price_per_completion_token: f64,
    prompt_tokens: AtomicU64,
    completion_tokens: AtomicU64,
}

impl Engine {
    pub fn new(price_per_prompt_token: f64, price_per_completion_token: f64) -> Self {
        Self {
            price_per_prompt_token,
            price_per_completion_token,
            prompt_tokens: AtomicU64::new(0),
            completion_tokens: AtomicU64::new(0),
        }
    }

    pub fn prompt_tokens(&self) -> u64 {
        self.prompt_tokens.load(Ordering::Relaxed)
    }

    pub fn completion_tokens(&self) -> u64 {
        self.completion_tokens.load(Ordering::Relaxed)
    }

    /// `total_cost = prompt_tokens * P + completion_tokens * C` (§4.8).
    pub fn total_cost(&self) -> f64 {
        self.prompt_tokens() as f64 * self.price_per_prompt_token
            + self.completion_tokens() as f64 * self.price_per_completion_token
    }

    /// Runs every pass in `1..=num_passes` (`num_passes` must be 1 or 3) over
    /// `seeds`, writing summaries to `store` as it goes. Returns without
    /// error if cancelled partway through; already-written summaries remain
    /// (§5, "Cancellation and timeouts").
    pub async fn run(
        &self,
        store: &dyn GraphStore,
        llm: &dyn LlmClient,
        seeds: &[String],
        num_passes: u32,
        cancellation: Option<&CancellationToken>,
    ) -> Result<()> {
        if num_passes != 1 && num_passes != 3 {
            return Err(DomainError::config(format!(
                "num_passes must be 1 or 3, got {num_passes}"
            ))
            .into());
        }

        for pass_number in 1..=num_passes {
            let direction = Direction::for_pass(pass_number);
            let plan = plan_for_pass(store, seeds, pass_number);
            let mut summarized_this_pass: HashSet<String> = HashSet::new();

            for id in plan {
                if cancellation.is_some_and(CancellationToken::is_cancelled) {
                    return Ok(());
                }

                let Some(entity) = store.get(&id) else {
                    continue;
                };

                // §4.1: `UNKNOWN` must never appear for an id this system
                // created. Finding one on a stored id mid-traversal is a
                // `PlanError` (§7), fatal for the current pass; summaries
                // already written in this and prior passes are kept since we
                // never roll back a write.
                if id::block_type_of(&id) != entity.block_type() {
                    return Err(DomainError::plan(id).into());
                }

                self.summarize_one(store, llm, &entity, pass_number, direction, &summarized_this_pass)
                    .await?;
                if entity_has_fresh_summary(store, &id) {
                    summarized_this_pass.insert(id);
                }
            }
        }

        Ok(())
    }

    async fn summarize_one(
        &self,
        store: &dyn GraphStore,
        llm: &dyn LlmClient,
        entity: &Entity,
        pass_number: u32,
        direction: Direction,
        summarized_this_pass: &HashSet<String>,
    ) -> Result<()> {
        let id = entity.id().to_string();
        let previous_summary = entity.summary().map(str::to_string);
        let children = children_summaries(store, entity);
        let (deps, import_details) = dependency_context(store, entity);
        let parent_summary = parent_summary(store, entity, direction, summarized_this_pass);

        let key = PromptKey::new(
            pass_number,
            !children.is_empty(),
            !deps.is_empty(),
            !import_details.is_empty(),
            parent_summary.is_some(),
        );

        let mut values: HashMap<&str, String> = HashMap::new();
        values.insert("code_content", entity.code_content().unwrap_or("").to_string());
        if !children.is_empty() {
            values.insert("children_summaries", children.join("\n"));
        }
        if !deps.is_empty() {
            values.insert("dependency_summaries", deps.join("\n"));
        }
        if !import_details.is_empty() {
            values.insert("import_details", import_details.join("\n"));
        }
        if let Some(parent) = &parent_summary {
            values.insert("parent_summary", parent.clone());
        }
        if let Some(previous) = &previous_summary {
            values.insert("previous_summary", previous.clone());
        }

        let prompt = render(&key, &values)?;

        let response = match llm.summarize(&prompt, SYSTEM_MESSAGE).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(entity_id = %id, error = %err, "LLM call failed, keeping previous summary");
                return Ok(());
            }
        };

        self.prompt_tokens.fetch_add(response.prompt_tokens, Ordering::Relaxed);
        self.completion_tokens
            .fetch_add(response.completion_tokens, Ordering::Relaxed);

        let cleaned = strip_marker(&response.text);
        if cleaned.is_empty() {
            tracing::warn!(entity_id = %id, "LLM returned no summary, keeping previous");
            return Ok(());
        }

        store.update_summary(&id, cleaned)?;
        Ok(())
    }
}

fn entity_has_fresh_summary(store: &dyn GraphStore, id: &str) -> bool {
    store.get(id).is_some_and(|e| e.summary().is_some())
}

fn children_summaries(store: &dyn GraphStore, entity: &Entity) -> Vec<String> {
    entity
        .children_ids()
        .iter()
        .filter_map(|child_id| {
            let child = store.get(child_id)?;
            if matches!(child, Entity::Directory(_)) {
                return None;
            }
            Some(summary_or_code(&child))
        })
        .collect()
}

fn summary_or_code(entity: &Entity) -> String {
    entity
        .summary()
        .map(str::to_string)
        .unwrap_or_else(|| entity.code_content().unwrap_or("").to_string())
}

/// Resolves a local import/dependency to its target's summary (or code as a
/// fallback), preferring the more specific `local_block_id` over the
/// module-level `local_module_id`.
fn resolve_local(
    store: &dyn GraphStore,
    local_block_id: Option<&str>,
    local_module_id: Option<&str>,
) -> Option<String> {
    let target = local_block_id.or(local_module_id)?;
    store.get(target).map(|e| summary_or_code(&e))
}

fn resolve_import(store: &dyn GraphStore, import: &Import) -> Vec<String> {
    let mut resolved = Vec::new();
    for name in &import.import_names {
        if let Some(summary) = resolve_local(store, name.local_block_id.as_deref(), import.local_module_id.as_deref()) {
            resolved.push(summary);
        }
    }
    if resolved.is_empty() {
        if let Some(summary) = resolve_local(store, None, import.local_module_id.as_deref()) {
            resolved.push(summary);
        }
    }
    resolved
}

/// Gathers (dependency summaries, non-local import details) for an entity
/// per §4.8b/c: modules walk `imports`, everything else walks `dependencies`.
fn dependency_context(store: &dyn GraphStore, entity: &Entity) -> (Vec<String>, Vec<String>) {
    let mut summaries = Vec::new();
    let mut details = Vec::new();

    if let Entity::Module(module) = entity {
        for import in &module.imports {
            if import.is_local() {
                summaries.extend(resolve_import(store, import));
            } else {
                details.push(import.render_details());
            }
        }
        return (summaries, details);
    }

    for dep in entity.dependencies() {
        match dep {
            Dependency::Import(import) if import.is_local() => {
                summaries.extend(resolve_import(store, import));
            }
            Dependency::Import(import) => details.push(import.render_details()),
            Dependency::Local(local) => {
                if let Some(summary) = resolve_local(
                    store,
                    local.local_block_id.as_deref(),
                    local.local_module_id.as_deref(),
                ) {
                    summaries.push(summary);
                }
            }
        }
    }

    (summaries, details)
}

/// Only populated on top-down passes, and only once the parent has already
/// been summarized this pass (§4.8d); the planner's preorder guarantees a
/// parent in the same seed's tree precedes its children when it does.
fn parent_summary(
    store: &dyn GraphStore,
    entity: &Entity,
    direction: Direction,
    summarized_this_pass: &HashSet<String>,
) -> Option<String> {
    if direction != Direction::TopDown {
        return None;
    }
    let parent_id = entity.parent_id()?;
    if !summarized_this_pass.contains(parent_id) {
        return None;
    }
    store.get(parent_id)?.summary().map(str::to_string)
}

/// Keeps only the text after the *last* occurrence of the marker, locking in
/// the behaviour for a doubled marker (§9 open question).
fn strip_marker(text: &str) -> &str {
    match text.rfind(FINAL_SUMMARY_MARKER) {
        Some(pos) => text[pos + FINAL_SUMMARY_MARKER.len()..].trim(),
        None => text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenec_llm::{DryRunLlm, LlmResponse};
    use fenec_test_utils::{directory_with_mixed_children, store_with, three_module_chain};

    struct ScriptedLlm {
        text: String,
    }

    #[async_trait::async_trait]
    impl LlmClient for ScriptedLlm {
        async fn summarize(&self, _prompt: &str, _system_message: &str) -> Result<LlmResponse, fenec_llm::LlmError> {
            Ok(LlmResponse {
                text: self.text.clone(),
                prompt_tokens: 10,
                completion_tokens: 5,
            })
        }
    }

    #[test]
    fn strips_text_before_the_last_marker_occurrence() {
        let text = "draft one FINAL SUMMARY: nope FINAL SUMMARY: the real one";
        assert_eq!(strip_marker(text), "the real one");
    }

    #[test]
    fn leaves_text_untouched_when_marker_absent() {
        assert_eq!(strip_marker("  plain summary  "), "plain summary");
    }

    #[tokio::test]
    async fn single_pass_run_summarizes_every_entity() {
        let entities = three_module_chain();
        let a_id = entities
            .iter()
            .find(|e| e.file_path() == Some("a.py"))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities);
        let llm = DryRunLlm::new();
        let engine = Engine::new(0.0, 0.0);

        engine.run(&store, &llm, &[a_id], 1, None).await.unwrap();

        for entity in store.all() {
            assert!(entity.summary().is_some(), "{} should have a summary", entity.id());
        }
        assert!(engine.prompt_tokens() > 0);
    }

    #[tokio::test]
    async fn three_pass_run_threads_previous_summary_forward() {
        let entities = three_module_chain();
        let a_id = entities
            .iter()
            .find(|e| e.file_path() == Some("a.py"))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities);
        let llm = ScriptedLlm {
            text: "FINAL SUMMARY: a settled description".to_string(),
        };
        let engine = Engine::new(0.0, 0.0);

        engine.run(&store, &llm, &[a_id.clone()], 3, None).await.unwrap();

        let a = store.get(&a_id).unwrap();
        assert_eq!(a.summary(), Some("a settled description"));
    }

    #[tokio::test]
    async fn invalid_pass_count_is_config_error() {
        let entities = three_module_chain();
        let store = store_with(entities);
        let llm = DryRunLlm::new();
        let engine = Engine::new(0.0, 0.0);
        let result = engine.run(&store, &llm, &[], 2, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn malformed_id_during_traversal_is_plan_error() {
        use fenec_core::{Common, ModuleEntity};
        use fenec_graph::InMemoryGraphStore;

        let store = InMemoryGraphStore::new();
        let malformed = Entity::Module(ModuleEntity {
            common: Common::new("not-a-real-id", "weird.py"),
            docstring: None,
            header: Vec::new(),
            footer: Vec::new(),
            imports: Vec::new(),
        });
        let id = malformed.id().to_string();
        store.upsert(malformed).unwrap();

        let llm = DryRunLlm::new();
        let engine = Engine::new(0.0, 0.0);
        let result = engine.run(&store, &llm, &[id], 1, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn cancellation_before_first_call_writes_nothing() {
        let entities = three_module_chain();
        let a_id = entities
            .iter()
            .find(|e| e.file_path() == Some("a.py"))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities);
        let llm = DryRunLlm::new();
        let engine = Engine::new(0.0, 0.0);
        let (token, handle) = CancellationToken::new();
        handle.cancel();

        engine.run(&store, &llm, &[a_id], 1, Some(&token)).await.unwrap();

        assert!(store.all().iter().all(|e| e.summary().is_none()));
    }

    #[tokio::test]
    async fn seeding_from_a_module_summarizes_its_whole_containment_tree() {
        let entities = directory_with_mixed_children();
        let module_id = entities
            .iter()
            .find(|e| matches!(e, Entity::Module(_)))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities.clone());
        let llm = DryRunLlm::new();
        let engine = Engine::new(0.0, 0.0);

        engine.run(&store, &llm, &[module_id], 1, None).await.unwrap();

        for entity in &entities {
            let stored = store.get(entity.id()).unwrap();
            assert!(stored.summary().is_some(), "{} should have a summary", entity.id());
        }
    }

    #[tokio::test]
    async fn directory_summary_is_built_from_its_children_summaries_not_raw_code() {
        let entities = directory_with_mixed_children();
        let directory_id = entities
            .iter()
            .find(|e| matches!(e, Entity::Directory(_)))
            .unwrap()
            .id()
            .to_string();
        let module_id = entities
            .iter()
            .find(|e| matches!(e, Entity::Module(_)))
            .unwrap()
            .id()
            .to_string();
        let store = store_with(entities);
        let llm = ScriptedLlm {
            text: "a settled description".to_string(),
        };
        let engine = Engine::new(0.0, 0.0);

        // Bottom-up (pass 1) summarizes the module before the directory, so
        // by the time the directory is summarized its only child already has
        // a summary the engine can fold in instead of raw source.
        engine.run(&store, &llm, &[module_id], 1, None).await.unwrap();

        let directory = store.get(&directory_id).unwrap();
        assert_eq!(directory.summary(), Some("a settled description"));
        assert!(directory.code_content().is_none());
    }
}
