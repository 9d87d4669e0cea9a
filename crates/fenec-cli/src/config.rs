//! Run configuration (§6 CLI surface, §10.3): the CLI's positional path and
//! flags folded into a single validated [`RunConfig`], grounded in
//! `ploke-tui::user_config::UserConfig`'s plain-struct-plus-defaults shape,
//! simplified since this is a one-shot batch run rather than an interactive
//! session with config reload.

use std::path::{Path, PathBuf};

use clap::Parser;
use fenec_error::{DomainError, Result};

/// Which set of modules to seed the planner from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Summarize only entities affected by files changed since the last
    /// recorded commit marker (§4.6).
    Incremental,
    /// Reset the graph and vector stores and summarize everything (§3
    /// "Lifecycle": "entities are destroyed only by a full reset").
    Full,
}

#[derive(Parser, Debug)]
#[command(
    name = "fenec",
    version,
    about = "Builds a code graph, summarizes it via an LLM, and indexes the result for retrieval"
)]
struct Args {
    /// Repository root to ingest.
    path: PathBuf,

    /// Directory written output (JSON export, last_commit.json) goes under.
    #[arg(long, default_value = "fenec_output")]
    output_dir: PathBuf,

    /// Summarize only files changed since the last recorded commit marker.
    /// This is the default mode; the flag exists so it can be named
    /// explicitly alongside `--update-all`.
    #[arg(id = "update", long = "update", conflicts_with = "update_all")]
    update: bool,

    /// Reset every store and summarize the whole repository.
    #[arg(long, conflicts_with = "update")]
    update_all: bool,

    /// Call the configured LLM. This is the default; the flag exists so it
    /// can be named explicitly alongside `--no-chat`.
    #[arg(id = "chat", long = "chat", conflicts_with = "no_chat")]
    chat: bool,

    /// Skip the LLM and use the deterministic dry-run stub (§6, "or an
    /// equivalent test stub").
    #[arg(long, conflicts_with = "chat")]
    no_chat: bool,

    /// Number of summarization passes; must be 1 or 3 (§4.7).
    #[arg(long, default_value_t = 1)]
    passes: u32,

    /// Price per prompt token, for cost accounting (§4.8).
    #[arg(long, default_value_t = 0.0)]
    price_per_prompt_token: f64,
    /// Price per completion token, for cost accounting (§4.8).
    #[arg(long, default_value_t = 0.0)]
    price_per_completion_token: f64,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub repo_root: PathBuf,
    pub output_dir: PathBuf,
    pub update_mode: UpdateMode,
    pub chat: bool,
    pub num_passes: u32,
    pub price_per_prompt_token: f64,
    pub price_per_completion_token: f64,
}

impl RunConfig {
    /// Parses `argv` and validates the result, surfacing an invalid
    /// `--passes` value as `ConfigError` (§7: "fatal; abort the run").
    pub fn parse() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    fn from_args(args: Args) -> Result<Self> {
        if args.passes != 1 && args.passes != 3 {
            return Err(
                DomainError::config(format!("--passes must be 1 or 3, got {}", args.passes)).into(),
            );
        }
        // `--update` is the explicit spelling of the default mode; only
        // `--update-all` changes behavior, but both are read here so the
        // CLI surface documents itself via `--help`.
        let update_mode = match (args.update, args.update_all) {
            (_, true) => UpdateMode::Full,
            _ => UpdateMode::Incremental,
        };
        Ok(Self {
            repo_root: args.path,
            output_dir: args.output_dir,
            update_mode,
            chat: match (args.chat, args.no_chat) {
                (_, true) => false,
                _ => true,
            },
            num_passes: args.passes,
            price_per_prompt_token: args.price_per_prompt_token,
            price_per_completion_token: args.price_per_completion_token,
        })
    }

    pub fn json_dir(&self) -> PathBuf {
        self.output_dir.join("json")
    }

    pub fn directory_map_path(&self) -> PathBuf {
        self.output_dir.join("directory_map.json")
    }
}

/// Test-only constructor bypassing `clap::Parser` so unit tests can exercise
/// validation without building an argv vector.
#[cfg(test)]
pub fn config_for_test(path: &Path, passes: u32, update_all: bool) -> Result<RunConfig> {
    RunConfig::from_args(Args {
        path: path.to_path_buf(),
        output_dir: PathBuf::from("out"),
        update: !update_all,
        update_all,
        chat: false,
        no_chat: true,
        passes,
        price_per_prompt_token: 0.0,
        price_per_completion_token: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pass_count_is_config_error() {
        let result = config_for_test(Path::new("."), 2, false);
        assert!(result.is_err());
    }

    #[test]
    fn update_all_selects_full_mode() {
        let config = config_for_test(Path::new("."), 1, true).unwrap();
        assert_eq!(config.update_mode, UpdateMode::Full);
    }
}
