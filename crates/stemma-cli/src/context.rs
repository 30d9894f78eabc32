//! Shared per-invocation context handed to every command handler.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use stemma_core::repo::{JsonFileRepository, Repository};
use stemma_core::PersonSet;

use crate::config::{self, SessionState, UserConfig};

/// Everything a command needs: resolved config, the repository, and the
/// session-state location.
pub struct CliContext {
    pub config: UserConfig,
    pub tree_path: PathBuf,
    repo: JsonFileRepository,
}

impl CliContext {
    #[must_use]
    pub fn new(config: UserConfig, tree_path: PathBuf) -> Self {
        let repo = JsonFileRepository::new(tree_path.clone());
        Self {
            config,
            tree_path,
            repo,
        }
    }

    pub fn load_set(&self) -> Result<PersonSet> {
        self.repo
            .load()
            .with_context(|| format!("failed to load tree from {}", self.tree_path.display()))
    }

    pub fn save_set(&self, set: &PersonSet) -> Result<()> {
        self.repo
            .save(set)
            .with_context(|| format!("failed to save tree to {}", self.tree_path.display()))
    }

    pub fn load_state(&self) -> Result<SessionState> {
        config::load_state(&self.tree_path)
    }

    pub fn save_state(&self, state: &SessionState) -> Result<()> {
        config::save_state(&self.tree_path, state)
    }

    /// Wall-clock milliseconds for id minting. Impurity stays at the CLI
    /// boundary — the engine itself takes timestamps as inputs.
    #[must_use]
    pub fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
