//! User configuration and session state.
//!
//! Config is TOML under the platform config directory
//! (`…/stemma/config.toml`), every field optional. Session state — the
//! distinguished "me" marker, which belongs to the surrounding
//! application rather than to any `Person` — lives in a small JSON file
//! next to the tree file.
//!
//! Environment overrides (used heavily by tests):
//! `STEMMA_CONFIG` replaces the config file path, `STEMMA_TREE` the tree
//! file path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use stemma_core::PersonId;
use stemma_layout::LayoutConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Tree file location. Defaults to the platform data directory.
    pub tree_file: Option<PathBuf>,
    /// HTTP endpoint of the extraction collaborator.
    pub extractor_endpoint: Option<String>,
    /// Layout tuning knobs.
    pub layout: LayoutConfig,
}

/// Resolve the config file path (`STEMMA_CONFIG` wins).
fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("STEMMA_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stemma/config.toml")
}

/// Load the user config, defaulting when the file does not exist.
pub fn load_user_config() -> Result<UserConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Resolve the tree file path: `--tree` flag, `STEMMA_TREE`, config,
/// then the platform data directory.
pub fn resolve_tree_path(flag: Option<&Path>, config: &UserConfig) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("STEMMA_TREE") {
        return PathBuf::from(path);
    }
    if let Some(path) = &config.tree_file {
        return path.clone();
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stemma/tree.json")
}

/// Session state stored beside the tree file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// The person currently marked as "me", if any.
    pub me: Option<PersonId>,
}

/// Path of the state file for a given tree file.
#[must_use]
pub fn state_path(tree_path: &Path) -> PathBuf {
    tree_path.with_file_name("state.json")
}

pub fn load_state(tree_path: &Path) -> Result<SessionState> {
    let path = state_path(tree_path);
    if !path.exists() {
        return Ok(SessionState::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn save_state(tree_path: &Path, state: &SessionState) -> Result<()> {
    let path = state_path(tree_path);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_config_for_tree_path() {
        let config = UserConfig {
            tree_file: Some(PathBuf::from("/from/config.json")),
            ..UserConfig::default()
        };
        let resolved = resolve_tree_path(Some(Path::new("/from/flag.json")), &config);
        assert_eq!(resolved, PathBuf::from("/from/flag.json"));
    }

    #[test]
    fn state_file_sits_beside_the_tree() {
        let path = state_path(Path::new("/data/stemma/tree.json"));
        assert_eq!(path, PathBuf::from("/data/stemma/state.json"));
    }

    #[test]
    fn state_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tree = dir.path().join("tree.json");

        let state = SessionState {
            me: Some(PersonId::new("p-42")),
        };
        save_state(&tree, &state).expect("save");
        let loaded = load_state(&tree).expect("load");
        assert_eq!(loaded.me, Some(PersonId::new("p-42")));
    }

    #[test]
    fn missing_state_defaults_to_no_me() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = load_state(&dir.path().join("tree.json")).expect("load");
        assert!(state.me.is_none());
    }

    #[test]
    fn partial_config_parses_with_defaults() {
        let config: UserConfig =
            toml::from_str("extractor_endpoint = \"http://localhost:9000/extract\"")
                .expect("parse");
        assert_eq!(
            config.extractor_endpoint.as_deref(),
            Some("http://localhost:9000/extract")
        );
        assert!(config.tree_file.is_none());
        assert!((config.layout.node_spacing - 280.0).abs() < f64::EPSILON);
    }
}
