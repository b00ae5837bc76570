use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project-level configuration, read from `config.toml` in the data
/// directory. Every field has a default so a missing or partial file works.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub tree: TreeConfig,
}

/// Policy for the descendant-tree builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum tree depth below the root before a build is rejected.
    ///
    /// The edge rules already keep the graph acyclic, so this is a defensive
    /// ceiling rather than a structural limit.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

const fn default_max_depth() -> u32 {
    10
}

/// Load `config.toml` from `data_dir`.
///
/// A missing file yields the defaults; an unreadable or unparseable file is
/// an error (silently ignoring a typo'd config is worse than failing).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(data_dir: &Path) -> Result<ProjectConfig> {
    let path = data_dir.join("config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
}
