//! `lin init` — create the `.lineage/` data directory.

use anyhow::{Context as _, Result};
use clap::Args;
use lineage_core::store::SqliteStore;
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force re-initialization even if `.lineage/` already exists.
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TOML: &str = "[tree]\nmax_depth = 10\n";

const GITIGNORE: &str = "lineage.db\nlineage.db-wal\nlineage.db-shm\n";

/// Execute `lin init`. Creates the project skeleton:
///
/// ```text
/// .lineage/
///   lineage.db      (SQLite store, schema migrated to latest)
///   config.toml     (default project config template)
///   .gitignore      (the database and its WAL siblings)
/// ```
///
/// # Errors
///
/// Returns an error if `.lineage/` already exists and `--force` is not set,
/// or if any filesystem or database operation fails.
pub fn run_init(args: &InitArgs, project_root: &Path) -> Result<()> {
    let data_dir = project_root.join(".lineage");

    if data_dir.exists() && !args.force {
        anyhow::bail!(".lineage/ already exists. Use `lin init --force` to reinitialize.");
    }

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("create data directory {}", data_dir.display()))?;

    let db_path = data_dir.join("lineage.db");
    SqliteStore::open(&db_path)
        .with_context(|| format!("create database {}", db_path.display()))?;

    let config_path = data_dir.join("config.toml");
    std::fs::write(&config_path, CONFIG_TOML)
        .with_context(|| format!("write config {}", config_path.display()))?;

    let gitignore_path = data_dir.join(".gitignore");
    std::fs::write(&gitignore_path, GITIGNORE)
        .with_context(|| format!("write .gitignore {}", gitignore_path.display()))?;

    println!("✓ Initialized .lineage/ project structure.");
    println!();
    println!("  Database: .lineage/lineage.db");
    println!("  Config:   .lineage/config.toml");
    println!();
    println!("Next steps:");
    println!("  lin person add --name \"Ada Lovelace\" --born 1815-12-10");
    println!("  lin link <PARENT_ID> <CHILD_ID>");
    println!("  lin tree <ROOT_ID>");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_skeleton() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let args = InitArgs { force: false };
        run_init(&args, dir.path()).expect("init");

        let data_dir = dir.path().join(".lineage");
        assert!(data_dir.join("lineage.db").exists());
        assert!(data_dir.join("config.toml").exists());
        assert!(data_dir.join(".gitignore").exists());
    }

    #[test]
    fn second_init_requires_force() {
        let dir = tempfile::tempdir().expect("create temp dir");
        run_init(&InitArgs { force: false }, dir.path()).expect("first init");

        let again = run_init(&InitArgs { force: false }, dir.path());
        assert!(again.is_err());

        run_init(&InitArgs { force: true }, dir.path()).expect("forced init");
    }

    #[test]
    fn default_config_parses() {
        let config: lineage_core::config::ProjectConfig =
            toml::from_str(CONFIG_TOML).expect("template must stay parseable");
        assert_eq!(config.tree.max_depth, 10);
    }
}
