//! `lin tree` — render the descendant tree rooted at a person.
//!
//! Human mode draws an ASCII tree with birth dates; JSON mode emits the
//! nested projection as-is. The depth ceiling comes from `.lineage/config.toml`
//! unless overridden with `--depth`.

use clap::Args;
use std::io::Write as _;
use std::path::Path;

use lineage_core::config::{TreeConfig, load_project_config};
use lineage_core::store::SqliteStore;
use lineage_core::{LineageError, TreeNode, build_descendant_tree};

use crate::cmd::find_data_dir;
use crate::output::{CliError, OutputMode, render, render_error};
use crate::validate;

// ---------------------------------------------------------------------------
// Clap types
// ---------------------------------------------------------------------------

/// Arguments for `lin tree`.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Root person ID.
    pub root_id: String,

    /// Maximum tree depth (overrides the configured bound).
    #[arg(long)]
    pub depth: Option<u32>,
}

// ---------------------------------------------------------------------------
// ASCII tree rendering
// ---------------------------------------------------------------------------

fn render_node(
    node: &TreeNode,
    prefix: &str,
    is_last: bool,
    is_root: bool,
    w: &mut dyn std::io::Write,
) -> std::io::Result<()> {
    if is_root {
        writeln!(w, "{} ({})", node.name, node.date_of_birth)?;
    } else {
        let connector = if is_last { "└── " } else { "├── " };
        writeln!(w, "{prefix}{connector}{} ({})", node.name, node.date_of_birth)?;
    }

    let child_prefix = if is_root {
        String::new()
    } else if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };

    for (index, child) in node.children.iter().enumerate() {
        let last = index + 1 == node.children.len();
        render_node(child, &child_prefix, last, false, w)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Command runner
// ---------------------------------------------------------------------------

pub fn run_tree(args: &TreeArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    if let Err(e) = validate::validate_person_id("root_id", &args.root_id) {
        render_error(output, &e.to_cli_error())?;
        anyhow::bail!("{}", e.reason);
    }

    let Some(data_dir) = find_data_dir(project_root) else {
        let msg = "not a lineage project: .lineage directory not found";
        render_error(
            output,
            &CliError::with_details(msg, "Run `lin init` to create a new project", "not_a_project"),
        )?;
        anyhow::bail!("{msg}");
    };
    let store = SqliteStore::open(&data_dir.join("lineage.db"))?;
    let config = load_project_config(&data_dir)?;

    let tree_config = args.depth.map_or(config.tree, |max_depth| TreeConfig { max_depth });

    match build_descendant_tree(&store, args.root_id.trim(), &tree_config) {
        Ok(tree) => {
            render(output, &tree, |node, w| {
                render_node(node, "", true, true, w)?;
                writeln!(w)?;
                writeln!(w, "{} persons", node.size())
            })?;
            Ok(())
        }
        Err(err @ LineageError::Rejected(_)) => {
            render_error(output, &CliError::from_rejection(&err))?;
            anyhow::bail!("{err}");
        }
        Err(LineageError::Store(err)) => Err(err),
    }
}
