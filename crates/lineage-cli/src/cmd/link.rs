//! `lin link` — record a parent-child relationship.
//!
//! The command validates identifier *format* here (the request layer's job)
//! and leaves every admission rule to the core validator. Domain rejections
//! render with their taxonomy code; store faults propagate as plain errors.

use clap::Args;
use serde::Serialize;
use std::io::Write as _;
use std::path::Path;

use lineage_core::store::SqliteStore;
use lineage_core::{LineageError, propose_relationship};

use crate::cmd::find_data_dir;
use crate::output::{CliError, OutputMode, render, render_error};
use crate::validate;

// ---------------------------------------------------------------------------
// Clap types
// ---------------------------------------------------------------------------

/// Arguments for `lin link`.
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Parent person ID.
    pub parent_id: String,

    /// Child person ID.
    pub child_id: String,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct LinkOutput {
    ok: bool,
    parent_id: String,
    child_id: String,
    created_at_us: i64,
}

// ---------------------------------------------------------------------------
// Command runner
// ---------------------------------------------------------------------------

pub fn run_link(args: &LinkArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    if let Err(e) = validate::validate_person_id("parent_id", &args.parent_id) {
        render_error(output, &e.to_cli_error())?;
        anyhow::bail!("{}", e.reason);
    }
    if let Err(e) = validate::validate_person_id("child_id", &args.child_id) {
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

    match propose_relationship(&store, args.parent_id.trim(), args.child_id.trim()) {
        Ok(edge) => {
            let result = LinkOutput {
                ok: true,
                parent_id: edge.parent_id,
                child_id: edge.child_id,
                created_at_us: edge.created_at_us,
            };
            render(output, &result, |r, w| {
                writeln!(w, "✓ {} recorded as parent of {}", r.parent_id, r.child_id)
            })?;
            Ok(())
        }
        Err(err @ LineageError::Rejected(_)) => {
            render_error(output, &CliError::from_rejection(&err))?;
            anyhow::bail!("{err}");
        }
        // Storage faults are not rejections; let them surface unmodified.
        Err(LineageError::Store(err)) => Err(err),
    }
}
