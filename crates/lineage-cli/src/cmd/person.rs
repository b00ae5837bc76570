//! `lin person` — person intake and listing.
//!
//! Subcommands:
//! - `lin person add --name <NAME> --born <DATE> [--birthplace <TEXT>]`
//! - `lin person list`

use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::Write as _;
use std::path::Path;

use lineage_core::model::{NewPerson, Person};
use lineage_core::store::{GraphStore, SqliteStore};

use crate::cmd::find_data_dir;
use crate::output::{CliError, OutputMode, render, render_error};
use crate::validate;

// ---------------------------------------------------------------------------
// Clap types
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum PersonCommand {
    #[command(
        about = "Add a person record",
        after_help = "EXAMPLES:\n    # Add a person\n    lin person add --name \"Ada Lovelace\" --born 1815-12-10 --birthplace London\n\n    # Emit machine-readable output\n    lin person add --name \"Ada Lovelace\" --born 1815-12-10 --json"
    )]
    Add(PersonAddArgs),

    #[command(about = "List all person records, oldest first")]
    List,
}

/// Arguments for `lin person add`.
#[derive(Args, Debug)]
pub struct PersonAddArgs {
    /// Full name of the person.
    #[arg(long)]
    pub name: String,

    /// Date of birth (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub born: String,

    /// Place of birth.
    #[arg(long)]
    pub birthplace: Option<String>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PersonAddOutput {
    ok: bool,
    #[serde(flatten)]
    person: Person,
}

// ---------------------------------------------------------------------------
// Command runners
// ---------------------------------------------------------------------------

pub fn run_person(
    command: &PersonCommand,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    match command {
        PersonCommand::Add(args) => run_person_add(args, output, project_root),
        PersonCommand::List => run_person_list(output, project_root),
    }
}

fn open_store(output: OutputMode, project_root: &Path) -> anyhow::Result<SqliteStore> {
    let Some(data_dir) = find_data_dir(project_root) else {
        let msg = "not a lineage project: .lineage directory not found";
        render_error(
            output,
            &CliError::with_details(msg, "Run `lin init` to create a new project", "not_a_project"),
        )?;
        anyhow::bail!("{msg}");
    };
    SqliteStore::open(&data_dir.join("lineage.db"))
}

fn run_person_add(
    args: &PersonAddArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    if let Err(e) = validate::validate_name(&args.name) {
        render_error(output, &e.to_cli_error())?;
        anyhow::bail!("{}", e.reason);
    }
    let date_of_birth = match validate::parse_birth_date(&args.born) {
        Ok(date) => date,
        Err(e) => {
            render_error(output, &e.to_cli_error())?;
            anyhow::bail!("{}", e.reason);
        }
    };

    let store = open_store(output, project_root)?;
    let person = store.insert_person(NewPerson {
        name: args.name.clone(),
        date_of_birth,
        place_of_birth: args.birthplace.clone(),
    })?;

    let result = PersonAddOutput { ok: true, person };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "✓ added {} (born {}): {}",
            r.person.name, r.person.date_of_birth, r.person.id
        )
    })?;

    Ok(())
}

fn run_person_list(output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let store = open_store(output, project_root)?;
    let persons = store.all_persons()?;

    render(output, &persons, |list, w| {
        if list.is_empty() {
            writeln!(w, "no person records yet")?;
            return Ok(());
        }
        for person in list {
            let place = person.place_of_birth.as_deref().unwrap_or("-");
            writeln!(
                w,
                "{}  {}  {}  {}",
                person.id, person.date_of_birth, person.name, place
            )?;
        }
        Ok(())
    })?;

    Ok(())
}
