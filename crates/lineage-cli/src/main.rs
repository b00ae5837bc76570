#![forbid(unsafe_code)]

mod cmd;
mod output;
mod validate;

use clap::{Parser, Subcommand};
use output::OutputMode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lineage: a genealogical graph store",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Initialize a lineage project",
        long_about = "Initialize a lineage project in the current directory.",
        after_help = "EXAMPLES:\n    # Initialize a project in the current directory\n    lin init"
    )]
    Init(cmd::init::InitArgs),

    #[command(subcommand, about = "Manage person records")]
    Person(cmd::person::PersonCommand),

    #[command(
        about = "Record a parent-child relationship",
        long_about = "Validate and record a directed parent-child relationship between two persons.",
        after_help = "EXAMPLES:\n    # Record that one person is a parent of another\n    lin link 0b8f8e7a-... 6c1d2e3f-...\n\n    # Emit machine-readable output\n    lin link 0b8f8e7a-... 6c1d2e3f-... --json"
    )]
    Link(cmd::link::LinkArgs),

    #[command(
        about = "Show the descendant tree rooted at a person",
        after_help = "EXAMPLES:\n    # Render the family tree below a person\n    lin tree 0b8f8e7a-...\n\n    # Tighter depth bound than the configured one\n    lin tree 0b8f8e7a-... --depth 3"
    )]
    Tree(cmd::tree::TreeArgs),
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("LINEAGE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    let output = cli.output_mode();

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, &project_root),
        Commands::Person(ref command) => cmd::person::run_person(command, output, &project_root),
        Commands::Link(ref args) => cmd::link::run_link(args, output, &project_root),
        Commands::Tree(ref args) => cmd::tree::run_tree(args, output, &project_root),
    }
}
