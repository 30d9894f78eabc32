#![forbid(unsafe_code)]

mod cmd;
mod config;
mod context;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use context::CliContext;
use output::OutputMode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "stemma: a consistency engine for family graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Override the tree file location.
    #[arg(long, global = true, value_name = "PATH")]
    tree: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
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
        next_help_heading = "People",
        about = "Add a person",
        after_help = "EXAMPLES:\n    # Add a person\n    stm add \"Li Hua\" --gender female --birth 1962\n\n    # Add yourself\n    stm add \"Zhang San\" --me"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "People",
        about = "Edit a person's fields",
        long_about = "Edit fields on one person. Relationship fields accept `none` to clear;\nspousal symmetry is restored synchronously on every edit.",
        after_help = "EXAMPLES:\n    # Marry two people\n    stm edit \"Zhang San\" --spouse \"Li Hua\"\n\n    # Clear a parent slot\n    stm edit p-17 --parent-a none"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "People",
        about = "Delete a person and scrub references to them",
        after_help = "EXAMPLES:\n    # Delete with confirmation\n    stm delete \"Li Hua\"\n\n    # Delete without prompting\n    stm delete p-17 --force"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Read",
        about = "List everyone in the tree",
        after_help = "EXAMPLES:\n    stm list\n    stm list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one person",
        after_help = "EXAMPLES:\n    stm show \"Li Hua\"\n    stm show p-17 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "People",
        about = "Show or set the me marker",
        after_help = "EXAMPLES:\n    # Who am I?\n    stm me\n\n    # Mark a person as me\n    stm me \"Zhang San\""
    )]
    Me(cmd::me::MeArgs),

    #[command(
        next_help_heading = "Bulk",
        about = "Import people from free text via the extraction collaborator",
        long_about = "Send free text to the configured extraction endpoint and merge the\nresulting candidates into the tree. The tree is only touched once a\ncomplete candidate batch is available; failures import nothing.",
        after_help = "EXAMPLES:\n    # Extract from text\n    stm import \"Zhang San was born in 1985. His wife is Li Hua.\"\n\n    # Offline: prepared candidate file\n    stm import --candidates batch.json"
    )]
    Import(cmd::import::ImportArgs),

    #[command(
        next_help_heading = "Projection",
        about = "Compute the positioned tree layout",
        after_help = "EXAMPLES:\n    # Renderer-facing JSON\n    stm layout --json"
    )]
    Layout(cmd::layout::LayoutArgs),

    #[command(
        next_help_heading = "Projection",
        about = "Encode the tree as a share payload",
        after_help = "EXAMPLES:\n    stm share"
    )]
    Share(cmd::share::ShareArgs),

    #[command(
        next_help_heading = "Projection",
        about = "View a shared tree payload (read-only)",
        after_help = "EXAMPLES:\n    # Inspect someone else's tree\n    stm view <payload>\n\n    # Replace the local tree with it\n    stm view <payload> --adopt"
    )]
    View(cmd::view::ViewArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Check graph invariants",
        after_help = "EXAMPLES:\n    stm verify\n    stm verify --json"
    )]
    Verify(cmd::verify::VerifyArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let user_config = config::load_user_config()?;
    let tree_path = config::resolve_tree_path(cli.tree.as_deref(), &user_config);
    tracing::debug!(tree = %tree_path.display(), "resolved tree file");
    let ctx = CliContext::new(user_config, tree_path);
    let mode = cli.output_mode();

    match &cli.command {
        Commands::Add(args) => cmd::add::run_add(args, mode, &ctx),
        Commands::Edit(args) => cmd::edit::run_edit(args, mode, &ctx),
        Commands::Delete(args) => cmd::delete::run_delete(args, mode, &ctx),
        Commands::List(args) => cmd::list::run_list(args, mode, &ctx),
        Commands::Show(args) => cmd::show::run_show(args, mode, &ctx),
        Commands::Me(args) => cmd::me::run_me(args, mode, &ctx),
        Commands::Import(args) => cmd::import::run_import(args, mode, &ctx),
        Commands::Layout(args) => cmd::layout::run_layout(args, mode, &ctx),
        Commands::Share(args) => cmd::share::run_share(args, mode, &ctx),
        Commands::View(args) => cmd::view::run_view(args, mode, &ctx),
        Commands::Verify(args) => cmd::verify::run_verify(args, mode, &ctx),
    }
}
