//! gradebook CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gradebook_core::config::{load_config_from, GradebookConfig, LoggingConfig};

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Student score records with statistics, ranking, and backups"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Primary data file (overrides the config)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Backup file (overrides the config)
    #[arg(long, global = true)]
    backup_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// List every student with their statistics
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Find students by ID (case-sensitive) or name (case-insensitive)
    Search {
        /// Substring to look for
        query: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Rank students by average score
    Rank {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the average of all scores, or of one student
    Average {
        /// Student ID
        #[arg(long)]
        id: Option<String>,
    },

    /// Copy the current records to the backup file
    Backup,

    /// Replace the data file with the backup file's records
    Restore,

    /// Create a starter gradebook.toml
    Init,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Menu);
    if let Commands::Init = command {
        return commands::init::execute();
    }

    let mut config = load_config_from(cli.config.as_deref())?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(backup_file) = cli.backup_file {
        config.backup_file = backup_file;
    }
    init_logging(&config.logging);

    dispatch(command, &config)
}

fn dispatch(command: Commands, config: &GradebookConfig) -> Result<()> {
    let storage = config.storage();

    match command {
        Commands::Menu => commands::menu::execute(storage, config.save_on_exit),
        Commands::List { format } => commands::list::execute(&storage, format),
        Commands::Search { query, format } => commands::search::execute(&storage, query, format),
        Commands::Rank { format } => commands::rank::execute(&storage, format),
        Commands::Average { id } => commands::average::execute(&storage, id),
        Commands::Backup => commands::backup::execute(&storage),
        Commands::Restore => commands::restore::execute(&storage),
        Commands::Init => commands::init::execute(),
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
