use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "duesync",
    version,
    about = "Sync LMS assignment deadlines into Google Calendar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an incremental sync against the calendar
    Sync {
        /// Preview the delta without touching the calendar
        #[arg(long)]
        dry_run: bool,
        /// Override the assignment export file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Authentication management for the calendar backend
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Inspect the sync ledger
    Ledger {
        #[command(subcommand)]
        action: commands::ledger::LedgerAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Sync { dry_run, export } => commands::sync::run(dry_run, export),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Ledger { action } => commands::ledger::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
