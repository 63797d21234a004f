//! CLI application for invoice total extraction and requisition batching.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{add, batch, config, extract, request};

/// Fatura - Extract invoice totals and build purchase requisition batches
#[derive(Parser)]
#[command(name = "fatura")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the candidate totals found in a document
    Extract(extract::ExtractArgs),

    /// Bill one or more documents into the batch
    Add(add::AddArgs),

    /// Inspect or reset the batch
    Batch(batch::BatchArgs),

    /// Wrap the batch into a purchase requisition
    Request(request::RequestArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path),
        Commands::Add(args) => add::run(args, config_path),
        Commands::Batch(args) => batch::run(args),
        Commands::Request(args) => request::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
