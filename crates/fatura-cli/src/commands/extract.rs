//! Extract command - show the candidate totals of a single document.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde_json::json;

use fatura_core::{load_document, Pipeline};

use super::{load_config, read_layout};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Span geometry sidecar (JSON)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ExtractFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ExtractFormat {
    Json,
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mut document = load_document(&args.input, config.pdf.max_pages)?;
    if let Some(layout) = read_layout(args.layout.as_deref())? {
        document = document.with_layout(layout);
    }

    let pipeline = Pipeline::from_config(&config)?;
    let resolution = pipeline.resolve(&document)?;

    match args.format {
        ExtractFormat::Json => {
            let output = json!({
                "document": document.name,
                "strategy": resolution.strategy,
                "candidates": resolution.candidates,
                "ambiguous": resolution.is_ambiguous(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        ExtractFormat::Text => {
            println!(
                "{} {} ({} strategy)",
                style("✓").green(),
                document.name,
                resolution.strategy
            );
            for (i, candidate) in resolution.candidates.iter().enumerate() {
                println!("  [{}] R$ {}", i + 1, candidate);
            }
        }
    }

    Ok(())
}
