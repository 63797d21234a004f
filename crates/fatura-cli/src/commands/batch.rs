//! Batch command - inspect or reset the accumulated items.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use fatura_core::{Batch, LineItem};

use super::{default_batch_path, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Batch file
    #[arg(short, long, global = true)]
    batch: Option<PathBuf>,

    #[command(subcommand)]
    command: BatchCommand,
}

#[derive(Subcommand)]
enum BatchCommand {
    /// Print the items
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove every item and restart numbering
    Clear,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let path = args.batch.unwrap_or_else(default_batch_path);

    match args.command {
        BatchCommand::Show { format } => {
            let batch = Batch::load(&path)?;
            let output = match format {
                OutputFormat::Json => serde_json::to_string_pretty(batch.items())?,
                OutputFormat::Csv => format_items_csv(batch.items())?,
                OutputFormat::Text => format_batch_text(&batch),
            };
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        BatchCommand::Clear => {
            let mut batch = Batch::load(&path)?;
            let removed = batch.len();
            batch.clear();
            batch.save(&path)?;
            println!(
                "{} Removed {} item(s) from {}",
                style("✓").green(),
                removed,
                path.display()
            );
        }
    }

    Ok(())
}

fn format_items_csv(items: &[LineItem]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if items.is_empty() {
        wtr.write_record(["PREQ_ITEM", "MATERIAL", "SHORT_TEXT", "QUANTITY", "PREQ_PRICE"])?;
    }
    for item in items {
        wtr.serialize(item)?;
    }
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Batch total for display; an overflowing sum is reported, not computed.
pub(crate) fn display_total(batch: &Batch) -> String {
    batch
        .total()
        .map(|total| total.to_string())
        .unwrap_or_else(|| "out of range".to_string())
}

fn format_batch_text(batch: &Batch) -> String {
    if batch.is_empty() {
        return "Batch is empty.\n".to_string();
    }

    let mut output = String::new();
    for item in batch.items() {
        output.push_str(&format!(
            "{}  {:<10} {:>12}  {}\n",
            item.sequence, item.material, item.price, item.short_text
        ));
    }
    output.push_str(&format!(
        "\n{} item(s), total {}, next item {}\n",
        batch.len(),
        display_total(batch),
        batch.next_sequence()
    ));
    output
}
