//! Request command - wrap the batch into a purchase requisition.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;
use console::style;

use fatura_core::models::AccountCategory;
use fatura_core::{Batch, RequisitionForm};

use super::{default_batch_path, load_config};

/// Arguments for the request command.
#[derive(Args)]
pub struct RequestArgs {
    /// Requisition description
    #[arg(long, default_value = "")]
    text_line: String,

    /// Delivery date (dd/mm/yyyy)
    #[arg(long, default_value = "")]
    delivery_date: String,

    /// Account assignment category (K or F)
    #[arg(long, default_value = "K")]
    category: AccountCategory,

    /// Cost center
    #[arg(long, default_value = "")]
    cost_center: String,

    /// GL account, optionally as "<code> - <description>"
    #[arg(long, default_value = "")]
    gl_account: String,

    /// Requester name (default: current user)
    #[arg(long)]
    requester: Option<String>,

    /// Batch file
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Clear the batch once the request is written
    #[arg(long)]
    clear: bool,
}

pub fn run(args: RequestArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let batch_path = args.batch.clone().unwrap_or_else(default_batch_path);
    let mut batch = Batch::load(&batch_path)?;

    let requester = args.requester.clone().unwrap_or_else(|| {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default()
    });

    let form = RequisitionForm {
        text_line: args.text_line,
        delivery_date: args.delivery_date,
        category: Some(args.category),
        cost_center: args.cost_center,
        gl_account: args.gl_account,
        requester_name: requester,
        requester_email: config.payload.requester_email.clone().unwrap_or_default(),
        plant: config.payload.plant.clone(),
    };

    let requisition = form.build(batch.items().to_vec(), Local::now().date_naive())?;
    let output = serde_json::to_string_pretty(&requisition)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Requisition {} with {} item(s) written to {}",
            style("✓").green(),
            requisition.envelope.webshop.cr_number,
            requisition.items().len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.clear {
        batch.clear();
        batch.save(&batch_path)?;
        eprintln!("{} Batch cleared", style("✓").green());
    }

    Ok(())
}
