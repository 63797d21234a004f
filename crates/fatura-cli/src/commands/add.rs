//! Add command - bill documents into the persisted batch.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use console::{style, Term};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use fatura_core::invoice::{Choice, DisambiguationGate, FirstCandidate};
use fatura_core::pipeline::is_document_error;
use fatura_core::{
    load_document, Batch, Billed, BillingOrder, Document, DocumentKind, ItemKind,
    MonetaryCandidate, Pipeline,
};

use super::batch::display_total;
use super::{default_batch_path, load_config, read_layout};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Span geometry sidecar (JSON), used for single-file input
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Batch file
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Bill as service instead of material
    #[arg(long)]
    service: bool,

    /// Supplier code for single bills
    #[arg(short, long)]
    supplier: Option<String>,

    /// Item description for single bills
    #[arg(short, long, default_value = "")]
    description: String,

    /// Treat every document as a composite carrier bill
    #[arg(long)]
    composite: bool,

    /// Use the first candidate instead of asking
    #[arg(long)]
    first: bool,
}

/// Asks the operator on the terminal.
struct TerminalGate {
    term: Term,
    progress: ProgressBar,
}

impl DisambiguationGate for TerminalGate {
    fn choose(&mut self, document: &str, candidates: &[MonetaryCandidate]) -> Choice {
        let mut term = self.term.clone();
        self.progress.suspend(|| {
            let reader = term.clone();
            ask(&mut term, || reader.read_line(), document, candidates)
        })
    }
}

/// Show the candidates on `out` and read the operator's pick.
///
/// Abstains without reading when the list cannot be shown.
fn ask(
    out: &mut impl Write,
    read_line: impl FnOnce() -> io::Result<String>,
    document: &str,
    candidates: &[MonetaryCandidate],
) -> Choice {
    if let Err(e) = prompt(out, document, candidates) {
        warn!("{}: cannot show candidate totals: {}", document, e);
        return Choice::Abstain;
    }

    match read_line() {
        Ok(line) => match line.trim().parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => Choice::Chosen(candidates[n - 1].clone()),
            _ => Choice::Abstain,
        },
        Err(e) => {
            debug!("no answer from terminal: {}", e);
            Choice::Abstain
        }
    }
}

fn prompt(out: &mut impl Write, document: &str, candidates: &[MonetaryCandidate]) -> io::Result<()> {
    writeln!(
        out,
        "{} {} candidate totals in {}:",
        style("?").yellow(),
        candidates.len(),
        document
    )?;
    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(out, "  [{}] R$ {}", i + 1, candidate)?;
    }
    write!(out, "Select a value (Enter for none): ")?;
    out.flush()
}

pub fn run(args: AddArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let layout = read_layout(args.layout.as_deref())?;
    if layout.is_some() && files.len() > 1 {
        warn!("layout sidecar ignored for multi-file input");
    }

    let batch_path = args.batch.clone().unwrap_or_else(default_batch_path);
    let mut batch = Batch::load(&batch_path)?;
    let pipeline = Pipeline::from_config(&config)?;

    let order = BillingOrder {
        kind: args.composite.then_some(DocumentKind::Composite),
        item_kind: if args.service {
            ItemKind::Service
        } else {
            ItemKind::Material
        },
        supplier_code: args.supplier.clone(),
        description: args.description.clone(),
    };

    let progress = if files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut gate: Box<dyn DisambiguationGate> = if args.first {
        Box::new(FirstCandidate)
    } else {
        Box::new(TerminalGate {
            term: Term::stderr(),
            progress: progress.clone(),
        })
    };

    let mut billed = 0;
    let mut failed: Vec<(PathBuf, String)> = Vec::new();

    for path in &files {
        let outcome = load_document(path, config.pdf.max_pages)
            .map(|document| match (&layout, files.len()) {
                (Some(layout), 1) => document.with_layout(layout.clone()),
                _ => document,
            })
            .and_then(|document| {
                pipeline
                    .bill_document(&document, &order, gate.as_mut(), &mut batch)
                    .map(|b| (document, b))
            });

        match outcome {
            Ok((document, result)) => {
                billed += 1;
                progress.suspend(|| report(&document, &result));
            }
            Err(e) => {
                // Caller input errors apply to every document alike
                if !is_document_error(&e) {
                    progress.finish_and_clear();
                    return Err(e.into());
                }
                failed.push((path.clone(), e.to_string()));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    batch.save(&batch_path)?;

    println!();
    println!(
        "{} {} document(s) billed, batch holds {} item(s) totalling {}",
        style("✓").green(),
        billed,
        batch.len(),
        display_total(&batch)
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, error) in &failed {
            println!("  - {}: {}", path.display(), error);
        }
    }

    if billed == 0 {
        anyhow::bail!("No document could be billed");
    }

    Ok(())
}

fn report(document: &Document, billed: &Billed) {
    match billed {
        Billed::Single { settlement, item } => {
            let marker = if settlement.is_explicit() {
                style("✓").green()
            } else {
                style("!").yellow()
            };
            println!(
                "{} {}: {} R$ {} ({})",
                marker, document.name, item.sequence, settlement.value, settlement.strategy
            );
        }
        Billed::Composite { invoice, items } => {
            println!(
                "{} {}: {} invoice(s), account {}",
                style("✓").green(),
                document.name,
                items.len(),
                invoice.account_number.as_deref().unwrap_or("?")
            );
            for item in items {
                println!("    {} {} {}", item.sequence, item.short_text, item.price);
            }
        }
    }
}
