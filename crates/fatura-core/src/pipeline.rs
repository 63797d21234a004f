//! Document to requisition item orchestration.

use tracing::{error, info};

use crate::error::{ExtractionError, FaturaError, PayloadError, Result};
use crate::invoice::{
    settle, CompositeInvoice, CompositeInvoiceParser, DisambiguationGate, Resolution, Settlement,
    TotalValueResolver,
};
use crate::models::{Document, FaturaConfig, ItemKind, LineItem};
use crate::payload::{Batch, PayloadAssembler, SupplierResolver};

/// Which extraction flow a document goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// One bill, one total.
    Single,
    /// Carrier bill bundling several invoices.
    Composite,
}

impl DocumentKind {
    /// Composite carrier bills are recognized by file name.
    pub fn detect(name: &str) -> Self {
        let upper = name.to_uppercase();
        if upper.contains("VIVO") && upper.contains("MOVEL") {
            Self::Composite
        } else {
            Self::Single
        }
    }
}

/// What the caller wants billed for a document.
#[derive(Debug, Clone, Default)]
pub struct BillingOrder {
    /// Forces a flow instead of detecting it from the file name.
    pub kind: Option<DocumentKind>,
    pub item_kind: ItemKind,
    /// Supplier code for single bills.
    pub supplier_code: Option<String>,
    /// Item description for single bills.
    pub description: String,
}

/// Result of billing one document.
#[derive(Debug, Clone)]
pub enum Billed {
    Single {
        settlement: Settlement,
        item: LineItem,
    },
    Composite {
        invoice: CompositeInvoice,
        items: Vec<LineItem>,
    },
}

impl Billed {
    pub fn items(&self) -> &[LineItem] {
        match self {
            Self::Single { item, .. } => std::slice::from_ref(item),
            Self::Composite { items, .. } => items,
        }
    }
}

/// The full extraction and assembly pipeline.
pub struct Pipeline {
    resolver: TotalValueResolver,
    composite: CompositeInvoiceParser,
    suppliers: SupplierResolver,
    material_code: String,
    composite_description: String,
}

impl Pipeline {
    /// Build a pipeline around already loaded supplier tables.
    pub fn new(config: &FaturaConfig, suppliers: SupplierResolver) -> Self {
        Self {
            resolver: TotalValueResolver::from_config(&config.extraction),
            composite: CompositeInvoiceParser::new(),
            suppliers,
            material_code: config.payload.material_code.clone(),
            composite_description: config.payload.composite_description.clone(),
        }
    }

    /// Build a pipeline, loading supplier tables from the configured paths.
    pub fn from_config(config: &FaturaConfig) -> Result<Self> {
        let suppliers = SupplierResolver::from_config(&config.suppliers)?;
        Ok(Self::new(config, suppliers))
    }

    pub fn resolver(&self) -> &TotalValueResolver {
        &self.resolver
    }

    /// Candidate totals for a single bill.
    pub fn resolve(&self, document: &Document) -> crate::invoice::Result<Resolution> {
        ensure_text(document)?;
        self.resolver.resolve(document)
    }

    /// Resolve and disambiguate the total of a single bill.
    pub fn settle_total(
        &self,
        document: &Document,
        gate: &mut dyn DisambiguationGate,
    ) -> crate::invoice::Result<Settlement> {
        let resolution = self.resolve(document)?;
        Ok(settle(&document.name, resolution, gate))
    }

    /// Bill one document and append its items to `batch`.
    ///
    /// Nothing is appended unless the whole document succeeds.
    pub fn bill_document(
        &self,
        document: &Document,
        order: &BillingOrder,
        gate: &mut dyn DisambiguationGate,
        batch: &mut Batch,
    ) -> Result<Billed> {
        let kind = order
            .kind
            .unwrap_or_else(|| DocumentKind::detect(&document.name));
        let assembler = PayloadAssembler::new(self.material_code.as_str()).with_kind(order.item_kind);

        let billed = match kind {
            DocumentKind::Single => {
                let supplier = order
                    .supplier_code
                    .as_deref()
                    .filter(|code| !code.trim().is_empty())
                    .ok_or_else(|| PayloadError::MissingFields(vec!["Supplier".to_string()]))?;

                let settlement = self.settle_total(document, gate)?;
                let item = assembler.single(
                    batch.next_sequence(),
                    &settlement.value,
                    supplier,
                    &order.description,
                );
                Billed::Single { settlement, item }
            }
            DocumentKind::Composite => {
                ensure_text(document)?;
                let invoice = self.composite.parse_document(document)?;
                let items = assembler.from_records(
                    batch.next_sequence(),
                    &invoice.records,
                    &self.suppliers,
                    &self.composite_description,
                );
                Billed::Composite { invoice, items }
            }
        };

        batch.extend(billed.items().to_vec());
        info!(
            "{}: {} item(s) added, batch now holds {}",
            document.name,
            billed.items().len(),
            batch.len()
        );
        Ok(billed)
    }

    /// Bill several documents. A failing document is reported and skipped;
    /// the others still go through.
    pub fn bill_all<'a>(
        &self,
        documents: &'a [Document],
        order: &BillingOrder,
        gate: &mut dyn DisambiguationGate,
        batch: &mut Batch,
    ) -> Vec<(&'a str, Result<Billed>)> {
        documents
            .iter()
            .map(|document| {
                let outcome = self.bill_document(document, order, gate, batch);
                if let Err(e) = &outcome {
                    error!("{}: {}", document.name, e);
                }
                (document.name.as_str(), outcome)
            })
            .collect()
    }
}

fn ensure_text(document: &Document) -> std::result::Result<(), ExtractionError> {
    if document.is_blank() {
        return Err(ExtractionError::NoText {
            document: document.name.clone(),
        });
    }
    Ok(())
}

impl From<Billed> for Vec<LineItem> {
    fn from(billed: Billed) -> Self {
        match billed {
            Billed::Single { item, .. } => vec![item],
            Billed::Composite { items, .. } => items,
        }
    }
}

/// True when the error concerns the document itself rather than the caller's input.
pub fn is_document_error(error: &FaturaError) -> bool {
    matches!(
        error,
        FaturaError::Extraction(_) | FaturaError::Pdf(_) | FaturaError::Io(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{Choice, FirstCandidate, SettlementSource};
    use crate::models::MonetaryCandidate;
    use crate::payload::SupplierTable;
    use pretty_assertions::assert_eq;

    fn pipeline() -> Pipeline {
        let primary: SupplierTable = [("02558157000162", "100300")].into_iter().collect();
        Pipeline::new(
            &FaturaConfig::default(),
            SupplierResolver::with_carrier_fallback(primary),
        )
    }

    fn order() -> BillingOrder {
        BillingOrder {
            supplier_code: Some("100200".to_string()),
            description: "Energia".to_string(),
            ..BillingOrder::default()
        }
    }

    const COMPOSITE: &str = "Total a Pagar - R$ 1.350,00 \
        NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES CNPJ: 02.558.157/0001-62 \
        TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. 1.000,00 \
        NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES CNPJ: 02.558.157/0049-07 \
        TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. 350,00";

    #[test]
    fn test_detect_kind() {
        assert_eq!(DocumentKind::detect("VIVO_MOVEL_0325.pdf"), DocumentKind::Composite);
        assert_eq!(DocumentKind::detect("fatura vivo movel.pdf"), DocumentKind::Composite);
        assert_eq!(DocumentKind::detect("VIVO_FIXO.pdf"), DocumentKind::Single);
    }

    #[test]
    fn test_settle_with_gate() {
        let doc = Document::from_text("conta.pdf", "Valor R$ 10,00 e Total R$ 20,00");
        let mut gate = |_: &str, candidates: &[MonetaryCandidate]| Choice::Chosen(candidates[1].clone());
        let settlement = pipeline().settle_total(&doc, &mut gate).unwrap();
        assert_eq!(settlement.strategy, "keyword");
        assert_eq!(settlement.source, SettlementSource::Selected);
    }

    #[test]
    fn test_bill_single() {
        let doc = Document::from_text("energia.pdf", "VALOR A PAGAR R$ 1.234,56");
        let mut batch = Batch::new();
        let billed = pipeline()
            .bill_document(&doc, &order(), &mut FirstCandidate, &mut batch)
            .unwrap();

        assert_eq!(billed.items()[0].short_text, "[M,100200] Energia");
        assert_eq!(batch.items()[0].price, "1234.56");
    }

    #[test]
    fn test_bill_composite() {
        let doc = Document::from_text("VIVO_MOVEL.pdf", COMPOSITE);
        let mut batch = Batch::new();
        pipeline()
            .bill_document(&doc, &order(), &mut FirstCandidate, &mut batch)
            .unwrap();

        let labels: Vec<_> = batch.items().iter().map(|i| i.short_text.as_str()).collect();
        assert_eq!(
            labels,
            vec!["[M,100300] Fatura Vivo Movel", "[M,400110] Fatura Vivo Movel"]
        );
    }

    #[test]
    fn test_failures_leave_batch_untouched() {
        let mut batch = Batch::new();
        let p = pipeline();

        let empty = Document::from_text("VIVO_MOVEL.pdf", "Nº da Conta: 1");
        let err = p
            .bill_document(&empty, &order(), &mut FirstCandidate, &mut batch)
            .unwrap_err();
        assert!(matches!(
            err,
            FaturaError::Extraction(ExtractionError::EmptyBatch { .. })
        ));
        assert!(is_document_error(&err));

        let blank = Document::from_text("branco.pdf", "   ");
        let err = p
            .bill_document(&blank, &order(), &mut FirstCandidate, &mut batch)
            .unwrap_err();
        assert!(matches!(err, FaturaError::Extraction(ExtractionError::NoText { .. })));

        assert!(batch.is_empty());
    }

    #[test]
    fn test_single_bill_needs_supplier() {
        let doc = Document::from_text("energia.pdf", "VALOR A PAGAR R$ 10,00");
        let order = BillingOrder::default();
        let err = pipeline()
            .bill_document(&doc, &order, &mut FirstCandidate, &mut Batch::new())
            .unwrap_err();
        assert!(matches!(err, FaturaError::Payload(PayloadError::MissingFields(_))));
        assert!(!is_document_error(&err));
    }

    #[test]
    fn test_one_bad_document_does_not_stop_others() {
        let docs = vec![
            Document::from_text("a.pdf", "TOTAL R$ 50,00"),
            Document::from_text("b.pdf", "nada aqui"),
            Document::from_text("c.pdf", "TOTAL R$ 70,00"),
        ];
        let mut batch = Batch::new();
        let outcomes = pipeline().bill_all(&docs, &order(), &mut FirstCandidate, &mut batch);

        let ok: Vec<_> = outcomes.iter().map(|(name, r)| (*name, r.is_ok())).collect();
        assert_eq!(ok, vec![("a.pdf", true), ("b.pdf", false), ("c.pdf", true)]);
        let positions: Vec<_> = batch.items().iter().map(|i| i.sequence.to_string()).collect();
        assert_eq!(positions, vec!["0010", "0020"]);
    }
}
