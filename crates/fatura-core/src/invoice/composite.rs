//! Composite carrier bills: one document bundling several sub-invoices,
//! each with its own CNPJ and total.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::rules::cnpj::{normalize_tax_id, validate_cnpj};
use super::rules::patterns::{
    ACCOUNT_NUMBER, AMOUNT_DUE, BLOCK_TAX_ID, BLOCK_TOTAL, COMPOSITE_BLOCK_HEADER,
    REFERENCE_PERIOD,
};
use super::Result;
use crate::error::ExtractionError;
use crate::models::{Document, MonetaryCandidate};

/// One sub-invoice of a composite bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRecord {
    /// Canonical (digits only) CNPJ.
    pub tax_id: String,
    /// Sub-invoice total in source-locale form.
    pub amount: MonetaryCandidate,
}

/// Everything read from a composite bill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositeInvoice {
    /// Customer account number.
    pub account_number: Option<String>,
    /// Reference period as MM/YYYY.
    pub reference_period: Option<String>,
    /// Grand total printed on the bill.
    pub amount_due: Option<MonetaryCandidate>,
    /// Sub-invoices in document order.
    pub records: Vec<InvoiceRecord>,
}

impl CompositeInvoice {
    /// Sum of all record amounts, `None` if it overflows.
    pub fn records_total(&self) -> Option<Decimal> {
        self.records
            .iter()
            .filter_map(|r| r.amount.value())
            .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
    }

    /// Difference between the printed grand total and the record sum, when
    /// both are known and disagree.
    pub fn total_mismatch(&self) -> Option<Decimal> {
        let due = self.amount_due.as_ref()?.value()?;
        let delta = due.checked_sub(self.records_total()?)?;
        (!delta.is_zero()).then_some(delta)
    }
}

/// Parser for the carrier's composite bill layout.
pub struct CompositeInvoiceParser {
    block_header: &'static str,
}

impl CompositeInvoiceParser {
    pub fn new() -> Self {
        Self {
            block_header: COMPOSITE_BLOCK_HEADER,
        }
    }

    /// Parse metadata and invoice blocks from the full text.
    ///
    /// Blocks run from one header phrase to the next; a block yields a
    /// record only if its CNPJ is followed by its total. An empty record
    /// list is a valid parse.
    pub fn parse(&self, text: &str) -> CompositeInvoice {
        let mut invoice = CompositeInvoice {
            account_number: ACCOUNT_NUMBER.captures(text).map(|c| c[1].to_string()),
            reference_period: REFERENCE_PERIOD
                .captures(text)
                .map(|c| c[1].to_string())
                .filter(|period| is_valid_period(period)),
            amount_due: AMOUNT_DUE
                .captures(text)
                .map(|c| MonetaryCandidate::new(&c[1])),
            records: Vec::new(),
        };

        for (index, block) in text.split(self.block_header).skip(1).enumerate() {
            match parse_block(block) {
                Some(record) => invoice.records.push(record),
                None => debug!("invoice block {} lacks a CNPJ or total, skipped", index + 1),
            }
        }

        invoice
    }

    /// Parse a document, rejecting it when no invoice record was found.
    pub fn parse_document(&self, document: &Document) -> Result<CompositeInvoice> {
        let invoice = self.parse(&document.text);

        if invoice.records.is_empty() {
            return Err(ExtractionError::EmptyBatch {
                document: document.name.clone(),
            });
        }

        for record in invoice.records.iter().filter(|r| !validate_cnpj(&r.tax_id)) {
            warn!("{}: CNPJ {} fails check-digit validation", document.name, record.tax_id);
        }

        match invoice.records_total() {
            None => warn!(
                "{}: invoice record sum overflows, total cross-check skipped",
                document.name
            ),
            Some(total) => {
                if let Some(delta) = invoice.total_mismatch() {
                    warn!(
                        "{}: invoice records sum to {} but the bill total differs by {}",
                        document.name, total, delta
                    );
                }
            }
        }

        info!(
            "{}: {} invoice record(s), account {}, period {}",
            document.name,
            invoice.records.len(),
            invoice.account_number.as_deref().unwrap_or("?"),
            invoice.reference_period.as_deref().unwrap_or("?")
        );

        Ok(invoice)
    }
}

impl Default for CompositeInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_block(block: &str) -> Option<InvoiceRecord> {
    let tax_id = BLOCK_TAX_ID.captures(block)?;
    let rest = &block[tax_id.get(0)?.end()..];
    let total = BLOCK_TOTAL.captures(rest)?;

    Some(InvoiceRecord {
        tax_id: normalize_tax_id(&tax_id[1]),
        amount: MonetaryCandidate::new(&total[1]),
    })
}

fn is_valid_period(period: &str) -> bool {
    NaiveDate::parse_from_str(&format!("01/{}", period), "%d/%m/%Y").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BILL: &str = "Nº da Conta: 0123456789 Mês de referência: 03/2025 \
        Total a Pagar - R$ 1.350,00\n\
        NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES Modelo 22 \
        CNPJ: 02.558.157/0001-62 Itens ... \
        TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. 1.000,00\n\
        NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES Modelo 22 \
        CNPJ: 11.222.333/0001-81 sem total nesta nota\n\
        NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES Modelo 22 \
        CNPJ: 02.558.157/0049-07 \
        TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. 350,00\n";

    #[test]
    fn test_metadata() {
        let invoice = CompositeInvoiceParser::new().parse(BILL);
        assert_eq!(invoice.account_number.as_deref(), Some("0123456789"));
        assert_eq!(invoice.reference_period.as_deref(), Some("03/2025"));
        assert_eq!(invoice.amount_due.unwrap().as_str(), "1.350,00");
    }

    #[test]
    fn test_malformed_block_skipped() {
        let invoice = CompositeInvoiceParser::new().parse(BILL);
        assert_eq!(
            invoice.records,
            vec![
                InvoiceRecord {
                    tax_id: "02558157000162".to_string(),
                    amount: MonetaryCandidate::new("1.000,00"),
                },
                InvoiceRecord {
                    tax_id: "02558157004907".to_string(),
                    amount: MonetaryCandidate::new("350,00"),
                },
            ]
        );
        assert_eq!(invoice.total_mismatch(), None);
    }

    #[test]
    fn test_total_before_cnpj_not_paired() {
        let text = "NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES \
            TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. 10,00 CNPJ: 02.558.157/0001-62";
        assert!(CompositeInvoiceParser::new().parse(text).records.is_empty());
    }

    #[test]
    fn test_total_mismatch() {
        let text = BILL.replace("1.350,00", "1.400,00");
        let invoice = CompositeInvoiceParser::new().parse(&text);
        assert_eq!(invoice.total_mismatch(), Some(Decimal::new(5000, 2)));
    }

    #[test]
    fn test_record_sum_overflow_skips_cross_check() {
        let huge = "70.000.000.000.000.000.000.000.000.000,00";
        let text = format!(
            "Total a Pagar - R$ 1.000,00\n\
             NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES CNPJ: 02.558.157/0001-62 \
             TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. {huge}\n\
             NOTA FISCAL DE SERVIÇOS DE TELECOMUNICAÇÕES CNPJ: 02.558.157/0049-07 \
             TOTAL NOTA FISCAL TELEFONICA BRASIL S.A. {huge}\n"
        );
        let doc = Document::from_text("VIVO_MOVEL_04.pdf", &text);

        let invoice = CompositeInvoiceParser::new().parse_document(&doc).unwrap();
        assert_eq!(invoice.records.len(), 2);
        assert_eq!(invoice.records_total(), None);
        assert_eq!(invoice.total_mismatch(), None);
    }

    #[test]
    fn test_invalid_period_dropped() {
        let invoice = CompositeInvoiceParser::new().parse("Mês de referência: 13/2025");
        assert_eq!(invoice.reference_period, None);
    }

    #[test]
    fn test_empty_document_rejected() {
        let doc = Document::from_text("VIVO_MOVEL_03.pdf", "Nº da Conta: 42");
        let err = CompositeInvoiceParser::new().parse_document(&doc).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::EmptyBatch {
                document: "VIVO_MOVEL_03.pdf".to_string()
            }
        );
    }
}
