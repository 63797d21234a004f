//! Line item assembly from settled totals and composite invoice records.

use tracing::debug;

use super::suppliers::SupplierResolver;
use crate::invoice::InvoiceRecord;
use crate::models::{ItemKind, LineItem, MonetaryCandidate, SequenceNumber};

/// Builds requisition items with consecutive positions.
///
/// The assembler never stores a counter: every call numbers its items from
/// the `start` it is given, and the owning batch advances its own counter
/// when the items are appended.
#[derive(Debug, Clone)]
pub struct PayloadAssembler {
    material_code: String,
    kind: ItemKind,
}

impl PayloadAssembler {
    pub fn new(material_code: impl Into<String>) -> Self {
        Self {
            material_code: material_code.into(),
            kind: ItemKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// One item for a single settled total billed to a known supplier.
    pub fn single(
        &self,
        start: SequenceNumber,
        total: &MonetaryCandidate,
        supplier_code: &str,
        description: &str,
    ) -> LineItem {
        self.item(start, total, supplier_code, description)
    }

    /// One item per invoice record, suppliers resolved by tax ID.
    pub fn from_records(
        &self,
        start: SequenceNumber,
        records: &[InvoiceRecord],
        suppliers: &SupplierResolver,
        description: &str,
    ) -> Vec<LineItem> {
        let mut sequence = start;
        let mut items = Vec::with_capacity(records.len());

        for record in records {
            let supplier = suppliers.resolve(&record.tax_id);
            debug!("item {}: CNPJ {} -> {:?}", sequence, record.tax_id, supplier);
            items.push(self.item(sequence, &record.amount, supplier.label_code(), description));
            sequence = sequence.next();
        }

        items
    }

    fn item(
        &self,
        sequence: SequenceNumber,
        amount: &MonetaryCandidate,
        supplier: &str,
        description: &str,
    ) -> LineItem {
        LineItem {
            sequence,
            material: self.material_code.clone(),
            short_text: item_label(self.kind, supplier, description),
            quantity: LineItem::QUANTITY.to_string(),
            price: amount.to_target_locale(),
        }
    }
}

/// `[<S|M>,<supplier>] <description>`.
pub fn item_label(kind: ItemKind, supplier: &str, description: &str) -> String {
    format!("[{},{}] {}", kind.letter(), supplier, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::SupplierTable;
    use pretty_assertions::assert_eq;

    fn record(tax_id: &str, amount: &str) -> InvoiceRecord {
        InvoiceRecord {
            tax_id: tax_id.to_string(),
            amount: MonetaryCandidate::new(amount),
        }
    }

    #[test]
    fn test_single_item() {
        let assembler = PayloadAssembler::new("ZA040282").with_kind(ItemKind::Service);
        let item = assembler.single(
            SequenceNumber::new(40),
            &MonetaryCandidate::new("12.345,67"),
            "100200",
            "Energia fevereiro",
        );

        assert_eq!(item.sequence.to_string(), "0040");
        assert_eq!(item.short_text, "[S,100200] Energia fevereiro");
        assert_eq!(item.price, "12345.67");
        assert_eq!(item.quantity, "1");
        assert_eq!(item.material, "ZA040282");
    }

    #[test]
    fn test_records_numbered_from_start() {
        let primary: SupplierTable = [("11222333000181", "100200")].into_iter().collect();
        let suppliers = SupplierResolver::new(primary, SupplierTable::new());
        let records = [
            record("11222333000181", "1.000,00"),
            record("99888777000166", "350,00"),
        ];

        let items = PayloadAssembler::new("ZA040282").from_records(
            SequenceNumber::new(30),
            &records,
            &suppliers,
            "Fatura Vivo Movel",
        );

        let labels: Vec<_> = items
            .iter()
            .map(|i| (i.sequence.to_string(), i.short_text.as_str(), i.price.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("0030".to_string(), "[M,100200] Fatura Vivo Movel", "1000.00"),
                ("0040".to_string(), "[M,99888777000166] Fatura Vivo Movel", "350.00"),
            ]
        );
    }

    #[test]
    fn test_assembler_is_pure() {
        let assembler = PayloadAssembler::new("ZA040282");
        let total = MonetaryCandidate::new("10,00");
        let a = assembler.single(SequenceNumber::FIRST, &total, "1", "x");
        let b = assembler.single(SequenceNumber::FIRST, &total, "1", "x");
        assert_eq!(a, b);
    }
}
