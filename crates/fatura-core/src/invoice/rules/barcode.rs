//! Payment-slip (boleto) extraction.
//!
//! Only pages carrying slip vocabulary are inspected. Besides slip-specific
//! keywords, the typeable digit line is decoded: utility/tax slips (leading
//! `8`) carry the amount at digits 4..15, bank slips at digits 37..47, both
//! in cents.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::amounts::format_source_amount;
use super::patterns::{DIGIT_LINE, SLIP_PATTERNS, SLIP_TERMS};
use super::{CandidateExtractor, CandidateSet};
use crate::models::{Document, MonetaryCandidate};

/// Digit count range of a typeable line.
const DIGIT_LINE_LEN: std::ops::RangeInclusive<usize> = 47..=48;

/// Slip keyword and digit-line scanner.
pub struct BarcodeScan;

impl BarcodeScan {
    pub fn new() -> Self {
        Self
    }

    /// Scan a single page's text. Non-slip pages yield nothing.
    pub fn scan_page(&self, text: &str, candidates: &mut CandidateSet) {
        if !is_slip_page(text) {
            return;
        }

        for pattern in SLIP_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                candidates.push(MonetaryCandidate::new(&caps[1]));
            }
        }

        for m in DIGIT_LINE.find_iter(text) {
            if let Some(candidate) = decode_digit_line(m.as_str()) {
                trace!("decoded digit line into {}", candidate);
                candidates.push(candidate);
            }
        }
    }
}

impl Default for BarcodeScan {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateExtractor for BarcodeScan {
    fn name(&self) -> &'static str {
        "barcode"
    }

    fn extract(&self, document: &Document) -> Option<Vec<MonetaryCandidate>> {
        let mut candidates = CandidateSet::new();
        for page in &document.pages {
            self.scan_page(&page.text, &mut candidates);
        }
        candidates.into_candidates()
    }
}

/// True when the page mentions any payment-slip indicator term.
pub fn is_slip_page(text: &str) -> bool {
    let upper = text.to_uppercase();
    SLIP_TERMS.iter().any(|term| upper.contains(term))
}

/// Decode the amount field of a typeable digit line.
///
/// Spaces inside the line are ignored. Lines that are not 47 or 48 digits
/// long, and lines whose amount field is not fully numeric, yield `None`.
pub fn decode_digit_line(line: &str) -> Option<MonetaryCandidate> {
    let digits: String = line.chars().filter(|c| *c != ' ').collect();
    if !DIGIT_LINE_LEN.contains(&digits.len()) {
        return None;
    }

    let field = if digits.starts_with('8') {
        digits.get(4..15)?
    } else {
        digits.get(37..47)?
    };

    if !field.chars().all(|c| c.is_ascii_digit()) {
        debug!("skipping digit line with non-numeric amount field {:?}", field);
        return None;
    }

    let cents: i64 = field.parse().ok()?;
    Some(MonetaryCandidate::new(format_source_amount(Decimal::new(cents, 2))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UTILITY_LINE: &str = "836200000012345001380007003456789012345678901234";
    const BANK_LINE: &str = "23793381286000782713695000063305975520000370000";

    #[test]
    fn test_utility_line_amount() {
        assert_eq!(UTILITY_LINE.len(), 48);
        assert_eq!(&UTILITY_LINE[4..15], "00000012345");
        assert_eq!(decode_digit_line(UTILITY_LINE).unwrap().as_str(), "123,45");
    }

    #[test]
    fn test_bank_line_amount() {
        assert_eq!(BANK_LINE.len(), 47);
        assert_eq!(&BANK_LINE[37..47], "0000370000");
        assert_eq!(decode_digit_line(BANK_LINE).unwrap().as_str(), "3700,00");
    }

    #[test]
    fn test_spaces_inside_line() {
        let spaced = "83620000001 23450013800 07003456789 012345678901234";
        assert_eq!(decode_digit_line(spaced).unwrap().as_str(), "123,45");
    }

    #[test]
    fn test_line_length_bounds() {
        assert!(decode_digit_line("8362000000123450013800").is_none());
        assert!(decode_digit_line(&format!("{}99", UTILITY_LINE)).is_none());
    }

    #[test]
    fn test_non_numeric_field_skipped() {
        let line = "8362000x0012345001380007003456789012345678901234";
        assert!(decode_digit_line(line).is_none());
    }

    #[test]
    fn test_slip_detection() {
        assert!(is_slip_page("Ficha de Compensação - Banco X"));
        assert!(is_slip_page("data de vencimento"));
        assert!(!is_slip_page("Nota fiscal de serviços"));
    }

    #[test]
    fn test_non_slip_page_ignored() {
        let mut set = CandidateSet::new();
        BarcodeScan::new().scan_page(&format!("Extrato\n{}", UTILITY_LINE), &mut set);
        assert!(set.is_empty());
    }

    #[test]
    fn test_slip_page_keywords_and_digit_line() {
        let doc = Document::from_pages(
            "boleto.pdf",
            vec![format!(
                "BOLETO BANCÁRIO\nValor: R$ 3.700,00\n{}\n",
                BANK_LINE
            )],
        );

        let found: Vec<String> = BarcodeScan::new()
            .extract(&doc)
            .unwrap()
            .into_iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(found, vec!["3.700,00", "3700,00"]);
    }
}
