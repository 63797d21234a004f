//! Generic monetary-token scan.
//!
//! Used when no keyword or layout evidence exists: every isolated value in
//! the text is a candidate, ranked largest first since a grand total is
//! usually the biggest number on the page.

use rust_decimal::Decimal;
use tracing::debug;

use super::patterns::BARE_VALUE;
use super::{CandidateExtractor, CandidateSet};
use crate::models::{Document, MonetaryCandidate};

/// Whitespace-delimited value scanner with a plausibility floor.
pub struct MonetaryScan {
    min_value: Decimal,
}

impl MonetaryScan {
    pub fn new() -> Self {
        Self {
            min_value: Decimal::TEN,
        }
    }

    /// Set the smallest value still considered a plausible total.
    pub fn with_min_value(mut self, min_value: Decimal) -> Self {
        self.min_value = min_value;
        self
    }

    pub fn scan(&self, text: &str) -> Option<Vec<MonetaryCandidate>> {
        let mut tokens = CandidateSet::new();
        let mut dropped = 0usize;

        for token in text.split_whitespace().filter(|t| BARE_VALUE.is_match(t)) {
            let candidate = MonetaryCandidate::new(token);
            match candidate.value() {
                Some(value) if value >= self.min_value => {
                    tokens.push(candidate);
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!("dropped {} values below {}", dropped, self.min_value);
        }

        let mut ranked: Vec<(Decimal, MonetaryCandidate)> = tokens
            .into_candidates()?
            .into_iter()
            .filter_map(|c| c.value().map(|v| (v, c)))
            .collect();

        // Stable sort keeps appearance order among equal amounts
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        Some(ranked.into_iter().map(|(_, c)| c).collect())
    }
}

impl Default for MonetaryScan {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateExtractor for MonetaryScan {
    fn name(&self) -> &'static str {
        "monetary"
    }

    fn extract(&self, document: &Document) -> Option<Vec<MonetaryCandidate>> {
        self.scan(&document.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(candidates: Option<Vec<MonetaryCandidate>>) -> Vec<String> {
        candidates
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_small_values_filtered() {
        let text = "taxa 5,00 total 1.234,56 desconto 9,99";
        assert_eq!(values(MonetaryScan::new().scan(text)), vec!["1.234,56"]);
    }

    #[test]
    fn test_sorted_descending() {
        let text = "10,00\n250,00 99,90 1.000,00";
        assert_eq!(
            values(MonetaryScan::new().scan(text)),
            vec!["1.000,00", "250,00", "99,90", "10,00"]
        );
    }

    #[test]
    fn test_adjacent_tokens_both_found() {
        let text = "40,00 50,00";
        assert_eq!(values(MonetaryScan::new().scan(text)), vec!["50,00", "40,00"]);
    }

    #[test]
    fn test_embedded_values_ignored() {
        assert!(MonetaryScan::new().scan("R$100,00 (100,00) 100,00x").is_none());
    }

    #[test]
    fn test_custom_floor() {
        let scan = MonetaryScan::new().with_min_value(Decimal::ONE);
        assert_eq!(values(scan.scan("5,00 0,50")), vec!["5,00"]);
    }

    #[test]
    fn test_distinct_renderings_kept() {
        let text = "1.500,00 1500,00 1.500,00";
        assert_eq!(values(MonetaryScan::new().scan(text)), vec!["1.500,00", "1500,00"]);
    }
}
