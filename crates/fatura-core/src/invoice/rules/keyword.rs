//! Keyword-anchored total extraction.

use regex::Regex;
use tracing::trace;

use super::patterns::KEYWORD_PATTERNS;
use super::{CandidateExtractor, CandidateSet};
use crate::models::{Document, MonetaryCandidate};

/// Scans the full text with the keyword battery.
///
/// Every pattern runs; matches are pooled in pattern order and deduplicated
/// by first sighting, so overlapping keywords that agree on a value do not
/// produce duplicates while reading order is kept.
pub struct KeywordScan {
    patterns: &'static [Regex],
}

impl KeywordScan {
    pub fn new() -> Self {
        Self {
            patterns: KEYWORD_PATTERNS.as_slice(),
        }
    }

    /// Run the battery over raw text.
    pub fn scan(&self, text: &str) -> Option<Vec<MonetaryCandidate>> {
        let mut candidates = CandidateSet::new();

        for (index, pattern) in self.patterns.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                if candidates.push(MonetaryCandidate::new(&caps[1])) {
                    trace!("keyword pattern {} matched {}", index, &caps[1]);
                }
            }
        }

        candidates.into_candidates()
    }
}

impl Default for KeywordScan {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateExtractor for KeywordScan {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn extract(&self, document: &Document) -> Option<Vec<MonetaryCandidate>> {
        self.scan(&document.text)
    }
}

/// Extract keyword-anchored candidates from text.
pub fn extract_keyword_candidates(text: &str) -> Vec<MonetaryCandidate> {
    KeywordScan::new().scan(text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(candidates: Vec<MonetaryCandidate>) -> Vec<String> {
        candidates.into_iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_total_across_line_break() {
        let text = "TOTAL A PAGAR\nR$ 1.530,90\nObrigado";
        assert_eq!(values(extract_keyword_candidates(text)), vec!["1.530,90"]);
    }

    #[test]
    fn test_overlapping_keywords_vote_once() {
        let text = "VALOR TOTAL R$ 980,00 TOTAL FATURA R$ 980,00";
        assert_eq!(values(extract_keyword_candidates(text)), vec!["980,00"]);
    }

    #[test]
    fn test_pooled_in_pattern_order() {
        let text = "Valor do documento 75,10 Pagamento R$ 80,00";
        let found = values(extract_keyword_candidates(text));
        // "VALOR ... R$" reaches the second amount before the bare one
        assert_eq!(found, vec!["80,00", "75,10"]);
    }

    #[test]
    fn test_lowercase_and_accents() {
        let text = "total líquido fatura r$ 2.000,00";
        assert_eq!(values(extract_keyword_candidates(text)), vec!["2.000,00"]);
    }

    #[test]
    fn test_no_keyword_no_candidates() {
        assert!(KeywordScan::new().scan("Referência 12/2024 1.234,56").is_none());
    }
}
