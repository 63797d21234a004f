//! Rule-based value extractors for billing documents.

pub mod amounts;
pub mod barcode;
pub mod cnpj;
pub mod keyword;
pub mod monetary;
pub mod patterns;
pub mod spatial;

pub use amounts::{format_number, format_source_amount, parse_source_amount, ToTargetLocale};
pub use barcode::{decode_digit_line, is_slip_page, BarcodeScan};
pub use cnpj::{format_cnpj, normalize_tax_id, validate_cnpj};
pub use keyword::{extract_keyword_candidates, KeywordScan};
pub use monetary::MonetaryScan;
pub use spatial::SpatialScan;

use std::collections::HashSet;

use crate::models::{Document, MonetaryCandidate};

/// Trait for total-value candidate extractors.
pub trait CandidateExtractor {
    /// Short strategy name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Extract candidates from a document.
    ///
    /// Returns `None` when nothing matched, otherwise a non-empty list of
    /// distinct candidates in strategy order.
    fn extract(&self, document: &Document) -> Option<Vec<MonetaryCandidate>>;
}

/// Ordered, first-seen-wins collection of candidates.
#[derive(Debug, Default)]
pub struct CandidateSet {
    seen: HashSet<String>,
    values: Vec<MonetaryCandidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate unless an identical string was already seen.
    pub fn push(&mut self, candidate: MonetaryCandidate) -> bool {
        if self.seen.insert(candidate.as_str().to_string()) {
            self.values.push(candidate);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `None` when empty, the ordered candidates otherwise.
    pub fn into_candidates(self) -> Option<Vec<MonetaryCandidate>> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values)
        }
    }
}

impl Extend<MonetaryCandidate> for CandidateSet {
    fn extend<I: IntoIterator<Item = MonetaryCandidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.push(candidate);
        }
    }
}
