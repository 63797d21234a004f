//! Layout-based total extraction.
//!
//! Invoice totals are conventionally printed near the bottom-right corner,
//! so values found in that quadrant are ranked ahead of the rest.

use tracing::{debug, trace};

use super::patterns::{BARE_VALUE, CURRENCY_VALUE};
use super::{CandidateExtractor, CandidateSet};
use crate::models::{Document, MonetaryCandidate, PageLayout};

/// Walks page spans looking for amounts.
pub struct SpatialScan {
    /// Relative x position beyond which a span is on the right half.
    quadrant_x: f32,
    /// Relative y position beyond which a span is on the lower half.
    quadrant_y: f32,
}

impl SpatialScan {
    pub fn new() -> Self {
        Self {
            quadrant_x: 0.5,
            quadrant_y: 0.5,
        }
    }

    /// Set the lower-right quadrant thresholds.
    pub fn with_quadrant(mut self, x: f32, y: f32) -> Self {
        self.quadrant_x = x;
        self.quadrant_y = y;
        self
    }

    /// Scan the spans of the given pages.
    ///
    /// Values from the lower-right quadrant come first, then all others.
    /// Each group keeps page and span order.
    pub fn scan(&self, pages: &[PageLayout]) -> Option<Vec<MonetaryCandidate>> {
        let mut corner = Vec::new();
        let mut rest = Vec::new();

        for page in pages {
            for span in &page.spans {
                let Some(value) = span_value(&span.text) else {
                    continue;
                };

                if self.in_lower_right(span.relative_origin(page.width, page.height)) {
                    trace!("page {}: {} sits in the lower-right quadrant", page.number, value);
                    corner.push(value);
                } else {
                    rest.push(value);
                }
            }
        }

        let mut candidates = CandidateSet::new();
        candidates.extend(corner);
        candidates.extend(rest);
        candidates.into_candidates()
    }

    fn in_lower_right(&self, origin: Option<(f32, f32)>) -> bool {
        matches!(origin, Some((x, y)) if x > self.quadrant_x && y > self.quadrant_y)
    }
}

/// The amount a span holds, either bare or after a currency symbol.
fn span_value(text: &str) -> Option<MonetaryCandidate> {
    let text = text.trim();
    if BARE_VALUE.is_match(text) {
        return Some(MonetaryCandidate::new(text));
    }
    CURRENCY_VALUE
        .captures(text)
        .map(|caps| MonetaryCandidate::new(&caps[1]))
}

impl Default for SpatialScan {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateExtractor for SpatialScan {
    fn name(&self) -> &'static str {
        "spatial"
    }

    fn extract(&self, document: &Document) -> Option<Vec<MonetaryCandidate>> {
        match &document.layout {
            Some(pages) => self.scan(pages),
            None => {
                debug!("{}: no layout data, spatial scan skipped", document.name);
                None
            }
        }
    }
}
