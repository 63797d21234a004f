//! Total-value resolution: the extractor cascade.

use tracing::{debug, info};

use super::rules::{BarcodeScan, CandidateExtractor, KeywordScan, MonetaryScan, SpatialScan};
use super::Result;
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::{Document, MonetaryCandidate};

/// Candidates found for a document and the strategy that found them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Name of the strategy that produced the candidates.
    pub strategy: &'static str,
    /// Candidates in strategy order; never empty.
    pub candidates: Vec<MonetaryCandidate>,
}

impl Resolution {
    /// More than one candidate survived and a choice is needed.
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Runs extraction strategies in priority order and stops at the first one
/// that yields candidates.
///
/// The default order is keyword, spatial, monetary, barcode: explicit
/// keyword anchoring first, slip digit-line decoding last.
pub struct TotalValueResolver {
    strategies: Vec<Box<dyn CandidateExtractor>>,
}

impl TotalValueResolver {
    /// Create a resolver with the default cascade.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create the default cascade with tuned thresholds.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_strategies(vec![
            Box::new(KeywordScan::new()),
            Box::new(SpatialScan::new().with_quadrant(config.quadrant_x, config.quadrant_y)),
            Box::new(MonetaryScan::new().with_min_value(config.min_generic_value)),
            Box::new(BarcodeScan::new()),
        ])
    }

    /// Create a resolver with a custom strategy list, tried in the given order.
    pub fn with_strategies(strategies: Vec<Box<dyn CandidateExtractor>>) -> Self {
        Self { strategies }
    }

    /// Names of the strategies in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Find the candidate totals for a document.
    ///
    /// Later strategies never run once an earlier one succeeds. When every
    /// strategy comes back empty the document is rejected.
    pub fn resolve(&self, document: &Document) -> Result<Resolution> {
        for strategy in &self.strategies {
            debug!("{}: trying {} strategy", document.name, strategy.name());

            if let Some(candidates) = strategy.extract(document) {
                if candidates.is_empty() {
                    continue;
                }
                info!(
                    "{}: {} strategy found {} candidate(s)",
                    document.name,
                    strategy.name(),
                    candidates.len()
                );
                return Ok(Resolution {
                    strategy: strategy.name(),
                    candidates,
                });
            }
        }

        Err(ExtractionError::NoCandidates {
            document: document.name.clone(),
            strategies: self.strategy_names().iter().map(|s| s.to_string()).collect(),
        })
    }
}

impl Default for TotalValueResolver {
    fn default() -> Self {
        Self::new()
    }
}
