//! Invoice total extraction: candidate strategies, the resolver cascade,
//! disambiguation and composite bill parsing.

pub mod composite;
pub mod disambiguation;
pub mod resolver;
pub mod rules;

pub use composite::{CompositeInvoice, CompositeInvoiceParser, InvoiceRecord};
pub use disambiguation::{settle, Choice, DisambiguationGate, FirstCandidate, Settlement, SettlementSource};
pub use resolver::{Resolution, TotalValueResolver};
pub use rules::{CandidateExtractor, CandidateSet};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
