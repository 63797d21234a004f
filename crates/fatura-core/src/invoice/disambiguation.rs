//! Choosing one total when several candidates survive.

use tracing::{info, warn};

use super::resolver::Resolution;
use crate::models::MonetaryCandidate;

/// Answer of a disambiguation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// The caller picked this candidate.
    Chosen(MonetaryCandidate),
    /// The caller declined to pick (dialog closed, empty input, ...).
    Abstain,
}

/// Something that picks one candidate out of an ordered list.
///
/// This is the pipeline's only suspension point: an interactive front end
/// blocks here until the operator answers.
pub trait DisambiguationGate {
    fn choose(&mut self, document: &str, candidates: &[MonetaryCandidate]) -> Choice;
}

impl<F> DisambiguationGate for F
where
    F: FnMut(&str, &[MonetaryCandidate]) -> Choice,
{
    fn choose(&mut self, document: &str, candidates: &[MonetaryCandidate]) -> Choice {
        self(document, candidates)
    }
}

/// Gate for unattended runs. It never answers, so [`settle`] takes the
/// first candidate and records the value as unconfirmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

impl DisambiguationGate for FirstCandidate {
    fn choose(&mut self, _document: &str, _candidates: &[MonetaryCandidate]) -> Choice {
        Choice::Abstain
    }
}

/// How the settled value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementSource {
    /// Only one candidate existed.
    Single,
    /// The gate picked it.
    Selected,
    /// The gate abstained; the first candidate was used.
    Fallback,
}

/// The total settled for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub value: MonetaryCandidate,
    pub strategy: &'static str,
    pub source: SettlementSource,
}

impl Settlement {
    /// False when the value was not confirmed by anyone.
    pub fn is_explicit(&self) -> bool {
        self.source != SettlementSource::Fallback
    }
}

/// Settle a resolution into one value, asking the gate only when needed.
///
/// On abstention, or when the gate answers with something that is not one of
/// the offered candidates, the first candidate is used and a warning logged.
pub fn settle(
    document: &str,
    resolution: Resolution,
    gate: &mut dyn DisambiguationGate,
) -> Settlement {
    let Resolution {
        strategy,
        mut candidates,
    } = resolution;

    if candidates.len() == 1 {
        let value = candidates.remove(0);
        info!("{}: total {}", document, value);
        return Settlement {
            value,
            strategy,
            source: SettlementSource::Single,
        };
    }

    warn!("{}: {} candidate totals found", document, candidates.len());

    match gate.choose(document, &candidates) {
        Choice::Chosen(value) if candidates.contains(&value) => {
            info!("{}: selected total {}", document, value);
            Settlement {
                value,
                strategy,
                source: SettlementSource::Selected,
            }
        }
        choice => {
            if let Choice::Chosen(other) = choice {
                warn!("{}: gate answered {} which was not offered", document, other);
            }
            let value = candidates.remove(0);
            warn!(
                "{}: no value selected, using the first candidate {}",
                document, value
            );
            Settlement {
                value,
                strategy,
                source: SettlementSource::Fallback,
            }
        }
    }
}
