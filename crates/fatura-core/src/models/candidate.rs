//! Monetary candidates produced by the value extractors.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::rules::amounts::{format_number, parse_source_amount};
use crate::invoice::rules::patterns::BARE_VALUE;

/// A numeric string in source-locale form (`1.234,56`) that may be a total.
///
/// Candidates compare by exact text: `1.234,56` and `1234,56` are distinct
/// even though they denote the same amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonetaryCandidate(String);

impl MonetaryCandidate {
    /// Wrap a value the caller already matched against the candidate shape.
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Accept `value` only if it has the `digits(.digits)*,dd` shape.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        BARE_VALUE.is_match(value).then(|| Self::new(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the candidate.
    pub fn value(&self) -> Option<Decimal> {
        parse_source_amount(&self.0)
    }

    /// The candidate rendered in the target convention (`1234.56`).
    pub fn to_target_locale(&self) -> String {
        format_number(&self.0)
    }
}

impl fmt::Display for MonetaryCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MonetaryCandidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
