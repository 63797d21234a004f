//! Purchase requisition line items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Item position in a requisition: `0010`, `0020`, ...
///
/// Serialized as the zero-padded four digit string the receiving system
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SequenceNumber(u32);

impl SequenceNumber {
    /// Position of the first item of an empty batch.
    pub const FIRST: Self = Self(10);

    /// Distance between consecutive positions.
    pub const STEP: u32 = 10;

    /// Largest position that fits the four digit field.
    pub const MAX: u32 = 9999;

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The position after this one. Saturates instead of wrapping.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(Self::STEP))
    }
}

impl Default for SequenceNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl FromStr for SequenceNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(value) if value <= Self::MAX => Ok(Self(value)),
            Ok(_) => Err(format!("item number out of range: {:?}", s)),
            Err(_) => Err(format!("invalid item number: {:?}", s)),
        }
    }
}

impl TryFrom<String> for SequenceNumber {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SequenceNumber> for String {
    fn from(value: SequenceNumber) -> Self {
        value.to_string()
    }
}

/// Whether an item bills a service or a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Service,
    #[default]
    Material,
}

impl ItemKind {
    /// Letter used in the item label.
    pub fn letter(self) -> char {
        match self {
            Self::Service => 'S',
            Self::Material => 'M',
        }
    }
}

/// One requisition item in the exact shape of the outgoing payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item position.
    #[serde(rename = "PREQ_ITEM")]
    pub sequence: SequenceNumber,

    /// Material code.
    #[serde(rename = "MATERIAL")]
    pub material: String,

    /// Label: `[<S|M>,<supplier>] <description>`.
    #[serde(rename = "SHORT_TEXT")]
    pub short_text: String,

    /// Always `"1"`.
    #[serde(rename = "QUANTITY")]
    pub quantity: String,

    /// Price in target-locale form (`1234.56`).
    #[serde(rename = "PREQ_PRICE")]
    pub price: String,
}

impl LineItem {
    pub const QUANTITY: &'static str = "1";
}
