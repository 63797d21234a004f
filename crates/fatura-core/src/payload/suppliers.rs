//! Tax ID to supplier code lookup.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{FaturaError, Result};
use crate::invoice::rules::normalize_tax_id;
use crate::models::config::SupplierConfig;

/// Built-in fallback codes for the composite carrier's billing entities.
const CARRIER_SUPPLIERS: [(&str, &str); 16] = [
    ("02558157000162", "400100"),
    ("02558157004907", "400110"),
    ("02558157005040", "400120"),
    ("02558157008309", "400130"),
    ("02558157011601", "400140"),
    ("02558157018371", "400150"),
    ("02558157022484", "400160"),
    ("02558157028334", "400170"),
    ("02558157032102", "400180"),
    ("02558157040202", "400190"),
    ("02558157045506", "400200"),
    ("02558157051743", "400210"),
    ("02558157058241", "400220"),
    ("02558157064055", "400230"),
    ("02558157071183", "400240"),
    ("02558157079087", "400250"),
];

/// Supplier codes keyed by normalized CNPJ.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierTable {
    codes: HashMap<String, String>,
}

impl SupplierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in carrier table.
    pub fn carrier_fallback() -> Self {
        CARRIER_SUPPLIERS.iter().copied().collect()
    }

    /// Parse a `{ "<cnpj>": "<code>" }` JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(raw.into_iter().collect())
    }

    /// Load a JSON table from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
            .map_err(|e| FaturaError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn insert(&mut self, tax_id: &str, code: impl Into<String>) {
        self.codes.insert(normalize_tax_id(tax_id), code.into());
    }

    /// Code for a tax ID in any punctuation.
    pub fn get(&self, tax_id: &str) -> Option<&str> {
        self.codes.get(&normalize_tax_id(tax_id)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries sorted by tax ID.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .codes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for SupplierTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (tax_id, code) in iter {
            table.insert(tax_id.as_ref(), code);
        }
        table
    }
}

/// Outcome of a supplier lookup. Never an error: an unknown tax ID is
/// billed under the tax ID itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "code", rename_all = "snake_case")]
pub enum SupplierResolution {
    Primary(String),
    Secondary(String),
    Unresolved(String),
}

impl SupplierResolution {
    /// Text placed in the item label.
    pub fn label_code(&self) -> &str {
        match self {
            Self::Primary(code) | Self::Secondary(code) | Self::Unresolved(code) => code,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved(_))
    }
}

/// Two-tier supplier lookup: the configured table first, then the fallback.
#[derive(Debug, Clone, Default)]
pub struct SupplierResolver {
    primary: SupplierTable,
    secondary: SupplierTable,
}

impl SupplierResolver {
    pub fn new(primary: SupplierTable, secondary: SupplierTable) -> Self {
        Self { primary, secondary }
    }

    /// Primary table with the built-in carrier fallback.
    pub fn with_carrier_fallback(primary: SupplierTable) -> Self {
        Self::new(primary, SupplierTable::carrier_fallback())
    }

    /// Load the tables named in the configuration.
    ///
    /// A missing primary file leaves the primary tier empty; a configured
    /// secondary file replaces the built-in fallback.
    pub fn from_config(config: &SupplierConfig) -> Result<Self> {
        let primary = if config.primary.exists() {
            SupplierTable::from_file(&config.primary)?
        } else {
            warn!(
                "supplier table {} not found, only fallback codes available",
                config.primary.display()
            );
            SupplierTable::new()
        };

        let secondary = match &config.secondary {
            Some(path) => SupplierTable::from_file(path)?,
            None => SupplierTable::carrier_fallback(),
        };

        Ok(Self::new(primary, secondary))
    }

    pub fn primary(&self) -> &SupplierTable {
        &self.primary
    }

    pub fn secondary(&self) -> &SupplierTable {
        &self.secondary
    }

    pub fn resolve(&self, tax_id: &str) -> SupplierResolution {
        if let Some(code) = self.primary.get(tax_id) {
            return SupplierResolution::Primary(code.to_string());
        }
        if let Some(code) = self.secondary.get(tax_id) {
            return SupplierResolution::Secondary(code.to_string());
        }

        let raw = normalize_tax_id(tax_id);
        debug!("no supplier code for CNPJ {}, labelling with the tax ID", raw);
        SupplierResolution::Unresolved(raw)
    }
}
