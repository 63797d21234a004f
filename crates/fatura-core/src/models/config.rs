//! Configuration structures for extraction and payload assembly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FaturaError, Result};

/// Main configuration for the fatura pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaturaConfig {
    /// Candidate extraction tuning.
    pub extraction: ExtractionConfig,

    /// Line item and requisition defaults.
    pub payload: PayloadConfig,

    /// Supplier code tables.
    pub suppliers: SupplierConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Candidate extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Generic monetary scan drops values below this amount.
    pub min_generic_value: Decimal,

    /// Horizontal bound of the lower-right quadrant (0.0 - 1.0).
    pub quadrant_x: f32,

    /// Vertical bound of the lower-right quadrant (0.0 - 1.0).
    pub quadrant_y: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_generic_value: Decimal::TEN,
            quadrant_x: 0.5,
            quadrant_y: 0.5,
        }
    }
}

/// Line item and requisition defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    /// Material code used when the caller gives none.
    pub material_code: String,

    /// Description used for composite carrier bill items.
    pub composite_description: String,

    /// Plant code sent with every requisition.
    pub plant: String,

    /// Requester e-mail sent with every requisition.
    pub requester_email: Option<String>,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            material_code: "ZA040282".to_string(),
            composite_description: "Fatura Vivo Movel".to_string(),
            plant: "2201".to_string(),
            requester_email: None,
        }
    }
}

/// Supplier code table locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierConfig {
    /// JSON object mapping CNPJ to supplier code.
    pub primary: PathBuf,

    /// Replacement for the built-in carrier fallback table.
    pub secondary: Option<PathBuf>,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        Self {
            primary: PathBuf::from("config_files/fornecedores.json"),
            secondary: None,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

impl FaturaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FaturaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
