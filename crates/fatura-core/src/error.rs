//! Error types for the fatura-core library.

use thiserror::Error;

/// Main error type for the fatura library.
#[derive(Error, Debug)]
pub enum FaturaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Value or record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Payload assembly error.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Layout data from the geometry service could not be read.
    #[error("invalid layout data: {0}")]
    Layout(String),
}

/// Errors related to value and record extraction.
///
/// Every variant names the document it belongs to so an operator can tell
/// which file in a batch was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No strategy produced a candidate total.
    #[error("no total value found in {document} (tried: {})", .strategies.join(", "))]
    NoCandidates {
        document: String,
        strategies: Vec<String>,
    },

    /// A composite invoice yielded zero invoice records.
    #[error("no invoice records found in composite document {document}")]
    EmptyBatch { document: String },

    /// The document produced no text at all.
    #[error("no text extracted from {document}")]
    NoText { document: String },
}

impl ExtractionError {
    /// Name of the document the error refers to.
    pub fn document(&self) -> &str {
        match self {
            Self::NoCandidates { document, .. }
            | Self::EmptyBatch { document }
            | Self::NoText { document } => document,
        }
    }
}

/// Errors raised while building the outgoing requisition payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Required header fields were left empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Delivery date could not be parsed.
    #[error("invalid delivery date: {0}")]
    InvalidDate(String),

    /// Nothing has been accumulated yet.
    #[error("batch has no items")]
    EmptyBatch,
}

/// Result type for the fatura library.
pub type Result<T> = std::result::Result<T, FaturaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_candidates_message_lists_strategies() {
        let err = ExtractionError::NoCandidates {
            document: "conta.pdf".to_string(),
            strategies: vec!["keyword".to_string(), "spatial".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "no total value found in conta.pdf (tried: keyword, spatial)"
        );
        assert_eq!(err.document(), "conta.pdf");
    }

    #[test]
    fn test_missing_fields_message() {
        let err = PayloadError::MissingFields(vec!["Cost center".into(), "GL account".into()]);
        assert_eq!(err.to_string(), "missing required fields: Cost center, GL account");
    }
}
