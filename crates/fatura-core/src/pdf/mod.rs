//! Document loading: PDF text, plain text and layout sidecars.

mod extractor;
mod layout;

pub use extractor::PdfExtractor;
pub use layout::{load_layout, parse_layout};

use std::path::Path;

use crate::error::PdfError;
use crate::models::Document;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text extraction implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page.
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Load a document from disk.
///
/// `.txt` files are read as a single page; anything else is parsed as PDF.
/// `max_pages` of 0 reads every page.
pub fn load_document(path: &Path, max_pages: usize) -> crate::Result<Document> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let is_text = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    if is_text {
        let text = std::fs::read_to_string(path)?;
        return Ok(Document::from_text(name, &text));
    }

    let data = std::fs::read(path)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    Ok(extractor.to_document(name, max_pages)?)
}
