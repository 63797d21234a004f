//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document as PdfDocument;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::Document;

/// PDF text extractor using lopdf, with pdf-extract as whole-document fallback.
pub struct PdfExtractor {
    document: Option<PdfDocument>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Build an extraction-ready document from the loaded PDF.
    ///
    /// Pages are read one by one through lopdf. When that yields no text at
    /// all, pdf-extract reads the whole file and its output is used as a
    /// single page.
    pub fn to_document(&self, name: impl Into<String>, max_pages: usize) -> Result<Document> {
        let name = name.into();
        let mut page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        if max_pages > 0 && page_count as usize > max_pages {
            debug!("{}: reading {} of {} pages", name, max_pages, page_count);
            page_count = max_pages as u32;
        }

        let mut pages = Vec::with_capacity(page_count as usize);
        for page in 1..=page_count {
            let text = self.extract_page_text(page).unwrap_or_else(|e| {
                warn!("{}: page {} unreadable: {}", name, page, e);
                String::new()
            });
            pages.push(text);
        }

        if pages.iter().all(|p| p.trim().is_empty()) {
            debug!("{}: no per-page text, falling back to whole-document extraction", name);
            pages = vec![self.extract_text()?];
        }

        debug!(
            "{}: {} page(s), {} chars",
            name,
            pages.len(),
            pages.iter().map(String::len).sum::<usize>()
        );

        Ok(Document::from_pages(name, pages))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = PdfDocument::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.raw_data.is_empty() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
