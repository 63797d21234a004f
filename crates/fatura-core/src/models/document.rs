//! Document text and layout as handed over by the extraction service.

use serde::{Deserialize, Serialize};

/// A document ready for value extraction.
///
/// `text` is the newline-joined, whitespace-normalized full text. `pages`
/// keeps the raw text of every page for page-scoped scans, and `layout`
/// carries span geometry when the extraction service provided it.
#[derive(Debug, Clone)]
pub struct Document {
    /// Identifier used in logs and errors (usually the file name).
    pub name: String,
    /// Normalized full text.
    pub text: String,
    /// Raw per-page text in document order.
    pub pages: Vec<PageText>,
    /// Optional per-page span geometry.
    pub layout: Option<Vec<PageLayout>>,
}

/// Raw text of a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed).
    pub number: u32,
    /// Text as extracted, physical line breaks preserved.
    pub text: String,
}

/// Span geometry of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed).
    pub number: u32,
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    /// Text spans in reading order.
    #[serde(default)]
    pub spans: Vec<LayoutSpan>,
}

/// A text fragment with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpan {
    /// Span text.
    pub text: String,
    /// Bounding box (x0, y0, x1, y1), origin at the top-left corner.
    pub bbox: [f32; 4],
}

impl LayoutSpan {
    pub fn new(text: impl Into<String>, bbox: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    /// Position of the span's top-left corner relative to the page (0.0 - 1.0).
    ///
    /// Returns `None` for pages with degenerate dimensions.
    pub fn relative_origin(&self, width: f32, height: f32) -> Option<(f32, f32)> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some((self.bbox[0] / width, self.bbox[1] / height))
    }
}

impl Document {
    /// Build a document from already-extracted plain text, treated as one page.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let normalized = text
            .lines()
            .map(collapse_whitespace)
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            name: name.into(),
            text: normalized,
            pages: vec![PageText {
                number: 1,
                text: text.to_string(),
            }],
            layout: None,
        }
    }

    /// Build a document from raw page texts.
    ///
    /// Every page contributes one line to the full text: its physical lines
    /// are whitespace-collapsed and joined with single spaces.
    pub fn from_pages(name: impl Into<String>, pages: Vec<String>) -> Self {
        let text = pages
            .iter()
            .map(|page| collapse_whitespace(page))
            .collect::<Vec<_>>()
            .join("\n");

        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText {
                number: i as u32 + 1,
                text,
            })
            .collect();

        Self {
            name: name.into(),
            text,
            pages,
            layout: None,
        }
    }

    /// Attach span geometry.
    pub fn with_layout(mut self, layout: Vec<PageLayout>) -> Self {
        self.layout = Some(layout);
        self
    }

    /// True when no page produced any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_pages_joins_lines_per_page() {
        let doc = Document::from_pages(
            "fatura.pdf",
            vec![
                "TOTAL\n  R$ 1.234,56 \n".to_string(),
                "Vencimento\t10/02/2025".to_string(),
            ],
        );

        assert_eq!(doc.text, "TOTAL R$ 1.234,56\nVencimento 10/02/2025");
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].number, 2);
        assert!(doc.pages[0].text.contains('\n'));
    }

    #[test]
    fn test_from_text_keeps_physical_lines() {
        let doc = Document::from_text("nota.txt", "Valor   total\nR$  10,00");
        assert_eq!(doc.text, "Valor total\nR$ 10,00");
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn test_blank_document() {
        let doc = Document::from_pages("vazio.pdf", vec!["  \n ".to_string()]);
        assert!(doc.is_blank());
    }

    #[test]
    fn test_relative_origin() {
        let span = LayoutSpan::new("150,00", [400.0, 600.0, 450.0, 612.0]);
        assert_eq!(span.relative_origin(595.0, 842.0).map(|(x, _)| x > 0.5), Some(true));
        assert_eq!(span.relative_origin(0.0, 842.0), None);
    }
}
