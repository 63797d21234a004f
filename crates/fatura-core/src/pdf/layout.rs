//! Span geometry delivered by the layout service as a JSON sidecar.

use std::path::Path;

use tracing::debug;

use super::Result;
use crate::error::PdfError;
use crate::models::PageLayout;

/// Parse `[{ number, width, height, spans: [{ text, bbox }] }]`.
pub fn parse_layout(json: &str) -> Result<Vec<PageLayout>> {
    let pages: Vec<PageLayout> =
        serde_json::from_str(json).map_err(|e| PdfError::Layout(e.to_string()))?;

    if let Some(page) = pages.iter().find(|p| p.width <= 0.0 || p.height <= 0.0) {
        return Err(PdfError::Layout(format!(
            "page {} has degenerate size {}x{}",
            page.number, page.width, page.height
        )));
    }

    Ok(pages)
}

/// Read a layout sidecar from disk.
pub fn load_layout(path: &Path) -> Result<Vec<PageLayout>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PdfError::Layout(format!("{}: {}", path.display(), e)))?;
    let pages = parse_layout(&content)?;
    debug!("loaded layout for {} page(s) from {}", pages.len(), path.display());
    Ok(pages)
}
