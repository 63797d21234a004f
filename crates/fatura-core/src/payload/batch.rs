//! Accumulated requisition items awaiting submission.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::Result;
use crate::models::{LineItem, SequenceNumber};

/// Items collected across documents, plus the position of the next item.
///
/// The batch is the only owner of the sequence counter. It resets to
/// `0010` when cleared or handed off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    items: Vec<LineItem>,
    next: SequenceNumber,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a batch from persisted items, numbering resumes after the last one.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let next = items
            .last()
            .map(|item| item.sequence.next())
            .unwrap_or(SequenceNumber::FIRST);
        Self { items, next }
    }

    /// Read a persisted batch. A missing file is an empty batch.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let items: Vec<LineItem> = serde_json::from_str(&content)?;
        debug!("loaded {} item(s) from {}", items.len(), path.display());
        Ok(Self::from_items(items))
    }

    /// Persist the items as the JSON array sent in the payload.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&self.items)?)?;
        Ok(())
    }

    /// Position the next appended item must carry.
    pub fn next_sequence(&self) -> SequenceNumber {
        self.next
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append items numbered from [`Batch::next_sequence`].
    pub fn extend(&mut self, items: Vec<LineItem>) {
        if let Some(last) = items.last() {
            self.next = self.next.max(last.sequence.next());
        }
        self.items.extend(items);
    }

    /// Drop all items and restart numbering.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next = SequenceNumber::FIRST;
    }

    /// Hand the items over for submission and restart numbering.
    pub fn take(&mut self) -> Vec<LineItem> {
        self.next = SequenceNumber::FIRST;
        std::mem::take(&mut self.items)
    }

    /// Sum of item prices, `None` if it overflows.
    pub fn total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .filter_map(|item| Decimal::from_str(&item.price).ok())
            .try_fold(Decimal::ZERO, |acc, price| acc.checked_add(price))
    }
}
