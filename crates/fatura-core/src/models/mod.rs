//! Data models shared by the extraction and payload layers.

pub mod candidate;
pub mod config;
pub mod document;
pub mod line_item;
pub mod request;

pub use candidate::MonetaryCandidate;
pub use document::{Document, LayoutSpan, PageLayout, PageText};
pub use line_item::{ItemKind, LineItem, SequenceNumber};
pub use config::FaturaConfig;
pub use request::{AccountCategory, Requisition, RequisitionForm};
