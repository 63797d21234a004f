//! Core library for Brazilian invoice total extraction.
//!
//! This crate provides:
//! - PDF and plain-text document loading, with optional layout sidecars
//! - A cascade of total-value extractors (keyword, spatial, monetary, barcode)
//! - Disambiguation of competing candidates through an injected gate
//! - Parsing of composite carrier bills into per-CNPJ invoice records
//! - Purchase requisition item assembly, batching and the request envelope

pub mod error;
pub mod invoice;
pub mod models;
pub mod payload;
pub mod pdf;
pub mod pipeline;

pub use error::{ExtractionError, FaturaError, PayloadError, PdfError, Result};
pub use invoice::{
    CompositeInvoice, CompositeInvoiceParser, DisambiguationGate, FirstCandidate, InvoiceRecord,
    Resolution, Settlement, TotalValueResolver,
};
pub use models::{
    Document, FaturaConfig, ItemKind, LineItem, MonetaryCandidate, Requisition, RequisitionForm,
    SequenceNumber,
};
pub use payload::{Batch, PayloadAssembler, SupplierResolver, SupplierTable};
pub use pdf::{load_document, load_layout, PdfExtractor};
pub use pipeline::{BillingOrder, Billed, DocumentKind, Pipeline};
