//! Requisition item assembly: supplier lookup, numbering and batching.

pub mod assembler;
pub mod batch;
pub mod suppliers;

pub use assembler::{item_label, PayloadAssembler};
pub use batch::Batch;
pub use suppliers::{SupplierResolution, SupplierResolver, SupplierTable};
