//! `storepulse-commerce` — read-only views of the host platform's records.
//!
//! The host commerce platform owns order, quote and invoice persistence.
//! This crate only defines the immutable per-invocation snapshots the
//! analytics pipeline reads; nothing here is written back.

pub mod invoice;
pub mod order;

pub use invoice::{InvoiceContext, InvoiceLine};
pub use order::OrderContext;
