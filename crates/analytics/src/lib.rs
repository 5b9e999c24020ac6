//! `storepulse-analytics` — the purchase-event assembly and delivery pipeline.
//!
//! An invoice-creation signal from the host platform flows through here as:
//!
//! ```text
//! signal → identity resolution → config gate → line-item normalization
//!        → transaction assembly → extension hooks → delivery client
//! ```
//!
//! Collaborators (store configuration, scope emulation, identity store,
//! analytics transport) are ports defined in this crate; implementations
//! live in `storepulse-infra` or with the host integration.

pub mod assemble;
pub mod client;
pub mod config;
pub mod emulation;
pub mod hooks;
pub mod identity;
pub mod normalize;
pub mod observer;
pub mod records;

pub use assemble::assemble;
pub use client::{AnalyticsTransport, DeliveryClient, DeliveryError, PurchasePayload, TransportError};
pub use config::{
    PURCHASE_EVENT_ENABLED, REQUEST_LOGGING_ENABLED, StoreConfig, TAX_DISPLAY_TYPE, TaxDisplay,
};
pub use emulation::{Area, EmulationError, EmulationGuard, ScopeEmulation};
pub use hooks::{HookBus, HookError, HookResult, PurchaseHook};
pub use identity::{IdentityRecord, IdentityStore, IdentityStoreError, Resolution};
pub use normalize::normalize;
pub use observer::{DeliveryStatus, ObserverError, PurchaseEventObserver, PurchaseEventOutcome};
pub use records::{ProductRecord, TrackingRecord, TransactionRecord, CONVERSION_DOCUMENT_PATH};
