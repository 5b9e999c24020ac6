//! `storepulse-infra` — collaborator implementations.
//!
//! In-memory implementations of the analytics ports (identity store, store
//! configuration, scope emulation, transport) for tests and development,
//! plus the HTTP Measurement-Protocol transport used against a real
//! collector.

pub mod in_memory;
pub mod measurement;


pub use in_memory::{
    CountingEmulation, InMemoryIdentityStore, InMemoryStoreConfig, RecordingTransport,
    StoredIdentity,
};
pub use measurement::MeasurementProtocolTransport;
