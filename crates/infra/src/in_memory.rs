//! In-memory collaborator implementations for tests and development.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use storepulse_analytics::{
    AnalyticsTransport, Area, EmulationError, IdentityRecord, IdentityStore, IdentityStoreError,
    PurchasePayload, ScopeEmulation, StoreConfig, TransportError,
};
use storepulse_core::{CorrelationId, OrderId, QuoteId, StoreId};

/// One captured-identity row, keyed by whichever of the two ids the
/// capturing collaborator knew at write time.
#[derive(Debug, Clone)]
pub struct StoredIdentity {
    pub quote_id: Option<QuoteId>,
    pub order_id: Option<OrderId>,
    pub record: IdentityRecord,
}

/// Identity store backed by a vector of rows; lookups match the
/// correlation id against either key column, like the production table's
/// `quote_id OR order_id` filter.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    rows: Mutex<Vec<StoredIdentity>>,
    queries: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, row: StoredIdentity) {
        self.rows.lock().unwrap().push(row);
    }

    /// Number of lookups performed, for asserting that suppressed
    /// invocations never touch the store.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Make subsequent lookups fail, simulating a store outage.
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn find(
        &self,
        correlation: CorrelationId,
    ) -> Result<Option<IdentityRecord>, IdentityStoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IdentityStoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }

        let rows = self.rows.lock().unwrap();
        let hit = rows.iter().find(|row| {
            row.quote_id.map(u64::from) == Some(correlation.value())
                || row.order_id.map(u64::from) == Some(correlation.value())
        });
        Ok(hit.map(|row| row.record.clone()))
    }
}

/// Store configuration held in a map of (store, key) → value.
#[derive(Debug, Default)]
pub struct InMemoryStoreConfig {
    values: Mutex<HashMap<(StoreId, String), String>>,
}

impl InMemoryStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, store: StoreId, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert((store, key.to_string()), value.to_string());
    }

    pub fn enable(&self, store: StoreId, key: &str) {
        self.set(store, key, "1");
    }
}

impl StoreConfig for InMemoryStoreConfig {
    fn value(&self, key: &str, store: StoreId) -> Option<String> {
        self.values
            .lock()
            .unwrap()
            .get(&(store, key.to_string()))
            .cloned()
    }

    fn is_flag_set(&self, key: &str, store: StoreId) -> bool {
        matches!(self.value(key, store).as_deref(), Some("1") | Some("true"))
    }
}

/// Emulation stub that counts enter/exit calls, for asserting the
/// exactly-one-release property.
#[derive(Debug, Default)]
pub struct CountingEmulation {
    entered: AtomicUsize,
    exited: AtomicUsize,
    fail_enter: AtomicBool,
}

impl CountingEmulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    pub fn exited(&self) -> usize {
        self.exited.load(Ordering::SeqCst)
    }

    pub fn set_fail_enter(&self, fail: bool) {
        self.fail_enter.store(fail, Ordering::SeqCst);
    }
}

impl ScopeEmulation for CountingEmulation {
    fn enter(&self, store: StoreId, _area: Area) -> Result<(), EmulationError> {
        if self.fail_enter.load(Ordering::SeqCst) {
            return Err(EmulationError::Enter {
                store,
                reason: "emulation configured to fail".to_string(),
            });
        }
        self.entered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exit(&self) {
        self.exited.fetch_add(1, Ordering::SeqCst);
    }
}

/// Transport that records every payload instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<PurchasePayload>>,
    fail_with: Mutex<Option<TransportError>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<PurchasePayload> {
        self.sent.lock().unwrap().clone()
    }

    /// Make the next and all following sends fail with `error`.
    pub fn fail_with(&self, error: TransportError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }
}

impl AnalyticsTransport for RecordingTransport {
    fn send(&self, payload: &PurchasePayload) -> Result<(), TransportError> {
        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(error);
        }
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
