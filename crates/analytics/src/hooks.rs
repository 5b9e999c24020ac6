//! Extension hook bus: the pass-through extensibility seam.
//!
//! External integrations can mutate the assembled records before the
//! pipeline hands them to the delivery client. The bus is a plain ordered
//! registry: handlers run synchronously, in registration order, and the
//! first failure stops dispatch and propagates unchanged to the
//! orchestrator (which isolates it). The core never knows which handlers
//! exist.

use thiserror::Error;

use storepulse_commerce::InvoiceLine;

use crate::records::{ProductRecord, TrackingRecord, TransactionRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("hook failed: {0}")]
pub struct HookError(String);

impl HookError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

pub type HookResult = Result<(), HookError>;

/// One registered extension. Every method defaults to a no-op so a handler
/// only overrides the extension points it cares about.
pub trait PurchaseHook: Send + Sync {
    /// Runs once per normalized line item, with the originating invoice
    /// line alongside the mutable record.
    fn on_product(&self, _product: &mut ProductRecord, _line: &InvoiceLine) -> HookResult {
        Ok(())
    }

    /// Runs once per invocation on the assembled transaction.
    fn on_transaction(&self, _transaction: &mut TransactionRecord) -> HookResult {
        Ok(())
    }

    /// Runs once per invocation on the tracking record, inside the
    /// tracking/fire failure domain.
    fn on_tracking(&self, _tracking: &mut TrackingRecord) -> HookResult {
        Ok(())
    }
}

/// Ordered registry of [`PurchaseHook`] handlers.
#[derive(Default)]
pub struct HookBus {
    handlers: Vec<Box<dyn PurchaseHook>>,
}

impl HookBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn PurchaseHook>) {
        self.handlers.push(handler);
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn product(&self, product: &mut ProductRecord, line: &InvoiceLine) -> HookResult {
        for handler in &self.handlers {
            handler.on_product(product, line)?;
        }
        Ok(())
    }

    pub fn transaction(&self, transaction: &mut TransactionRecord) -> HookResult {
        for handler in &self.handlers {
            handler.on_transaction(transaction)?;
        }
        Ok(())
    }

    pub fn tracking(&self, tracking: &mut TrackingRecord) -> HookResult {
        for handler in &self.handlers {
            handler.on_tracking(tracking)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for HookBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HookBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Suffix(&'static str);

    impl PurchaseHook for Suffix {
        fn on_transaction(&self, transaction: &mut TransactionRecord) -> HookResult {
            transaction.affiliation.push_str(self.0);
            Ok(())
        }
    }

    struct Failing;

    impl PurchaseHook for Failing {
        fn on_transaction(&self, _transaction: &mut TransactionRecord) -> HookResult {
            Err(HookError::new("handler rejected transaction"))
        }
    }

    fn transaction() -> TransactionRecord {
        TransactionRecord {
            transaction_id: "100000001".to_string(),
            affiliation: "store".to_string(),
            currency: "EUR".to_string(),
            revenue: 1.0,
            tax: 0.0,
            shipping: 0.0,
            coupon_code: None,
            session_id: "S1".to_string(),
            timestamp_micros: 0,
        }
    }

    #[test]
    fn empty_bus_is_a_no_op() {
        let bus = HookBus::new();
        let mut tx = transaction();
        bus.transaction(&mut tx).unwrap();
        assert_eq!(tx.affiliation, "store");
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let mut bus = HookBus::new();
        bus.register(Box::new(Suffix("-a")));
        bus.register(Box::new(Suffix("-b")));

        let mut tx = transaction();
        bus.transaction(&mut tx).unwrap();
        assert_eq!(tx.affiliation, "store-a-b");
    }

    #[test]
    fn first_failure_stops_dispatch() {
        let mut bus = HookBus::new();
        bus.register(Box::new(Suffix("-a")));
        bus.register(Box::new(Failing));
        bus.register(Box::new(Suffix("-never")));

        let mut tx = transaction();
        let err = bus.transaction(&mut tx).unwrap_err();
        assert!(err.to_string().contains("rejected"));
        // First handler ran, third never did.
        assert_eq!(tx.affiliation, "store-a");
    }
}
