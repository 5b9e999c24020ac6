//! Purchase event orchestrator.
//!
//! Reacts to one invoice-creation signal: resolve identity, gate on
//! configuration, normalize lines, assemble the transaction, run hooks,
//! deliver. Every failure past identity resolution is isolated here so the
//! host's own order-processing transaction is never affected.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use storepulse_commerce::{InvoiceContext, OrderContext};

use crate::assemble::assemble;
use crate::client::{AnalyticsTransport, DeliveryClient};
use crate::config::{
    PURCHASE_EVENT_ENABLED, REQUEST_LOGGING_ENABLED, StoreConfig, TAX_DISPLAY_TYPE, TaxDisplay,
};
use crate::emulation::{Area, EmulationError, EmulationGuard, ScopeEmulation};
use crate::hooks::{HookBus, PurchaseHook};
use crate::identity::{self, IdentityStore, IdentityStoreError, Resolution};
use crate::normalize::normalize;
use crate::records::{ProductRecord, TrackingRecord, TransactionRecord};

/// Failures the host must see. Everything else is swallowed here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObserverError {
    #[error(transparent)]
    Identity(#[from] IdentityStoreError),

    #[error(transparent)]
    Emulation(#[from] EmulationError),
}

/// How the delivery phase of a completed invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    /// Phase 1 (transaction/product submission, including assembly-phase
    /// hooks) failed; tracking and fire were never attempted.
    SubmitFailed,
    /// Phase 2 (tracking hook, tracking data, fire) failed.
    SendFailed,
}

/// Terminal state of one invocation. Suppressions are silent and ordinary;
/// the distinction exists for the direct caller and for tests, not for any
/// external observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseEventOutcome {
    /// Neither order id nor quote id was available.
    SuppressedMissingId,
    /// The server-side analytics flag is off for the store scope.
    SuppressedDisabled,
    /// No complete identity record for the correlation id.
    SuppressedNoIdentity,
    Completed(DeliveryStatus),
}

/// Entry point for invoice-creation signals.
///
/// One instance is long-lived and shared with the host's event wiring; all
/// per-invocation state lives on the stack of [`Self::execute`], so
/// invocations for different orders are independent.
pub struct PurchaseEventObserver<C, E, S, T>
where
    C: StoreConfig,
    E: ScopeEmulation,
    S: IdentityStore,
    T: AnalyticsTransport,
{
    config: Arc<C>,
    emulation: Arc<E>,
    identity: Arc<S>,
    transport: Arc<T>,
    hooks: HookBus,
}

impl<C, E, S, T> PurchaseEventObserver<C, E, S, T>
where
    C: StoreConfig,
    E: ScopeEmulation,
    S: IdentityStore,
    T: AnalyticsTransport,
{
    pub fn new(config: Arc<C>, emulation: Arc<E>, identity: Arc<S>, transport: Arc<T>) -> Self {
        Self {
            config,
            emulation,
            identity,
            transport,
            hooks: HookBus::new(),
        }
    }

    /// Register an extension hook. Handlers run in registration order.
    pub fn register_hook(&mut self, hook: Box<dyn PurchaseHook>) {
        self.hooks.register(hook);
    }

    /// Handle one invoice-creation signal.
    ///
    /// Returns the terminal state; only identity-store unavailability and
    /// emulation-entry failures surface as errors. Delivery failures are
    /// logged at info level and reported through the outcome.
    pub fn execute(
        &self,
        order: &OrderContext,
        invoice: &InvoiceContext,
    ) -> Result<PurchaseEventOutcome, ObserverError> {
        let Some(correlation) = order.correlation_id() else {
            return Ok(PurchaseEventOutcome::SuppressedMissingId);
        };

        let span = tracing::info_span!(
            "purchase_event",
            invocation = %Uuid::now_v7(),
            order = %order.increment_id,
        );
        let _entered = span.enter();

        // Scope guard: configuration below resolves against the order's
        // store, and exit runs on every path out of this function.
        let _scope = EmulationGuard::enter(self.emulation.as_ref(), order.store_id, Area::Admin)?;

        if !self.config.is_flag_set(PURCHASE_EVENT_ENABLED, order.store_id) {
            return Ok(PurchaseEventOutcome::SuppressedDisabled);
        }

        let identity = match identity::resolve(self.identity.as_ref(), correlation)? {
            Resolution::Resolved(record) => record,
            Resolution::NotFound => return Ok(PurchaseEventOutcome::SuppressedNoIdentity),
        };

        if self.config.is_flag_set(REQUEST_LOGGING_ENABLED, order.store_id) {
            info!(client_id = %identity.client_id, "resolved analytics client for purchase event");
        }

        let tax_display = TaxDisplay::from_config(
            self.config.value(TAX_DISPLAY_TYPE, order.store_id).as_deref(),
        );

        let mut products = Vec::new();
        for (mut product, line) in normalize(&invoice.lines, tax_display) {
            if let Err(e) = self.hooks.product(&mut product, line) {
                info!(error = %e, sku = %line.sku, "product hook failed, purchase event dropped");
                return Ok(PurchaseEventOutcome::Completed(DeliveryStatus::SubmitFailed));
            }
            products.push(product);
        }

        let mut transaction = assemble(order, invoice, &identity, tax_display);
        if let Err(e) = self.hooks.transaction(&mut transaction) {
            info!(error = %e, "transaction hook failed, purchase event dropped");
            return Ok(PurchaseEventOutcome::Completed(DeliveryStatus::SubmitFailed));
        }

        let tracking = TrackingRecord::for_order(identity.client_id.clone(), order);

        let status = self.deliver(transaction, products, tracking);
        Ok(PurchaseEventOutcome::Completed(status))
    }

    /// Two failure domains: transaction/product submission, then
    /// tracking/fire. A phase-1 failure must never reach phase 2.
    fn deliver(
        &self,
        transaction: TransactionRecord,
        products: Vec<ProductRecord>,
        mut tracking: TrackingRecord,
    ) -> DeliveryStatus {
        let mut client = DeliveryClient::new(self.transport.as_ref());

        if let Err(e) = client.set_transaction_data(transaction) {
            info!(error = %e, "purchase event submission failed");
            return DeliveryStatus::SubmitFailed;
        }
        if let Err(e) = client.add_products(products) {
            info!(error = %e, "purchase event submission failed");
            return DeliveryStatus::SubmitFailed;
        }

        // The tracking hook belongs to the second failure domain, like the
        // rest of the tracking/fire sequence.
        if let Err(e) = self.hooks.tracking(&mut tracking) {
            info!(error = %e, "tracking hook failed");
            return DeliveryStatus::SendFailed;
        }
        if let Err(e) = client.set_tracking_data(tracking) {
            info!(error = %e, "purchase event send failed");
            return DeliveryStatus::SendFailed;
        }
        if let Err(e) = client.fire_purchase_event() {
            info!(error = %e, "purchase event send failed");
            return DeliveryStatus::SendFailed;
        }

        DeliveryStatus::Sent
    }
}

impl<C, E, S, T> core::fmt::Debug for PurchaseEventObserver<C, E, S, T>
where
    C: StoreConfig,
    E: ScopeEmulation,
    S: IdentityStore,
    T: AnalyticsTransport,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PurchaseEventObserver")
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
