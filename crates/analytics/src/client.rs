//! Delivery client: a stateful per-event session over an analytics
//! transport.
//!
//! One purchase event is one strict call sequence:
//! `set_transaction_data` → `add_products` → `set_tracking_data` →
//! `fire_purchase_event`. The session accumulates the records, validates
//! them on the way in, and only `fire_purchase_event` touches the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::records::{ProductRecord, TrackingRecord, TransactionRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("analytics backend rejected payload: status {0}")]
    Rejected(u16),

    #[error("payload serialization failed: {0}")]
    Serialize(String),
}

/// Opaque remote analytics endpoint. The wire format beyond
/// [`PurchasePayload`] is the implementation's concern.
pub trait AnalyticsTransport: Send + Sync {
    fn send(&self, payload: &PurchasePayload) -> Result<(), TransportError>;
}

impl<T> AnalyticsTransport for std::sync::Arc<T>
where
    T: AnalyticsTransport + ?Sized,
{
    fn send(&self, payload: &PurchasePayload) -> Result<(), TransportError> {
        (**self).send(payload)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("invalid transaction record: {0}")]
    InvalidTransaction(String),

    #[error("invalid product record: {0}")]
    InvalidProduct(String),

    #[error("invalid tracking record: {0}")]
    InvalidTracking(String),

    #[error("purchase event fired without {0}")]
    Incomplete(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Measurement-protocol-shaped wire payload for one purchase event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasePayload {
    pub client_id: String,
    pub timestamp_micros: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_override: Option<String>,
    pub events: Vec<PayloadEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadEvent {
    pub name: String,
    pub params: PurchaseParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseParams {
    pub transaction_id: String,
    pub affiliation: String,
    pub currency: String,
    pub value: f64,
    pub tax: f64,
    pub shipping: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    pub session_id: String,
    pub document_path: String,
    pub items: Vec<PayloadItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub item_id: String,
    pub item_name: String,
    pub price: f64,
    pub quantity: f64,
    pub index: u64,
}

/// Per-event delivery session.
///
/// Owns no connection state itself; the transport is shared and the session
/// is built fresh for every invocation, so nothing leaks across purchase
/// events.
#[derive(Debug)]
pub struct DeliveryClient<'a, T: AnalyticsTransport + ?Sized> {
    transport: &'a T,
    transaction: Option<TransactionRecord>,
    products: Vec<ProductRecord>,
    tracking: Option<TrackingRecord>,
}

impl<'a, T: AnalyticsTransport + ?Sized> DeliveryClient<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            transaction: None,
            products: Vec::new(),
            tracking: None,
        }
    }

    pub fn set_transaction_data(
        &mut self,
        transaction: TransactionRecord,
    ) -> Result<(), DeliveryError> {
        if transaction.transaction_id.is_empty() {
            return Err(DeliveryError::InvalidTransaction(
                "missing transaction id".to_string(),
            ));
        }
        self.transaction = Some(transaction);
        Ok(())
    }

    pub fn add_products(
        &mut self,
        products: impl IntoIterator<Item = ProductRecord>,
    ) -> Result<(), DeliveryError> {
        for product in products {
            if product.sku.is_empty() {
                return Err(DeliveryError::InvalidProduct(format!(
                    "missing sku on product '{}'",
                    product.name
                )));
            }
            self.products.push(product);
        }
        Ok(())
    }

    pub fn set_tracking_data(&mut self, tracking: TrackingRecord) -> Result<(), DeliveryError> {
        if tracking.client_id.is_empty() {
            return Err(DeliveryError::InvalidTracking(
                "missing client id".to_string(),
            ));
        }
        self.tracking = Some(tracking);
        Ok(())
    }

    /// Build the payload from everything the session accumulated and send
    /// it through the transport. Consumes the accumulated state on success
    /// and failure alike; the session is single-shot.
    pub fn fire_purchase_event(&mut self) -> Result<(), DeliveryError> {
        let transaction = self
            .transaction
            .take()
            .ok_or(DeliveryError::Incomplete("transaction data"))?;
        let tracking = self
            .tracking
            .take()
            .ok_or(DeliveryError::Incomplete("tracking data"))?;
        if self.products.is_empty() {
            return Err(DeliveryError::Incomplete("products"));
        }

        let items = self
            .products
            .drain(..)
            .map(|p| PayloadItem {
                item_id: p.sku,
                item_name: p.name,
                price: p.price,
                quantity: p.quantity,
                index: p.position,
            })
            .collect();

        let payload = PurchasePayload {
            client_id: tracking.client_id,
            timestamp_micros: transaction.timestamp_micros,
            ip_override: tracking.ip_override,
            events: vec![PayloadEvent {
                name: "purchase".to_string(),
                params: PurchaseParams {
                    transaction_id: transaction.transaction_id,
                    affiliation: transaction.affiliation,
                    currency: transaction.currency,
                    value: transaction.revenue,
                    tax: transaction.tax,
                    shipping: transaction.shipping,
                    coupon: transaction.coupon_code,
                    session_id: transaction.session_id,
                    document_path: tracking.document_path,
                    items,
                },
            }],
        };

        self.transport.send(&payload)?;
        Ok(())
    }
}
