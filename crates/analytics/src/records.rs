//! Canonical purchase-event records.
//!
//! Typed, per-invocation payload records. Each is constructed once, may be
//! mutated by extension hooks until handed to the delivery client, and is
//! never persisted.

use serde::{Deserialize, Serialize};

use storepulse_commerce::OrderContext;

/// Logical document path reported for the conversion page.
pub const CONVERSION_DOCUMENT_PATH: &str = "/checkout/onepage/success/";

/// Canonical line item of the purchase event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub sku: String,
    pub name: String,
    /// Unit price adjusted by the store's tax-display policy.
    pub price: f64,
    pub quantity: f64,
    /// Stable ordinal derived from the source line-item id, so hooks and
    /// downstream consumers can correlate back to the platform item. Never
    /// a recomputed index.
    pub position: u64,
}

/// Canonical purchase transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Human-facing order number.
    pub transaction_id: String,
    /// Store display name.
    pub affiliation: String,
    pub currency: String,
    /// Tax-inclusive grand total.
    pub revenue: f64,
    pub tax: f64,
    /// Policy-adjusted shipping; zero when the invoice has no shipping
    /// component.
    pub shipping: f64,
    pub coupon_code: Option<String>,
    pub session_id: String,
    /// Send time in microseconds since epoch, captured at assembly. The
    /// analytics backend expects ingestion time, not order time.
    pub timestamp_micros: i64,
}

/// Attribution data for the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub client_id: String,
    /// Buyer IP forwarded so geo attribution matches what a browser-side
    /// hit would have carried.
    pub ip_override: Option<String>,
    pub document_path: String,
}

impl TrackingRecord {
    pub fn for_order(client_id: String, order: &OrderContext) -> Self {
        Self {
            client_id,
            ip_override: order.remote_ip.clone(),
            document_path: CONVERSION_DOCUMENT_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storepulse_core::{OrderId, StoreId};

    #[test]
    fn tracking_record_carries_ip_and_fixed_path() {
        let order = OrderContext {
            order_id: Some(OrderId::new(1)),
            quote_id: None,
            store_id: StoreId::new(1),
            remote_ip: Some("203.0.113.7".to_string()),
            coupon_code: None,
            store_name: "Default".to_string(),
            increment_id: "100000001".to_string(),
        };

        let tracking = TrackingRecord::for_order("C1".to_string(), &order);
        assert_eq!(tracking.client_id, "C1");
        assert_eq!(tracking.ip_override.as_deref(), Some("203.0.113.7"));
        assert_eq!(tracking.document_path, CONVERSION_DOCUMENT_PATH);
    }
}
