use serde::{Deserialize, Serialize};

use storepulse_core::{CorrelationId, OrderId, QuoteId, StoreId};

/// Immutable view of the order that triggered the invoice capture.
///
/// Snapshotted from the platform's order object once per invocation and
/// never persisted by this workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderContext {
    /// Entity id of the finalized order, absent while the order row has not
    /// been written yet (the triggering signal can race order persistence).
    pub order_id: Option<OrderId>,
    /// Quote id the order originated from.
    pub quote_id: Option<QuoteId>,
    pub store_id: StoreId,
    /// Buyer's IP as seen by the platform, forwarded as the override for
    /// geo attribution.
    pub remote_ip: Option<String>,
    pub coupon_code: Option<String>,
    /// Store display name, reported as the transaction affiliation.
    pub store_name: String,
    /// Human-facing order number (e.g. "100000044").
    pub increment_id: String,
}

impl OrderContext {
    /// Correlation key for the identity lookup: the order id when present,
    /// otherwise the quote id. `None` means the invocation is suppressed
    /// before any collaborator is touched.
    pub fn correlation_id(&self) -> Option<CorrelationId> {
        self.order_id
            .map(CorrelationId::from)
            .or_else(|| self.quote_id.map(CorrelationId::from))
    }
}
