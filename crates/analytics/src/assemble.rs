//! Transaction assembly: order + invoice + identity → canonical payload.

use chrono::Utc;

use storepulse_commerce::{InvoiceContext, OrderContext};

use crate::config::TaxDisplay;
use crate::identity::IdentityRecord;
use crate::records::TransactionRecord;

/// Build the canonical transaction record for one purchase event.
///
/// Shipping reuses the line-item tax-display policy and null-coalesces to
/// zero for invoices without a shipping component. The timestamp is
/// captured here, at assembly, because the backend keys ingestion off send
/// time rather than transaction time.
pub fn assemble(
    order: &OrderContext,
    invoice: &InvoiceContext,
    identity: &IdentityRecord,
    tax_display: TaxDisplay,
) -> TransactionRecord {
    TransactionRecord {
        transaction_id: order.increment_id.clone(),
        affiliation: order.store_name.clone(),
        currency: invoice.currency.clone(),
        revenue: invoice.base_grand_total,
        tax: invoice.base_tax_amount,
        shipping: tax_display.paid_shipping(invoice).unwrap_or(0.0),
        coupon_code: order.coupon_code.clone(),
        session_id: identity.session_id.clone(),
        timestamp_micros: Utc::now().timestamp_micros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storepulse_core::{OrderId, StoreId};

    fn order() -> OrderContext {
        OrderContext {
            order_id: Some(OrderId::new(1001)),
            quote_id: None,
            store_id: StoreId::new(1),
            remote_ip: Some("198.51.100.4".to_string()),
            coupon_code: Some("SPRING".to_string()),
            store_name: "Default Store".to_string(),
            increment_id: "100000044".to_string(),
        }
    }

    fn invoice(shipping: Option<f64>, shipping_incl: Option<f64>) -> InvoiceContext {
        InvoiceContext {
            currency: "EUR".to_string(),
            base_grand_total: 121.0,
            base_tax_amount: 21.0,
            base_shipping_amount: shipping,
            base_shipping_incl_tax: shipping_incl,
            lines: Vec::new(),
        }
    }

    fn identity() -> IdentityRecord {
        IdentityRecord {
            client_id: "C1".to_string(),
            session_id: "S1".to_string(),
        }
    }

    #[test]
    fn transaction_fields_come_from_order_invoice_and_identity() {
        let tx = assemble(
            &order(),
            &invoice(Some(5.0), Some(6.05)),
            &identity(),
            TaxDisplay::IncludingTax,
        );

        assert_eq!(tx.transaction_id, "100000044");
        assert_eq!(tx.affiliation, "Default Store");
        assert_eq!(tx.currency, "EUR");
        assert_eq!(tx.revenue, 121.0);
        assert_eq!(tx.tax, 21.0);
        assert_eq!(tx.shipping, 6.05);
        assert_eq!(tx.coupon_code.as_deref(), Some("SPRING"));
        assert_eq!(tx.session_id, "S1");
    }

    #[test]
    fn shipping_uses_the_policy_and_defaults_to_zero() {
        let excl = assemble(
            &order(),
            &invoice(Some(5.0), Some(6.05)),
            &identity(),
            TaxDisplay::ExcludingTax,
        );
        assert_eq!(excl.shipping, 5.0);

        let absent = assemble(
            &order(),
            &invoice(None, None),
            &identity(),
            TaxDisplay::ExcludingTax,
        );
        assert_eq!(absent.shipping, 0.0);
    }

    #[test]
    fn timestamp_is_send_time_in_micros() {
        let before = Utc::now().timestamp_micros();
        let tx = assemble(
            &order(),
            &invoice(None, None),
            &identity(),
            TaxDisplay::IncludingTax,
        );
        let after = Utc::now().timestamp_micros();

        assert!(tx.timestamp_micros >= before);
        assert!(tx.timestamp_micros <= after);
    }
}
