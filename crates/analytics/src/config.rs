//! Store-configuration port and the tax-display price policy.

use storepulse_core::StoreId;
use storepulse_commerce::InvoiceContext;

/// Flag: server-side purchase events are enabled for the store scope.
pub const PURCHASE_EVENT_ENABLED: &str = "analytics/serverside/enabled";

/// Flag: diagnostic logging of resolved client ids.
pub const REQUEST_LOGGING_ENABLED: &str = "analytics/serverside/logging";

/// Value: how the storefront displays prices with respect to tax.
pub const TAX_DISPLAY_TYPE: &str = "tax/display/type";

/// Read access to the host platform's per-store configuration.
///
/// Reads are expected to resolve against the store scope that the caller
/// entered via [`crate::emulation::ScopeEmulation`].
pub trait StoreConfig: Send + Sync {
    fn value(&self, key: &str, store: StoreId) -> Option<String>;

    fn is_flag_set(&self, key: &str, store: StoreId) -> bool;
}

impl<C> StoreConfig for std::sync::Arc<C>
where
    C: StoreConfig + ?Sized,
{
    fn value(&self, key: &str, store: StoreId) -> Option<String> {
        (**self).value(key, store)
    }

    fn is_flag_set(&self, key: &str, store: StoreId) -> bool {
        (**self).is_flag_set(key, store)
    }
}

/// Price policy derived from the store's tax-display configuration.
///
/// The same policy decides both the reported unit price of every line item
/// and the reported shipping cost; the two must never diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxDisplay {
    /// The storefront shows net prices; report the base price.
    ExcludingTax,
    /// Anything else (including an unset key); report the tax-inclusive price.
    IncludingTax,
}

impl TaxDisplay {
    /// Parse the raw config value. The host platform stores the
    /// excluding-tax display mode as `"1"`; the symbolic form is accepted
    /// for hand-written fixtures.
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            Some("1") | Some("excluding_tax") => TaxDisplay::ExcludingTax,
            _ => TaxDisplay::IncludingTax,
        }
    }

    /// The unit price the buyer actually saw in their cart.
    pub fn paid_price(&self, base_price: f64, base_price_incl_tax: f64) -> f64 {
        match self {
            TaxDisplay::ExcludingTax => base_price,
            TaxDisplay::IncludingTax => base_price_incl_tax,
        }
    }

    /// Shipping cost under the same policy; `None` when the invoice has no
    /// shipping component.
    pub fn paid_shipping(&self, invoice: &InvoiceContext) -> Option<f64> {
        match self {
            TaxDisplay::ExcludingTax => invoice.base_shipping_amount,
            TaxDisplay::IncludingTax => invoice.base_shipping_incl_tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(shipping: Option<f64>, shipping_incl: Option<f64>) -> InvoiceContext {
        InvoiceContext {
            currency: "EUR".to_string(),
            base_grand_total: 100.0,
            base_tax_amount: 8.0,
            base_shipping_amount: shipping,
            base_shipping_incl_tax: shipping_incl,
            lines: Vec::new(),
        }
    }

    #[test]
    fn excluding_tax_uses_base_price() {
        let policy = TaxDisplay::from_config(Some("1"));
        assert_eq!(policy, TaxDisplay::ExcludingTax);
        assert_eq!(policy.paid_price(9.99, 12.09), 9.99);
    }

    #[test]
    fn any_other_value_uses_inclusive_price() {
        for raw in [None, Some("2"), Some("3"), Some("including_tax")] {
            let policy = TaxDisplay::from_config(raw);
            assert_eq!(policy, TaxDisplay::IncludingTax);
            assert_eq!(policy.paid_price(9.99, 12.09), 12.09);
        }
    }

    #[test]
    fn shipping_follows_the_same_policy() {
        let inv = invoice(Some(5.0), Some(6.05));
        assert_eq!(TaxDisplay::ExcludingTax.paid_shipping(&inv), Some(5.0));
        assert_eq!(TaxDisplay::IncludingTax.paid_shipping(&inv), Some(6.05));
    }

    #[test]
    fn absent_shipping_is_none_not_zero() {
        let inv = invoice(None, None);
        assert_eq!(TaxDisplay::ExcludingTax.paid_shipping(&inv), None);
    }
}
