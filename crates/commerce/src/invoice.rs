use serde::{Deserialize, Serialize};

use storepulse_core::LineItemId;

/// One invoice line, flattened with the fields of its linked order item
/// (quantity, parent linkage and base prices live on the order item in the
/// host platform).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: LineItemId,
    pub sku: String,
    pub name: String,
    /// Marked deleted in the platform's item collection; still present in
    /// the sequence but must never be reported.
    pub deleted: bool,
    /// Set when this line is a constituent of a composite/bundled product.
    /// The composite parent carries its own top-level line.
    pub parent_item_id: Option<LineItemId>,
    pub qty_ordered: f64,
    /// Unit price excluding tax, in order base currency.
    pub base_price: f64,
    /// Unit price including tax, in order base currency.
    pub base_price_incl_tax: f64,
}

impl InvoiceLine {
    /// Lines that represent a composite parent's constituents are reported
    /// through the parent, never on their own.
    pub fn is_composite_child(&self) -> bool {
        self.parent_item_id.is_some()
    }
}

/// Immutable view of the invoice being captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceContext {
    /// ISO currency code of the order's global currency.
    pub currency: String,
    /// Grand total including tax, in base currency.
    pub base_grand_total: f64,
    pub base_tax_amount: f64,
    /// Shipping excluding tax; absent for invoices without a shipping
    /// component.
    pub base_shipping_amount: Option<f64>,
    /// Shipping including tax; absent for invoices without a shipping
    /// component.
    pub base_shipping_incl_tax: Option<f64>,
    /// Lines in invoice order.
    pub lines: Vec<InvoiceLine>,
}
