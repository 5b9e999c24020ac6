//! Line-item normalization: invoice lines → canonical product records.

use storepulse_commerce::InvoiceLine;

use crate::config::TaxDisplay;
use crate::records::ProductRecord;

/// Normalize invoice lines into product records, lazily and in invoice
/// order.
///
/// Excluded: lines flagged deleted, and constituents of composite parents
/// (the parent's own top-level line represents the bundle). Each record is
/// yielded with its originating line so the product extension hook can see
/// both.
pub fn normalize(
    lines: &[InvoiceLine],
    tax_display: TaxDisplay,
) -> impl Iterator<Item = (ProductRecord, &InvoiceLine)> {
    lines
        .iter()
        .filter(|line| !line.deleted && !line.is_composite_child())
        .map(move |line| {
            let record = ProductRecord {
                sku: line.sku.clone(),
                name: line.name.clone(),
                price: tax_display.paid_price(line.base_price, line.base_price_incl_tax),
                quantity: line.qty_ordered,
                position: line.id.value(),
            };
            (record, line)
        })
}
