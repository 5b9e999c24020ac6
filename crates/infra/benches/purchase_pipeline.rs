use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use storepulse_analytics::{
    IdentityRecord, PURCHASE_EVENT_ENABLED, PurchaseEventObserver, TAX_DISPLAY_TYPE, TaxDisplay,
    assemble, normalize,
};
use storepulse_commerce::{InvoiceContext, InvoiceLine, OrderContext};
use storepulse_core::{LineItemId, OrderId, StoreId};
use storepulse_infra::{
    CountingEmulation, InMemoryIdentityStore, InMemoryStoreConfig, RecordingTransport,
    StoredIdentity,
};

fn order() -> OrderContext {
    OrderContext {
        order_id: Some(OrderId::new(1001)),
        quote_id: None,
        store_id: StoreId::new(1),
        remote_ip: Some("203.0.113.7".to_string()),
        coupon_code: None,
        store_name: "Default Store".to_string(),
        increment_id: "100000044".to_string(),
    }
}

fn invoice(lines: usize) -> InvoiceContext {
    let lines = (0..lines as u64)
        .map(|i| InvoiceLine {
            id: LineItemId::new(i + 1),
            sku: format!("SKU-{i}"),
            name: format!("Product {i}"),
            deleted: i % 7 == 0,
            parent_item_id: (i % 5 == 0).then(|| LineItemId::new(1)),
            qty_ordered: 1.0,
            base_price: 9.99,
            base_price_incl_tax: 12.09,
        })
        .collect();

    InvoiceContext {
        currency: "EUR".to_string(),
        base_grand_total: 121.0,
        base_tax_amount: 21.0,
        base_shipping_amount: Some(5.0),
        base_shipping_incl_tax: Some(6.05),
        lines,
    }
}

fn identity() -> IdentityRecord {
    IdentityRecord {
        client_id: "C1".to_string(),
        session_id: "S1".to_string(),
    }
}

fn bench_normalize_and_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_assemble");
    for lines in [1usize, 10, 100] {
        let inv = invoice(lines);
        let ord = order();
        let id = identity();
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| {
                let products: Vec<_> =
                    normalize(black_box(&inv.lines), TaxDisplay::ExcludingTax).collect();
                let tx = assemble(&ord, &inv, &id, TaxDisplay::ExcludingTax);
                black_box((products, tx))
            })
        });
    }
    group.finish();
}

fn bench_full_invocation(c: &mut Criterion) {
    let config = Arc::new(InMemoryStoreConfig::new());
    config.enable(StoreId::new(1), PURCHASE_EVENT_ENABLED);
    config.set(StoreId::new(1), TAX_DISPLAY_TYPE, "1");
    let identity_store = Arc::new(InMemoryIdentityStore::new());
    identity_store.insert(StoredIdentity {
        quote_id: None,
        order_id: Some(OrderId::new(1001)),
        record: identity(),
    });
    let observer = PurchaseEventObserver::new(
        config,
        Arc::new(CountingEmulation::new()),
        identity_store,
        Arc::new(RecordingTransport::new()),
    );

    let ord = order();
    let inv = invoice(10);
    c.bench_function("full_invocation_10_lines", |b| {
        b.iter(|| observer.execute(black_box(&ord), black_box(&inv)).unwrap())
    });
}

criterion_group!(benches, bench_normalize_and_assemble, bench_full_invocation);
criterion_main!(benches);
