// tests/properties.rs
use proptest::prelude::*;
use retail_etl::testing::{mappings, ymd};
use retail_etl::transform::*;
use retail_etl::{
    BusinessKey, DeliveryFact, NormalizedTables, SalesFact, join_all,
};
use std::collections::BTreeSet;

fn raw_value() -> impl Strategy<Value = RawValue> {
    prop_oneof![
        any::<f64>().prop_map(RawValue::from),
        "\\PC{0,8}".prop_map(RawValue::from),
        Just(RawValue::Missing),
        Just(RawValue::from("")),
    ]
}

/// (key, extraction day offset)
fn keyed_rows() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..8, 0u8..5), 0..40)
}

fn key(store: i64, product: i64) -> BusinessKey {
    BusinessKey::new(ymd(2024, 1, 1), store, product)
}

proptest! {
    #[test]
    fn coerce_preserves_length(values in prop::collection::vec(raw_value(), 0..30)) {
        let out = coerce_all(&values, 0.0);
        prop_assert_eq!(out.len(), values.len());
        prop_assert!(out.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn dedupe_yields_one_row_per_key_with_max_date(rows in keyed_rows()) {
        let kept = dedupe_latest(rows.clone(), |r| r.0, |r| r.1);
        let keys: BTreeSet<u8> = rows.iter().map(|r| r.0).collect();
        prop_assert_eq!(kept.len(), keys.len());
        for (k, d) in &kept {
            let max = rows.iter().filter(|r| r.0 == *k).map(|r| r.1).max();
            prop_assert_eq!(Some(*d), max);
        }
        prop_assert_eq!(dedupe_latest(kept.clone(), |r| r.0, |r| r.1), kept);
    }

    #[test]
    fn aggregate_conserves_total(rows in prop::collection::vec((0u8..6, -1000i32..1000), 0..40)) {
        let total: f64 = rows.iter().map(|r| f64::from(r.1)).sum();
        let out = aggregate_sum(rows.clone(), |r| r.0, |r| f64::from(r.1));
        let distinct: BTreeSet<u8> = rows.iter().map(|r| r.0).collect();
        prop_assert_eq!(out.len(), distinct.len());
        let summed: f64 = out.iter().map(|(_, q)| q).sum();
        prop_assert_eq!(summed, total);
    }

    #[test]
    fn split_reconstructs_net(net in -1.0e9f64..1.0e9) {
        let s = split_returns(net);
        prop_assert!(s.sales_qty >= 0.0 && s.return_qty >= 0.0);
        prop_assert_eq!(s.sales_qty - s.return_qty, net);
        prop_assert!(s.sales_qty == 0.0 || s.return_qty == 0.0);
    }

    #[test]
    fn stockout_matches_comparison(s in 0.0f64..1e6, d in 0.0f64..1e6) {
        prop_assert_eq!(is_stockout(s, d), s > d);
    }

    #[test]
    fn join_covers_union_of_fact_keys(
        sales in prop::collection::btree_set((0i64..5, 0i64..5), 0..10),
        deliveries in prop::collection::btree_set((0i64..5, 0i64..5), 0..10),
    ) {
        let d = ymd(2024, 1, 2);
        let tables = NormalizedTables {
            sales: sales.iter().map(|&(s, p)| SalesFact {
                key: key(s, p), sales_qty: 1.0, return_qty: 0.0, extraction_date: d,
            }).collect(),
            deliveries: deliveries.iter().map(|&(s, p)| DeliveryFact {
                key: key(s, p), delivery_qty: 2.0, extraction_date: d,
            }).collect(),
            ..NormalizedTables::default()
        };
        let m = mappings(&[], &[]);
        let joined = join_all(&tables, &m.products, &m.stores);

        let expected: BTreeSet<(i64, i64)> = sales.union(&deliveries).copied().collect();
        let got: Vec<(i64, i64)> = joined.iter().map(|r| (r.number_store, r.number_product)).collect();
        prop_assert_eq!(got, expected.into_iter().collect::<Vec<_>>());
        for r in &joined {
            prop_assert_eq!(r.stockout, r.sales_qty > r.delivery_qty);
        }
    }
}
