//! Joins normalized facts with mappings and dimensions into one fact table.

use crate::model::{NormalizedTables, ProductMapping, StoreMapping, UnifiedRecord};
use crate::transform::is_stockout;
use crate::{Collection, from_vec};
use tracing::debug;

/// Build the unified fact table.
///
/// 1. Full outer join of sales and deliveries on the business key; a missing
///    side contributes zero quantities, so no fact is ever lost.
/// 2. Left join of the product and store mappings (surrogate ids).
/// 3. Left join of the product dimension, then of the price list (a listed
///    price overrides the product's own), then of the store dimension.
/// 4. Stockout flag.
///
/// Misses leave the corresponding fields `None`. A raw id mapped more than
/// once yields one record per mapping. Output is ordered by business key.
pub fn join_all(
    tables: &NormalizedTables,
    product_mapping: &[ProductMapping],
    store_mapping: &[StoreMapping],
) -> Vec<UnifiedRecord> {
    let sales = from_vec(tables.sales.clone()).key_by(|s| s.key);
    let deliveries = from_vec(tables.deliveries.clone()).key_by(|d| d.key);
    let facts: Collection<UnifiedRecord> = sales
        .join_full(deliveries)
        .map(|(key, (sale, delivery))| UnifiedRecord::from_facts(*key, sale.as_ref(), delivery.as_ref()));
    let fact_count = facts.len();

    let product_ids = from_vec(product_mapping.to_vec())
        .key_by(|m| m.number_product)
        .map_values(|m| m.id_product);
    let store_ids = from_vec(store_mapping.to_vec())
        .key_by(|m| m.number_store)
        .map_values(|m| m.id_store);
    let products = from_vec(tables.products.clone()).key_by(|p| p.number_product);
    let prices = from_vec(tables.prices.clone())
        .key_by(|p| p.number_product)
        .map_values(|p| p.price);
    let stores = from_vec(tables.stores.clone()).key_by(|s| s.number_store);

    let joined: Vec<UnifiedRecord> = facts
        .key_by(|r| r.number_product)
        .join_left(product_ids)
        .into_iter()
        .map(|(_, (mut r, id))| {
            r.id_product = id;
            r
        })
        .collect::<Collection<_>>()
        .key_by(|r| r.number_store)
        .join_left(store_ids)
        .into_iter()
        .map(|(_, (mut r, id))| {
            r.id_store = id;
            r
        })
        .collect::<Collection<_>>()
        .key_by(|r| r.number_product)
        .join_left(products)
        .into_iter()
        .map(|(_, (mut r, product))| {
            if let Some(p) = product {
                r.product_name = Some(p.product_name);
                r.price = p.price;
                r.moq = Some(p.moq);
            }
            r
        })
        .collect::<Collection<_>>()
        .key_by(|r| r.number_product)
        .join_left(prices)
        .into_iter()
        .map(|(_, (mut r, price))| {
            if price.is_some() {
                r.price = price;
            }
            r
        })
        .collect::<Collection<_>>()
        .key_by(|r| r.number_store)
        .join_left(stores)
        .into_iter()
        .map(|(_, (mut r, store))| {
            if let Some(s) = store {
                r.store_name = Some(s.store_name);
                r.store_address = s.store_address;
            }
            r.stockout = is_stockout(r.sales_qty, r.delivery_qty);
            r
        })
        .collect();

    debug!(
        facts = fact_count,
        rows = joined.len(),
        unmapped_products = joined.iter().filter(|r| r.id_product.is_none()).count(),
        unmapped_stores = joined.iter().filter(|r| r.id_store.is_none()).count(),
        "facts joined"
    );
    joined
}
