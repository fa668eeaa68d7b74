//! Cosmos: tabular (CSV) extracts.
//!
//! Each raw row type carries the fixed source-to-canonical column renaming in
//! its serde attributes, so CSV content deserializes straight into it (see
//! [`read_csv_rows`](crate::io::csv::read_csv_rows)).
//!
//! | Raw table  | Columns                                              |
//! |------------|------------------------------------------------------|
//! | sales      | `Datum`, `Kunde`, `Artikel`, `VK-Menge`              |
//! | deliveries | `Datum`, `Kunde_Nummer`, `ArtNr`, `LI-Menge`         |
//! | products   | `ArtNr`, `Bezeichnung`, `Preis`, `Mindestbestellmenge` |
//! | stores     | `Nummer`, `Straße`, `PLZ`, `Ort`                     |
//!
//! Fact batches are labelled `<name>_<yyyy>_<mm>_<dd>.csv`, master data
//! batches `<name>_<yyyy>_<mm>_<dd>_<anything>.csv` (see [`EtlConfig`]).

use crate::batch::Batches;
use crate::config::EtlConfig;
use crate::error::Result;
use crate::model::{BusinessKey, DeliveryFact, NormalizedTables, ProductDim, SalesFact, StoreDim};
use crate::source::{parse_target_date, stage_batches};
use crate::transform::{
    RawValue, aggregate_sum, coerce_count, coerce_numeric, dedupe_latest, latest_snapshot, split_all,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

#[cfg(feature = "io-csv")]
pub use crate::io::csv::read_csv_rows;

/// Raw sales line. `VK-Menge` is a signed net quantity; negative means returns.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SalesRow {
    #[serde(rename = "Datum")]
    pub target_date: String,
    #[serde(rename = "Kunde")]
    pub number_store: i64,
    #[serde(rename = "Artikel")]
    pub number_product: i64,
    #[serde(rename = "VK-Menge")]
    pub raw_quantity: RawValue,
}

/// Raw delivery line. One logical delivery may be split over several lines.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DeliveryRow {
    #[serde(rename = "Datum")]
    pub target_date: String,
    #[serde(rename = "Kunde_Nummer")]
    pub number_store: i64,
    #[serde(rename = "ArtNr")]
    pub number_product: i64,
    #[serde(rename = "LI-Menge")]
    pub delivery_qty: RawValue,
}

/// Raw product master row.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProductRow {
    #[serde(rename = "ArtNr")]
    pub number_product: i64,
    #[serde(rename = "Bezeichnung")]
    pub product_name: String,
    #[serde(rename = "Preis")]
    pub price: RawValue,
    #[serde(rename = "Mindestbestellmenge")]
    pub moq: RawValue,
}

/// Raw store master row.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StoreRow {
    #[serde(rename = "Nummer")]
    pub number_store: i64,
    #[serde(rename = "Straße")]
    pub store_name: String,
    #[serde(rename = "PLZ")]
    pub postal_code: RawValue,
    #[serde(rename = "Ort")]
    pub city: String,
}

/// All raw Cosmos inputs of one run.
#[derive(Debug, Default)]
pub struct CosmosBatches {
    pub sales: Batches<Vec<SalesRow>>,
    pub deliveries: Batches<Vec<DeliveryRow>>,
    pub products: Batches<Vec<ProductRow>>,
    pub stores: Batches<Vec<StoreRow>>,
}

struct Stamped<T> {
    row: T,
    extraction_date: NaiveDate,
}

struct StagedSale {
    key: BusinessKey,
    raw_quantity: RawValue,
    extraction_date: NaiveDate,
}

struct StagedDelivery {
    key: BusinessKey,
    delivery_qty: f64,
    extraction_date: NaiveDate,
}

/// Normalize every Cosmos table.
///
/// # Errors
/// Fails on the first batch with an invalid label, an unparseable target date
/// or a failing provider; the error names that batch.
pub fn normalize(batches: &CosmosBatches, config: &EtlConfig) -> Result<NormalizedTables> {
    Ok(NormalizedTables {
        sales: process_sales(&batches.sales, config)?,
        deliveries: process_deliveries(&batches.deliveries, config)?,
        products: process_products(&batches.products, config)?,
        stores: process_stores(&batches.stores, config)?,
        prices: Vec::new(),
    })
}

/// Sales: dedupe to the latest extraction per key, then split net quantity.
///
/// # Errors
/// See [`normalize`].
pub fn process_sales(batches: &Batches<Vec<SalesRow>>, config: &EtlConfig) -> Result<Vec<SalesFact>> {
    let staged = stage_batches(batches, |label, rows| {
        let extraction_date = config.cosmos_fact_label.extraction_date(label)?;
        rows.iter()
            .map(|r| {
                Ok(StagedSale {
                    key: BusinessKey::new(parse_target_date(&r.target_date)?, r.number_store, r.number_product),
                    raw_quantity: r.raw_quantity.clone(),
                    extraction_date,
                })
            })
            .collect()
    })?;
    let staged_len = staged.len();

    let latest = dedupe_latest(staged, |s| s.key, |s| s.extraction_date);
    let nets: Vec<f64> = latest
        .iter()
        .map(|s| coerce_numeric(&s.raw_quantity, config.numeric_default))
        .collect();
    let (sales, returns) = split_all(&nets);

    let facts: Vec<SalesFact> = latest
        .into_iter()
        .zip(sales.into_iter().zip(returns))
        .map(|(s, (sales_qty, return_qty))| SalesFact {
            key: s.key,
            sales_qty,
            return_qty,
            extraction_date: s.extraction_date,
        })
        .collect();
    debug!(staged = staged_len, kept = facts.len(), "cosmos sales normalized");
    Ok(facts)
}

/// Deliveries: keep each key's latest extraction, then sum its lines.
///
/// # Errors
/// See [`normalize`].
pub fn process_deliveries(
    batches: &Batches<Vec<DeliveryRow>>,
    config: &EtlConfig,
) -> Result<Vec<DeliveryFact>> {
    let staged = stage_batches(batches, |label, rows| {
        let extraction_date = config.cosmos_fact_label.extraction_date(label)?;
        rows.iter()
            .map(|r| {
                Ok(StagedDelivery {
                    key: BusinessKey::new(parse_target_date(&r.target_date)?, r.number_store, r.number_product),
                    delivery_qty: coerce_numeric(&r.delivery_qty, config.numeric_default),
                    extraction_date,
                })
            })
            .collect()
    })?;
    let staged_len = staged.len();

    let snapshot = latest_snapshot(staged, |d| d.key, |d| d.extraction_date);
    let facts: Vec<DeliveryFact> =
        aggregate_sum(snapshot, |d| (d.key, d.extraction_date), |d| d.delivery_qty)
            .into_iter()
            .map(|((key, extraction_date), delivery_qty)| DeliveryFact {
                key,
                delivery_qty,
                extraction_date,
            })
            .collect();
    debug!(staged = staged_len, kept = facts.len(), "cosmos deliveries normalized");
    Ok(facts)
}

/// Products: latest master record per product; blank price and moq become 0.
///
/// # Errors
/// See [`normalize`].
pub fn process_products(batches: &Batches<Vec<ProductRow>>, config: &EtlConfig) -> Result<Vec<ProductDim>> {
    let staged = stamp(batches, config)?;
    let products: Vec<ProductDim> = dedupe_latest(staged, |p| p.row.number_product, |p| p.extraction_date)
        .into_iter()
        .map(|Stamped { row, .. }| ProductDim {
            number_product: row.number_product,
            price: Some(coerce_numeric(&row.price, config.numeric_default)),
            moq: coerce_count(&row.moq, 0.0),
            product_name: row.product_name,
        })
        .collect();
    debug!(kept = products.len(), "cosmos products normalized");
    Ok(products)
}

/// Stores: latest master record per store; address is `name – plz – city`.
///
/// # Errors
/// See [`normalize`].
pub fn process_stores(batches: &Batches<Vec<StoreRow>>, config: &EtlConfig) -> Result<Vec<StoreDim>> {
    let staged = stamp(batches, config)?;
    let stores: Vec<StoreDim> = dedupe_latest(staged, |s| s.row.number_store, |s| s.extraction_date)
        .into_iter()
        .map(|Stamped { row, .. }| StoreDim {
            number_store: row.number_store,
            store_address: compose_address(&row, &config.address_separator),
            store_name: row.store_name,
        })
        .collect();
    debug!(kept = stores.len(), "cosmos stores normalized");
    Ok(stores)
}

fn stamp<T: Clone>(batches: &Batches<Vec<T>>, config: &EtlConfig) -> Result<Vec<Stamped<T>>> {
    stage_batches(batches, |label, rows| {
        let extraction_date = config.cosmos_master_label.extraction_date(label)?;
        Ok(rows
            .iter()
            .map(|row| Stamped {
                row: row.clone(),
                extraction_date,
            })
            .collect())
    })
}

fn compose_address(row: &StoreRow, sep: &str) -> Option<String> {
    let blank = match &row.postal_code {
        RawValue::Missing => true,
        RawValue::Text(s) => s.trim().is_empty(),
        RawValue::Number(n) => n.is_nan(),
    };
    if blank {
        return None;
    }
    Some([row.store_name.as_str(), &row.postal_code.to_string(), row.city.as_str()].join(sep))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(postal_code: RawValue) -> StoreRow {
        StoreRow {
            number_store: 7,
            store_name: "Hauptstraße 1".into(),
            postal_code,
            city: "Berlin".into(),
        }
    }

    #[test]
    fn address_joins_components() {
        assert_eq!(
            compose_address(&store(RawValue::from(10115.0)), " – ").as_deref(),
            Some("Hauptstraße 1 – 10115 – Berlin")
        );
        assert_eq!(
            compose_address(&store(RawValue::from("01067")), "/").as_deref(),
            Some("Hauptstraße 1/01067/Berlin")
        );
        assert_eq!(compose_address(&store(RawValue::Missing), " – "), None);
    }
}
