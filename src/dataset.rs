//! Downstream datasets projected from the unified fact table.
//!
//! Field order of both record types is the column order consumers expect;
//! serializers (e.g. [`write_csv_rows`](crate::io::csv::write_csv_rows)) emit
//! it verbatim.

use crate::model::UnifiedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Training row for demand forecasting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MlRecord {
    pub id_product: Option<i64>,
    pub id_store: Option<i64>,
    pub target_date: NaiveDate,
    pub sales_qty: f64,
    pub stockout: bool,
}

/// Row of the application-facing dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub id_product: Option<i64>,
    pub id_store: Option<i64>,
    pub target_date: NaiveDate,
    pub sales_qty: f64,
    pub return_qty: f64,
    pub delivery_qty: f64,
    pub stockout: bool,
    pub price: Option<f64>,
    pub product_name: Option<String>,
    pub number_product: i64,
    pub moq: Option<i64>,
    pub number_store: i64,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
}

impl From<&UnifiedRecord> for MlRecord {
    fn from(r: &UnifiedRecord) -> Self {
        Self {
            id_product: r.id_product,
            id_store: r.id_store,
            target_date: r.target_date,
            sales_qty: r.sales_qty,
            stockout: r.stockout,
        }
    }
}

impl From<&UnifiedRecord> for AppRecord {
    fn from(r: &UnifiedRecord) -> Self {
        Self {
            id_product: r.id_product,
            id_store: r.id_store,
            target_date: r.target_date,
            sales_qty: r.sales_qty,
            return_qty: r.return_qty,
            delivery_qty: r.delivery_qty,
            stockout: r.stockout,
            price: r.price,
            product_name: r.product_name.clone(),
            number_product: r.number_product,
            moq: r.moq,
            number_store: r.number_store,
            store_name: r.store_name.clone(),
            store_address: r.store_address.clone(),
        }
    }
}

/// One [`MlRecord`] per unified row, same order. No filtering.
pub fn project_ml(unified: &[UnifiedRecord]) -> Vec<MlRecord> {
    unified.iter().map(MlRecord::from).collect()
}

/// One [`AppRecord`] per unified row, same order. No filtering.
pub fn project_app(unified: &[UnifiedRecord]) -> Vec<AppRecord> {
    unified.iter().map(AppRecord::from).collect()
}
