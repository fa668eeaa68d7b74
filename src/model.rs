//! Common schema shared by both sources after normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifies one fact row: what day, which store, which product.
///
/// Ordered by date, then store, then product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BusinessKey {
    pub target_date: NaiveDate,
    pub number_store: i64,
    pub number_product: i64,
}

impl BusinessKey {
    pub fn new(target_date: NaiveDate, number_store: i64, number_product: i64) -> Self {
        Self {
            target_date,
            number_store,
            number_product,
        }
    }
}

/// Sales and returns for one key, from the latest extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesFact {
    #[serde(flatten)]
    pub key: BusinessKey,
    pub sales_qty: f64,
    pub return_qty: f64,
    pub extraction_date: NaiveDate,
}

/// Delivered quantity for one key, summed over the lines of its latest extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryFact {
    #[serde(flatten)]
    pub key: BusinessKey,
    pub delivery_qty: f64,
    pub extraction_date: NaiveDate,
}

/// Product master data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDim {
    pub number_product: i64,
    pub product_name: String,
    /// Always `None` for nested-document products; their prices arrive in
    /// [`NormalizedTables::prices`].
    pub price: Option<f64>,
    pub moq: i64,
}

/// A product's sale price from a separate price list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductPrice {
    pub number_product: i64,
    pub price: f64,
}

/// Store master data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreDim {
    pub number_store: i64,
    pub store_name: String,
    /// `None` when a component of the address was missing.
    pub store_address: Option<String>,
}

/// Maps a source product number to its global surrogate id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMapping {
    pub number_product: i64,
    pub id_product: i64,
}

/// Maps a source store number to its global surrogate id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMapping {
    pub number_store: i64,
    pub id_store: i64,
}

/// Output of a source normalizer: facts and dimensions in the common schema.
///
/// Each table is unique on its business key. `prices` is empty for sources
/// that carry the price on the product record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedTables {
    pub sales: Vec<SalesFact>,
    pub deliveries: Vec<DeliveryFact>,
    pub products: Vec<ProductDim>,
    pub stores: Vec<StoreDim>,
    pub prices: Vec<ProductPrice>,
}

/// One row of the joined fact table.
///
/// Quantities are always present (zero when one fact side was missing);
/// identifiers and dimension attributes are `None` when no match was found.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRecord {
    pub target_date: NaiveDate,
    pub number_store: i64,
    pub number_product: i64,
    pub sales_qty: f64,
    pub return_qty: f64,
    pub delivery_qty: f64,
    pub stockout: bool,
    pub id_product: Option<i64>,
    pub id_store: Option<i64>,
    pub product_name: Option<String>,
    pub price: Option<f64>,
    pub moq: Option<i64>,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
}

impl UnifiedRecord {
    /// Record for `key` from an optional sale and an optional delivery.
    ///
    /// Missing quantities become `0.0`; ids, dimensions and the stockout flag
    /// are filled by later join steps.
    pub fn from_facts(key: BusinessKey, sale: Option<&SalesFact>, delivery: Option<&DeliveryFact>) -> Self {
        Self {
            target_date: key.target_date,
            number_store: key.number_store,
            number_product: key.number_product,
            sales_qty: sale.map_or(0.0, |s| s.sales_qty),
            return_qty: sale.map_or(0.0, |s| s.return_qty),
            delivery_qty: delivery.map_or(0.0, |d| d.delivery_qty),
            stockout: false,
            id_product: None,
            id_store: None,
            product_name: None,
            price: None,
            moq: None,
            store_name: None,
            store_address: None,
        }
    }

    pub fn key(&self) -> BusinessKey {
        BusinessKey::new(self.target_date, self.number_store, self.number_product)
    }
}
