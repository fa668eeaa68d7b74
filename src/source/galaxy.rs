//! Galaxy: nested JSON documents.
//!
//! Four document kinds, each accepted as JSON text or as an already parsed
//! [`serde_json::Value`]:
//!
//! - sales/deliveries: `{"Filiale": [...]}` or `[{"Filiale": [...]}]`; every
//!   store entry holds `Datum` (`DD/MM/YY`), `FilialNummer` and an
//!   `ArtikelHistory` list of `ArtikelNummer`, `Liefermenge`, `Verkaufsmenge`
//! - products: `{"Artikel": [...]}` or a bare list
//! - prices: `{"Verkaufspreise": [...]}` or a bare list
//! - stores: `{"Filialliste": [...]}` or a bare list
//!
//! Sales/deliveries and product documents carry their extraction date in the
//! label (`..._<yyyy>_<mm>_<dd>_<HH>_<MM>_<SS>.json`). Price and store documents
//! do not; for those the last occurrence in label order wins.

use crate::batch::Batches;
use crate::combiners::{First, Last, Sum};
use crate::config::EtlConfig;
use crate::error::{EtlError, Result};
use crate::from_vec;
use crate::model::{BusinessKey, DeliveryFact, NormalizedTables, ProductDim, ProductPrice, SalesFact, StoreDim};
use crate::source::stage_batches;
use crate::transform::{RawValue, coerce_count, coerce_numeric, dedupe_latest, latest_snapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

const TARGET_DATE_FORMAT: &str = "%d/%m/%y";

/// A raw document: unparsed JSON text or a parsed value.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonDocument {
    Text(String),
    Parsed(Value),
}

impl JsonDocument {
    /// The document as a JSON value, parsing text on demand.
    ///
    /// # Errors
    /// Returns [`EtlError::Document`] if the text is not valid JSON.
    pub fn value(&self) -> Result<Cow<'_, Value>> {
        match self {
            JsonDocument::Text(s) => Ok(Cow::Owned(serde_json::from_str(s)?)),
            JsonDocument::Parsed(v) => Ok(Cow::Borrowed(v)),
        }
    }
}

impl From<String> for JsonDocument {
    fn from(s: String) -> Self {
        JsonDocument::Text(s)
    }
}

impl From<&str> for JsonDocument {
    fn from(s: &str) -> Self {
        JsonDocument::Text(s.to_string())
    }
}

impl From<Value> for JsonDocument {
    fn from(v: Value) -> Self {
        JsonDocument::Parsed(v)
    }
}

/// All raw Galaxy inputs of one run.
#[derive(Debug, Default)]
pub struct GalaxyBatches {
    pub sales_deliveries: Batches<JsonDocument>,
    pub products: Batches<JsonDocument>,
    pub prices: Batches<JsonDocument>,
    pub stores: Batches<JsonDocument>,
}

#[derive(Deserialize)]
struct StoreHistory {
    #[serde(rename = "Datum")]
    target_date: String,
    #[serde(rename = "FilialNummer")]
    number_store: RawValue,
    #[serde(rename = "ArtikelHistory")]
    history: Vec<ArticleHistory>,
}

#[derive(Deserialize)]
struct ArticleHistory {
    #[serde(rename = "ArtikelNummer")]
    number_product: RawValue,
    #[serde(rename = "Liefermenge")]
    delivery_qty: RawValue,
    #[serde(rename = "Verkaufsmenge")]
    sales_qty: RawValue,
}

#[derive(Deserialize)]
struct ProductEntry {
    #[serde(rename = "ArtikelNummer")]
    number_product: RawValue,
    #[serde(rename = "ArtikelName")]
    product_name: String,
    #[serde(rename = "BestellMindestEinheit", default)]
    moq: RawValue,
}

#[derive(Deserialize)]
struct PriceEntry {
    #[serde(rename = "ArtikelNummer")]
    number_product: RawValue,
    #[serde(rename = "ArtikelPreis", alias = "Artikelpreis", default)]
    price: RawValue,
}

#[derive(Deserialize)]
struct StoreEntry {
    #[serde(rename = "FilialNummer")]
    number_store: RawValue,
    #[serde(rename = "FilialName")]
    store_name: String,
    /// Key must be present; an explicit `null` means no address.
    #[serde(rename = "FilialAnschrift", deserialize_with = "present_or_null")]
    store_address: Option<String>,
}

/// Reads a nullable field without the implicit `None` serde grants absent `Option` keys.
fn present_or_null<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    Option::<String>::deserialize(d)
}

/// Flattened history entry before reconciliation.
#[derive(Clone)]
struct HistoryLine {
    key: BusinessKey,
    delivery_qty: f64,
    sales_qty: f64,
    extraction_date: NaiveDate,
}

#[derive(Clone)]
struct StampedProduct {
    dim: ProductDim,
    extraction_date: NaiveDate,
}

/// Normalize every Galaxy document kind.
///
/// Prices stay a table of their own, so a price whose product has no master
/// record still reaches the joined facts.
///
/// # Errors
/// Fails on the first batch with an invalid label, malformed JSON, a missing
/// envelope key, a bad target date or a non-integer identifier.
pub fn normalize(batches: &GalaxyBatches, config: &EtlConfig) -> Result<NormalizedTables> {
    let (sales, deliveries) = process_sales_deliveries(&batches.sales_deliveries, config)?;
    Ok(NormalizedTables {
        sales,
        deliveries,
        products: process_products(&batches.products, config)?,
        stores: process_stores(&batches.stores, config)?,
        prices: process_prices(&batches.prices, config)?,
    })
}

/// Sales and deliveries from the combined history documents.
///
/// Per key only the lines of the latest extraction count. Their delivery
/// quantities are summed while the sales quantity is taken from the first
/// line; `return_qty` is always 0. Both outputs cover the same keys.
///
/// # Errors
/// See [`normalize`].
pub fn process_sales_deliveries(
    batches: &Batches<JsonDocument>,
    config: &EtlConfig,
) -> Result<(Vec<SalesFact>, Vec<DeliveryFact>)> {
    let staged = stage_batches(batches, |label, doc| {
        let extraction_date = config.galaxy_label.extraction_date(label)?;
        let value = doc.value()?;
        let stores = Vec::<StoreHistory>::deserialize(facts_envelope(&value)?)?;

        let mut lines = Vec::new();
        for store in stores {
            let target_date = parse_galaxy_date(&store.target_date)?;
            let number_store = store.number_store.to_identifier("FilialNummer")?;
            for article in store.history {
                lines.push(HistoryLine {
                    key: BusinessKey::new(
                        target_date,
                        number_store,
                        article.number_product.to_identifier("ArtikelNummer")?,
                    ),
                    delivery_qty: coerce_numeric(&article.delivery_qty, config.numeric_default),
                    sales_qty: coerce_numeric(&article.sales_qty, config.numeric_default),
                    extraction_date,
                });
            }
        }
        Ok(lines)
    })?;
    let staged_len = staged.len();

    let snapshot = from_vec(latest_snapshot(staged, |l| l.key, |l| l.extraction_date))
        .key_by(|l| (l.key, l.extraction_date));
    let delivered = snapshot
        .clone()
        .map_values(|l| l.delivery_qty)
        .combine_values(Sum::<f64>::new());
    let sold = snapshot
        .map_values(|l| l.sales_qty)
        .combine_values(First::<f64>::new());

    let (sales, deliveries): (Vec<_>, Vec<_>) = delivered
        .join_inner(sold)
        .into_iter()
        .map(|((key, extraction_date), (delivery_qty, sales_qty))| {
            (
                SalesFact {
                    key,
                    sales_qty,
                    return_qty: 0.0,
                    extraction_date,
                },
                DeliveryFact {
                    key,
                    delivery_qty,
                    extraction_date,
                },
            )
        })
        .unzip();
    debug!(staged = staged_len, kept = sales.len(), "galaxy sales/deliveries normalized");
    Ok((sales, deliveries))
}

/// Product master data, latest extraction per product. `price` is left `None`.
///
/// # Errors
/// See [`normalize`].
pub fn process_products(batches: &Batches<JsonDocument>, config: &EtlConfig) -> Result<Vec<ProductDim>> {
    let staged = stage_batches(batches, |label, doc| {
        let extraction_date = config.galaxy_label.extraction_date(label)?;
        let value = doc.value()?;
        Vec::<ProductEntry>::deserialize(list_envelope(&value, "Artikel"))?
            .into_iter()
            .map(|p| {
                Ok(StampedProduct {
                    dim: ProductDim {
                        number_product: p.number_product.to_identifier("ArtikelNummer")?,
                        product_name: p.product_name,
                        price: None,
                        moq: coerce_count(&p.moq, 0.0),
                    },
                    extraction_date,
                })
            })
            .collect()
    })?;

    let products: Vec<ProductDim> = dedupe_latest(staged, |p| p.dim.number_product, |p| p.extraction_date)
        .into_iter()
        .map(|p| p.dim)
        .collect();
    debug!(kept = products.len(), "galaxy products normalized");
    Ok(products)
}

/// Price list, last entry per product in label order. Missing prices become 0.
///
/// # Errors
/// See [`normalize`].
pub fn process_prices(batches: &Batches<JsonDocument>, config: &EtlConfig) -> Result<Vec<ProductPrice>> {
    let staged = stage_batches(batches, |_, doc| {
        let value = doc.value()?;
        Vec::<PriceEntry>::deserialize(list_envelope(&value, "Verkaufspreise"))?
            .into_iter()
            .map(|p| {
                Ok(ProductPrice {
                    number_product: p.number_product.to_identifier("ArtikelNummer")?,
                    price: coerce_numeric(&p.price, config.numeric_default),
                })
            })
            .collect()
    })?;

    let prices: Vec<ProductPrice> = from_vec(staged)
        .key_by(|p| p.number_product)
        .combine_values(Last::new())
        .values()
        .collect();
    debug!(kept = prices.len(), "galaxy prices normalized");
    Ok(prices)
}

/// Store master data, last entry per store in label order.
///
/// Line breaks in the address are replaced by the configured separator.
///
/// # Errors
/// See [`normalize`].
pub fn process_stores(batches: &Batches<JsonDocument>, config: &EtlConfig) -> Result<Vec<StoreDim>> {
    let staged = stage_batches(batches, |_, doc| {
        let value = doc.value()?;
        Vec::<StoreEntry>::deserialize(list_envelope(&value, "Filialliste"))?
            .into_iter()
            .map(|s| {
                Ok(StoreDim {
                    number_store: s.number_store.to_identifier("FilialNummer")?,
                    store_name: s.store_name,
                    store_address: s
                        .store_address
                        .map(|a| a.replace("\r\n", "\n").replace('\n', &config.address_separator)),
                })
            })
            .collect()
    })?;

    let stores: Vec<StoreDim> = from_vec(staged)
        .key_by(|s| s.number_store)
        .combine_values(Last::new())
        .values()
        .collect();
    debug!(kept = stores.len(), "galaxy stores normalized");
    Ok(stores)
}

/// `Filiale` list of a sales/deliveries document.
fn facts_envelope(doc: &Value) -> Result<&Value> {
    let holder = match doc {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| EtlError::Shape("empty sales/deliveries document list".into()))?,
        other => other,
    };
    holder
        .get("Filiale")
        .ok_or_else(|| EtlError::Shape("sales/deliveries document has no `Filiale` key".into()))
}

/// The list under `key`, or the document itself when it is a bare list.
fn list_envelope<'a>(doc: &'a Value, key: &str) -> &'a Value {
    doc.get(key).unwrap_or(doc)
}

fn parse_galaxy_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), TARGET_DATE_FORMAT).map_err(|_| EtlError::TargetDate {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelopes_accept_both_shapes() {
        let wrapped = json!({"Filiale": [1]});
        let listed = json!([{"Filiale": [2]}]);
        assert_eq!(facts_envelope(&wrapped).unwrap(), &json!([1]));
        assert_eq!(facts_envelope(&listed).unwrap(), &json!([2]));
        assert!(matches!(facts_envelope(&json!([])), Err(EtlError::Shape(_))));
        assert!(matches!(facts_envelope(&json!({"Stores": []})), Err(EtlError::Shape(_))));

        assert_eq!(list_envelope(&json!({"Artikel": [3]}), "Artikel"), &json!([3]));
        assert_eq!(list_envelope(&json!([4]), "Artikel"), &json!([4]));
    }

    #[test]
    fn two_digit_years() {
        assert_eq!(
            parse_galaxy_date("05/03/24").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert!(parse_galaxy_date("2024-03-05").is_err());
    }
}
