//! Row builders and small sample extracts for both sources.

use crate::batch::{Batch, Batches};
use crate::model::{ProductMapping, StoreMapping};
use crate::pipeline::Mappings;
use crate::source::cosmos::{CosmosBatches, DeliveryRow, ProductRow, SalesRow, StoreRow};
use crate::source::galaxy::{GalaxyBatches, JsonDocument};
use crate::transform::RawValue;
use chrono::NaiveDate;
use serde_json::json;

/// Calendar date shorthand.
///
/// # Panics
///
/// Panics if the components do not form a valid date.
#[must_use]
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Ready batches from `(label, content)` pairs.
pub fn batches<T, L: Into<String>>(items: impl IntoIterator<Item = (L, T)>) -> Batches<T> {
    items
        .into_iter()
        .map(|(label, content)| (label.into(), Batch::ready(content)))
        .collect()
}

/// Cosmos sales line with an ISO target date.
#[must_use]
pub fn sales_row(date: &str, store: i64, product: i64, qty: impl Into<RawValue>) -> SalesRow {
    SalesRow {
        target_date: date.to_string(),
        number_store: store,
        number_product: product,
        raw_quantity: qty.into(),
    }
}

/// Cosmos delivery line with an ISO target date.
#[must_use]
pub fn delivery_row(date: &str, store: i64, product: i64, qty: impl Into<RawValue>) -> DeliveryRow {
    DeliveryRow {
        target_date: date.to_string(),
        number_store: store,
        number_product: product,
        delivery_qty: qty.into(),
    }
}

/// Cosmos product master row.
#[must_use]
pub fn product_row(product: i64, name: &str, price: impl Into<RawValue>, moq: impl Into<RawValue>) -> ProductRow {
    ProductRow {
        number_product: product,
        product_name: name.to_string(),
        price: price.into(),
        moq: moq.into(),
    }
}

/// Cosmos store master row.
#[must_use]
pub fn store_row(store: i64, name: &str, postal_code: impl Into<RawValue>, city: &str) -> StoreRow {
    StoreRow {
        number_store: store,
        store_name: name.to_string(),
        postal_code: postal_code.into(),
        city: city.to_string(),
    }
}

/// Mapping tables from `(raw, surrogate)` pairs.
#[must_use]
pub fn mappings(products: &[(i64, i64)], stores: &[(i64, i64)]) -> Mappings {
    Mappings {
        products: products
            .iter()
            .map(|&(number_product, id_product)| ProductMapping {
                number_product,
                id_product,
            })
            .collect(),
        stores: stores
            .iter()
            .map(|&(number_store, id_store)| StoreMapping { number_store, id_store })
            .collect(),
    }
}

/// Two days of Cosmos extracts for store 100 and products 5000/5001.
///
/// - 2024-01-01 was extracted twice; the re-extraction corrects the sale of
///   product 5000 from 3 to -2 (two returns).
/// - product 5000 was delivered in two lines (5 + 3) in one extraction.
/// - product 5001 sold 4 on 2024-01-02 without any delivery.
/// - product 5001 has a blank moq.
#[must_use]
pub fn sample_cosmos_batches() -> CosmosBatches {
    CosmosBatches {
        sales: batches([
            (
                "sales_2024_01_01.csv",
                vec![sales_row("2024-01-01", 100, 5000, 3.0), sales_row("2024-01-01", 100, 5001, 1.0)],
            ),
            ("sales_2024_01_02.csv", vec![sales_row("2024-01-01", 100, 5000, -2.0)]),
            ("sales_2024_01_03.csv", vec![sales_row("2024-01-02", 100, 5001, "4")]),
        ]),
        deliveries: batches([(
            "deliveries_2024_01_02.csv",
            vec![
                delivery_row("2024-01-01", 100, 5000, 5.0),
                delivery_row("2024-01-01", 100, 5000, 3.0),
                delivery_row("2024-01-01", 100, 5001, 1.0),
            ],
        )]),
        products: batches([(
            "products_2024_01_01_full.csv",
            vec![
                product_row(5000, "Milch 1L", 1.29, 12.0),
                product_row(5001, "Brot", 2.49, ""),
            ],
        )]),
        stores: batches([(
            "stores_2024_01_01_full.csv",
            vec![store_row(100, "Hauptstraße 1", 10115.0, "Berlin")],
        )]),
    }
}

/// Galaxy documents covering store 200 and products 7000/7001.
///
/// The 2024-02-01 history was extracted twice; the later extraction holds two
/// delivery lines for product 7000.
#[must_use]
pub fn sample_galaxy_batches() -> GalaxyBatches {
    let early = json!({"Filiale": [{
        "Datum": "01/02/24",
        "FilialNummer": 200,
        "ArtikelHistory": [
            {"ArtikelNummer": 7000, "Liefermenge": 1, "Verkaufsmenge": 1},
        ],
    }]});
    let late = json!([{"Filiale": [{
        "Datum": "01/02/24",
        "FilialNummer": "200",
        "ArtikelHistory": [
            {"ArtikelNummer": 7000, "Liefermenge": 4, "Verkaufsmenge": 9},
            {"ArtikelNummer": 7000, "Liefermenge": "2", "Verkaufsmenge": 9},
            {"ArtikelNummer": 7001, "Liefermenge": "", "Verkaufsmenge": 2},
        ],
    }]}]);

    GalaxyBatches {
        sales_deliveries: batches([
            ("galaxy_history_2024_02_01_06_00_00.json", JsonDocument::from(early)),
            ("galaxy_history_2024_02_02_06_00_00.json", JsonDocument::from(late.to_string())),
        ]),
        products: batches([(
            "galaxy_products_2024_02_01_06_00_00.json",
            JsonDocument::from(json!({"Artikel": [
                {"ArtikelNummer": 7000, "ArtikelName": "Apfel", "BestellMindestEinheit": "6"},
                {"ArtikelNummer": 7001, "ArtikelName": "Birne", "BestellMindestEinheit": ""},
            ]})),
        )]),
        prices: batches([(
            "galaxy_prices.json",
            JsonDocument::from(json!({"Verkaufspreise": [
                {"ArtikelNummer": 7000, "ArtikelPreis": 0.5},
            ]})),
        )]),
        stores: batches([(
            "galaxy_stores.json",
            JsonDocument::from(json!({"Filialliste": [
                {"FilialNummer": 200, "FilialName": "Markt Süd", "FilialAnschrift": "Südring 5\n80331 München"},
            ]})),
        )]),
    }
}
