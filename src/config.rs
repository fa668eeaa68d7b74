//! Pipeline configuration.
//!
//! Every knob has a default matching the upstream extract conventions, so
//! `EtlConfig::default()` is what production runs use. A TOML document may
//! override individual fields:
//!
//! ```toml
//! address_separator = " | "
//!
//! [cosmos_fact_label]
//! separator = "-"
//! year = -3
//! month = -2
//! day = -1
//! ```

use crate::batch::LabelDate;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

/// Settings shared by both source normalizers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtlConfig {
    /// Joins address components (`name`, `postal code`, `city`) and replaces
    /// line breaks in nested-document addresses.
    pub address_separator: String,
    /// Value substituted for blank or unparseable quantities and prices.
    pub numeric_default: f64,
    /// Label convention of Cosmos sales and delivery batches.
    pub cosmos_fact_label: LabelDate,
    /// Label convention of Cosmos product and store master batches.
    pub cosmos_master_label: LabelDate,
    /// Label convention of Galaxy sales/delivery and product documents.
    pub galaxy_label: LabelDate,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            address_separator: " – ".to_string(),
            numeric_default: 0.0,
            cosmos_fact_label: LabelDate::trailing(),
            cosmos_master_label: LabelDate::leading(),
            galaxy_label: LabelDate::timestamped(),
        }
    }
}

impl EtlConfig {
    /// Parse a TOML document; omitted fields keep their defaults.
    ///
    /// # Errors
    /// Returns [`EtlError::Config`](crate::EtlError::Config) on invalid TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or a config error if it
    /// does not parse.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }
}
