//! Source normalizers: one module per upstream provider.
//!
//! - [`cosmos`] - tabular extracts (one row per key per batch, German column names)
//! - [`galaxy`] - nested JSON documents (store -> product history)
//!
//! Both reshape their raw batches into [`NormalizedTables`](crate::model::NormalizedTables).

pub mod cosmos;
pub mod galaxy;

use crate::batch::Batches;
use crate::error::{EtlError, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Run `stage` over every batch in label order and concatenate the results.
///
/// Any error is tagged with the label of the batch that raised it.
pub(crate) fn stage_batches<T, O, F>(batches: &Batches<T>, mut stage: F) -> Result<Vec<O>>
where
    F: FnMut(&str, &T) -> Result<Vec<O>>,
{
    let mut out = Vec::new();
    for (label, batch) in batches {
        let staged = batch
            .get()
            .and_then(|content| stage(label.as_str(), content))
            .map_err(|e| e.in_batch(label))?;
        out.extend(staged);
    }
    Ok(out)
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a tabular target date in any of the accepted formats.
pub(crate) fn parse_target_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| EtlError::TargetDate {
            value: raw.to_string(),
        })
}
