//! Raw extract batches and their extraction dates.
//!
//! Every upstream extract arrives as a *batch*: a label (usually the original
//! file name) plus its rows or documents. The label encodes the date the batch
//! was pulled from the source system; [`LabelDate`] describes where the year,
//! month and day sit once the label is split on its separator.
//!
//! Rows can be supplied eagerly with [`Batch::ready`] or lazily with
//! [`Batch::deferred`]. A deferred provider runs at most once; its result is
//! memoized for every later [`Batch::get`].
//!
//! ```
//! use retail_etl::batch::{Batch, Batches, LabelDate};
//! use chrono::NaiveDate;
//!
//! let mut batches: Batches<Vec<u32>> = Batches::new();
//! batches.insert("sales_2024_01_02.csv".into(), Batch::ready(vec![1, 2]));
//! batches.insert("sales_2024_01_03.csv".into(), Batch::deferred(|| Ok(vec![3])));
//!
//! let date = LabelDate::trailing().extraction_date("sales_2024_01_02.csv").unwrap();
//! assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
//! ```

use crate::error::{EtlError, Result};
use chrono::NaiveDate;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

type Provider<T> = Box<dyn FnOnce() -> anyhow::Result<T>>;

/// One raw extract: either a loaded value or a provider that loads it on demand.
pub struct Batch<T> {
    value: OnceCell<T>,
    provider: Cell<Option<Provider<T>>>,
}

impl<T> Batch<T> {
    /// A batch whose content is already in memory.
    pub fn ready(value: T) -> Self {
        Self {
            value: OnceCell::with_value(value),
            provider: Cell::new(None),
        }
    }

    /// A batch loaded by `provider` the first time it is read.
    pub fn deferred<F>(provider: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<T> + 'static,
    {
        Self {
            value: OnceCell::new(),
            provider: Cell::new(Some(Box::new(provider))),
        }
    }

    /// Borrow the batch content, running the provider if it has not run yet.
    ///
    /// # Errors
    /// Returns [`EtlError::Provider`] if the provider fails, and
    /// [`EtlError::ProviderConsumed`] on every read after such a failure.
    pub fn get(&self) -> Result<&T> {
        self.value.get_or_try_init(|| {
            let provider = self.provider.take().ok_or(EtlError::ProviderConsumed)?;
            provider().map_err(|e| EtlError::Provider(e.into()))
        })
    }

    /// Whether the content has been materialized.
    pub fn is_loaded(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T> From<T> for Batch<T> {
    fn from(value: T) -> Self {
        Self::ready(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Batch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(v) => f.debug_tuple("Batch").field(v).finish(),
            None => f.write_str("Batch(<deferred>)"),
        }
    }
}

/// Batches keyed by label. Iteration follows label order, which keeps every
/// "last occurrence wins" rule deterministic.
pub type Batches<T> = BTreeMap<String, Batch<T>>;

/// Position of the date components inside a batch label.
///
/// The label's file stem (extension removed) is split on `separator`; `year`,
/// `month` and `day` index the resulting parts. Negative indices count from the
/// end, so `-1` is the last part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelDate {
    pub separator: char,
    pub year: isize,
    pub month: isize,
    pub day: isize,
}

impl LabelDate {
    /// Date in the last three parts: `sales_2024_01_02.csv`.
    pub fn trailing() -> Self {
        Self { separator: '_', year: -3, month: -2, day: -1 }
    }

    /// Date right after the name: `products_2024_01_02_full.csv`.
    pub fn leading() -> Self {
        Self { separator: '_', year: 1, month: 2, day: 3 }
    }

    /// Date followed by a time of day: `deliveries_2024_01_02_06_30_00.json`.
    pub fn timestamped() -> Self {
        Self { separator: '_', year: -6, month: -5, day: -4 }
    }

    /// Derive the extraction date encoded in `label`.
    ///
    /// # Errors
    /// Returns [`EtlError::BatchLabel`] when a component is out of range, not
    /// numeric, or the parts do not form a calendar date.
    pub fn extraction_date(&self, label: &str) -> Result<NaiveDate> {
        let stem = Path::new(label)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(label);
        let parts: Vec<&str> = stem.split(self.separator).collect();

        let component = |idx: isize, what: &str| -> Result<u32> {
            let resolved = if idx < 0 {
                parts.len().checked_sub(idx.unsigned_abs())
            } else {
                Some(idx as usize)
            };
            let raw = resolved.and_then(|i| parts.get(i)).ok_or_else(|| EtlError::BatchLabel {
                label: label.to_string(),
                reason: format!("no {what} component at position {idx}"),
            })?;
            raw.trim().parse::<u32>().map_err(|_| EtlError::BatchLabel {
                label: label.to_string(),
                reason: format!("{what} component `{raw}` is not a number"),
            })
        };

        let year = component(self.year, "year")?;
        let month = component(self.month, "month")?;
        let day = component(self.day, "day")?;
        i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
            .ok_or_else(|| EtlError::BatchLabel {
                label: label.to_string(),
                reason: format!("{year}-{month}-{day} is not a calendar date"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn conventions_resolve_positions() {
        assert_eq!(
            LabelDate::trailing().extraction_date("sales_2024_01_02.csv").unwrap(),
            ymd(2024, 1, 2)
        );
        assert_eq!(
            LabelDate::leading().extraction_date("products_2024_03_04_full.csv").unwrap(),
            ymd(2024, 3, 4)
        );
        assert_eq!(
            LabelDate::timestamped()
                .extraction_date("galaxy_lieferungen_2024_05_06_23_59_00.json")
                .unwrap(),
            ymd(2024, 5, 6)
        );
    }

    #[test]
    fn bad_labels_are_rejected() {
        let conv = LabelDate::trailing();
        assert!(matches!(conv.extraction_date("sales.csv"), Err(EtlError::BatchLabel { .. })));
        assert!(matches!(conv.extraction_date("sales_2024_xx_02.csv"), Err(EtlError::BatchLabel { .. })));
        assert!(matches!(conv.extraction_date("sales_2024_02_30.csv"), Err(EtlError::BatchLabel { .. })));
    }

    #[test]
    fn deferred_provider_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let batch = Batch::deferred(move || {
            seen.set(seen.get() + 1);
            Ok(vec![1u8, 2, 3])
        });
        assert!(!batch.is_loaded());
        assert_eq!(batch.get().unwrap().len(), 3);
        assert_eq!(batch.get().unwrap().len(), 3);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failed_provider_is_not_retried() {
        let batch: Batch<Vec<u8>> = Batch::deferred(|| anyhow::bail!("disk on fire"));
        assert!(matches!(batch.get(), Err(EtlError::Provider(_))));
        assert!(matches!(batch.get(), Err(EtlError::ProviderConsumed)));
    }
}
