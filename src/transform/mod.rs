//! Small, reusable table transformations.
//!
//! - [`coerce_numeric`] - blank/unparseable raw values to a numeric default
//! - [`coerce_count`] - the same, clamped to a non-negative integer
//! - [`dedupe_latest`] / [`latest_snapshot`] - reconcile repeated extractions
//! - [`aggregate_sum`] - collapse split lines into one quantity per key
//! - [`split_returns`] - signed net quantity to sales and returns
//! - [`is_stockout`] - sales vs. delivery heuristic
//!
//! All of them are pure functions of their input.

pub mod aggregate;
pub mod coerce;
pub mod dedupe;
pub mod split;
pub mod stockout;

pub use aggregate::aggregate_sum;
pub use coerce::{RawValue, coerce_all, coerce_count, coerce_numeric};
pub use dedupe::{dedupe_latest, latest_snapshot};
pub use split::{SplitQty, split_all, split_returns};
pub use stockout::{classify_stockout, is_stockout};
