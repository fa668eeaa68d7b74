use crate::combiners::{LatestBy, LatestSnapshot};
use crate::from_vec;

/// Keep one row per key: the one with the greatest extraction date.
///
/// Ties on the date go to the row appearing last in `rows`. The result is
/// sorted by key, so the same input always yields the same output.
///
/// ```
/// use retail_etl::transform::dedupe_latest;
///
/// // (key, extraction day, payload)
/// let rows = vec![("k", 2, "b"), ("k", 1, "a"), ("k", 2, "c")];
/// let kept = dedupe_latest(rows, |r| r.0, |r| r.1);
/// assert_eq!(kept, vec![("k", 2, "c")]);
/// ```
pub fn dedupe_latest<T, K, D, KF, DF>(rows: Vec<T>, key_fn: KF, date_fn: DF) -> Vec<T>
where
    K: Ord,
    D: Ord,
    KF: Fn(&T) -> K,
    DF: Fn(&T) -> D,
{
    from_vec(rows)
        .key_by(key_fn)
        .combine_values(LatestBy::new(date_fn))
        .values()
        .collect()
}

/// Keep, per key, every row of that key's latest extraction.
///
/// Unlike [`dedupe_latest`] this preserves several rows for one key when they
/// share the latest date (a delivery split over several lines). Rows come out
/// grouped by key in key order, input order within a key.
pub fn latest_snapshot<T, K, D, KF, DF>(rows: Vec<T>, key_fn: KF, date_fn: DF) -> Vec<T>
where
    K: Ord,
    D: Ord,
    KF: Fn(&T) -> K,
    DF: Fn(&T) -> D,
{
    from_vec(rows)
        .key_by(key_fn)
        .combine_values(LatestSnapshot::new(date_fn))
        .values()
        .into_iter()
        .flatten()
        .collect()
}
