use crate::combiners::Sum;
use crate::from_vec;

/// Sum `qty_fn` over all rows sharing a group key.
///
/// Returns one `(key, total)` per distinct key, sorted by key. Every other
/// field of the rows is dropped.
///
/// ```
/// use retail_etl::transform::aggregate_sum;
///
/// let lines = vec![("2024-01-01/100/5000", 5.0), ("2024-01-01/100/5000", 3.0)];
/// assert_eq!(aggregate_sum(lines, |l| l.0, |l| l.1), vec![("2024-01-01/100/5000", 8.0)]);
/// ```
pub fn aggregate_sum<T, K, KF, QF>(rows: Vec<T>, key_fn: KF, qty_fn: QF) -> Vec<(K, f64)>
where
    K: Ord,
    KF: Fn(&T) -> K,
    QF: Fn(&T) -> f64,
{
    from_vec(rows)
        .key_by(key_fn)
        .map_values(qty_fn)
        .combine_values(Sum::<f64>::new())
        .collect()
}
