//! Extraction-date combiners used to reconcile repeated snapshots.

use crate::combiners::CombineFn;
use std::cmp::Ordering;
use std::marker::PhantomData;

/* ===================== LatestBy<T, F> ===================== */

/// Value with the greatest date per key, as returned by `date_fn`.
///
/// Among values sharing the greatest date the one added last wins, which
/// matches a stable ascending sort by date followed by "keep last".
///
/// - Accumulator: `Option<T>`
/// - Output: `T`
pub struct LatestBy<T, F> {
    date_fn: F,
    _t: PhantomData<T>,
}

impl<T, F> LatestBy<T, F> {
    pub fn new(date_fn: F) -> Self {
        Self {
            date_fn,
            _t: PhantomData,
        }
    }
}

impl<T, D, F> CombineFn<T, Option<T>, T> for LatestBy<T, F>
where
    D: Ord,
    F: Fn(&T) -> D,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        match acc {
            Some(cur) if (self.date_fn)(&v) < (self.date_fn)(cur) => {}
            _ => *acc = Some(v),
        }
    }

    fn finish(&self, acc: Option<T>) -> T {
        acc.expect("LatestBy::finish called on empty group")
    }
}

/* ===================== LatestSnapshot<T, F> ===================== */

/// Every value carrying the greatest date per key, in input order.
///
/// Older values are discarded as soon as a newer date shows up, so a key that
/// was re-extracted keeps only the lines of its most recent extraction.
///
/// - Accumulator: `Vec<T>`
/// - Output: `Vec<T>`
pub struct LatestSnapshot<T, F> {
    date_fn: F,
    _t: PhantomData<T>,
}

impl<T, F> LatestSnapshot<T, F> {
    pub fn new(date_fn: F) -> Self {
        Self {
            date_fn,
            _t: PhantomData,
        }
    }
}

impl<T, D, F> CombineFn<T, Vec<T>, Vec<T>> for LatestSnapshot<T, F>
where
    D: Ord,
    F: Fn(&T) -> D,
{
    fn create(&self) -> Vec<T> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<T>, v: T) {
        let ordering = match acc.first() {
            Some(cur) => (self.date_fn)(&v).cmp(&(self.date_fn)(cur)),
            None => Ordering::Greater,
        };
        match ordering {
            Ordering::Less => {}
            Ordering::Equal => acc.push(v),
            Ordering::Greater => {
                acc.clear();
                acc.push(v);
            }
        }
    }

    fn finish(&self, acc: Vec<T>) -> Vec<T> {
        acc
    }
}
