//! Per-key aggregation functions for [`Collection::combine_values`](crate::Collection::combine_values).
//!
//! A combiner folds every value sharing a key into an accumulator and then
//! turns the accumulator into the output value:
//!
//! - [`Sum`] - add values (delivery quantities)
//! - [`First`] / [`Last`] - keep the first or last value seen, in input order
//! - [`LatestBy`] - keep the value with the greatest extraction date; the one
//!   seen last wins among equal dates
//! - [`LatestSnapshot`] - keep *all* values sharing the greatest extraction date
//!
//! Implement [`CombineFn`] for anything else.

pub mod basic;
pub mod latest;

pub use basic::{First, Last, Sum};
pub use latest::{LatestBy, LatestSnapshot};

/// Fold values of type `V` into an accumulator `A`, then finish into `O`.
///
/// `create` is called once per key, before the first `add_input` for that key.
pub trait CombineFn<V, A, O> {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn finish(&self, acc: A) -> O;
}
