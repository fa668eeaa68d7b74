//! Keyed operations on [`Collection`](crate::Collection): grouping, combining and joins.

pub(crate) mod joins;
pub(crate) mod keyed;
