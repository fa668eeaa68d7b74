//! In-memory collections with a fluent, keyed transform API.
//!
//! A [`Collection<T>`] owns its elements and every transform consumes it and
//! returns a new collection, so a chain of steps reads top to bottom:
//!
//! ```
//! use retail_etl::{from_vec, Sum};
//!
//! let totals = from_vec(vec![("a", 2.0), ("b", 1.0), ("a", 3.0)])
//!     .combine_values(Sum::<f64>::new())
//!     .collect();
//! assert_eq!(totals, vec![("a", 5.0), ("b", 1.0)]);
//! ```
//!
//! Execution is eager and single-threaded. Keyed operations (see
//! [`helpers`](crate::helpers)) group through ordered maps, so their output is
//! sorted by key and identical across runs.

use std::vec::IntoIter;

/// An ordered, owned collection of elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    pub(crate) rows: Vec<T>,
}

/// Wrap a vector into a [`Collection`].
pub fn from_vec<T>(rows: Vec<T>) -> Collection<T> {
    Collection { rows }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Collection<T> {
    /// Transform every element.
    #[must_use]
    pub fn map<O, F>(self, f: F) -> Collection<O>
    where
        F: Fn(&T) -> O,
    {
        Collection {
            rows: self.rows.iter().map(f).collect(),
        }
    }

    /// Pair every element with a derived key: `T -> (K, T)`.
    #[must_use]
    pub fn key_by<K, F>(self, key_fn: F) -> Collection<(K, T)>
    where
        F: Fn(&T) -> K,
    {
        Collection {
            rows: self.rows.into_iter().map(|t| (key_fn(&t), t)).collect(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the collection has no elements.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materialize into a `Vec<T>`.
    pub fn collect(self) -> Vec<T> {
        self.rows
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Collection {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(rows: Vec<T>) -> Self {
        Collection { rows }
    }
}
