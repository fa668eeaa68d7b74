//! Keyed operations on `Collection<(K, V)>`.

use crate::Collection;
use crate::combiners::CombineFn;
use std::collections::BTreeMap;

impl<K: Ord, V> Collection<(K, V)> {
    /// Generic combine-by-key using a [`CombineFn`]; output sorted by key.
    #[must_use]
    pub fn combine_values<C, A, O>(self, comb: C) -> Collection<(K, O)>
    where
        C: CombineFn<V, A, O>,
    {
        let mut accs: BTreeMap<K, A> = BTreeMap::new();
        for (k, v) in self.rows {
            comb.add_input(accs.entry(k).or_insert_with(|| comb.create()), v);
        }
        accs.into_iter().map(|(k, a)| (k, comb.finish(a))).collect()
    }
}

impl<K, V> Collection<(K, V)> {
    /// Transform values while keeping keys.
    #[must_use]
    pub fn map_values<O, F>(self, f: F) -> Collection<(K, O)>
    where
        F: Fn(&V) -> O,
    {
        self.rows.into_iter().map(|(k, v)| (k, f(&v))).collect()
    }

    /// Drop the keys.
    #[must_use]
    pub fn values(self) -> Collection<V> {
        self.rows.into_iter().map(|(_, v)| v).collect()
    }
}
