//! Key-based joins between two keyed collections.
//!
//! All joins co-group the right side into an ordered index first, then walk
//! the left side:
//! - [`Collection::join_inner`] - inner join, sorted by key
//! - [`Collection::join_left`] - left outer join, left order preserved
//! - [`Collection::join_full`] - full outer join, sorted by key
//!
//! A key matching several right rows fans out into one output row per match,
//! in right input order, exactly like a relational join.
//!
//! ```
//! use retail_etl::from_vec;
//!
//! let left = from_vec(vec![(1u32, "L1"), (2, "L2")]);
//! let right = from_vec(vec![(1u32, 'x'), (3, 'z')]);
//!
//! let full = left.join_full(right).collect();
//! assert_eq!(full, vec![
//!     (1, (Some("L1"), Some('x'))),
//!     (2, (Some("L2"), None)),
//!     (3, (None, Some('z'))),
//! ]);
//! ```

use crate::{Collection, from_vec};
use std::collections::BTreeMap;

fn index<K: Ord, W>(rows: Vec<(K, W)>) -> BTreeMap<K, Vec<W>> {
    let mut m: BTreeMap<K, Vec<W>> = BTreeMap::new();
    for (k, w) in rows {
        m.entry(k).or_default().push(w);
    }
    m
}

impl<K, V> Collection<(K, V)>
where
    K: Ord + Clone,
    V: Clone,
{
    /// Inner join on key: `(K, V) x (K, W) -> (K, (V, W))`, sorted by key.
    #[must_use]
    pub fn join_inner<W: Clone>(self, right: Collection<(K, W)>) -> Collection<(K, (V, W))> {
        let lm = index(self.rows);
        let mut rm = index(right.rows);

        let mut out = Vec::new();
        for (k, vs) in lm {
            let Some(ws) = rm.remove(&k) else { continue };
            for v in &vs {
                for w in &ws {
                    out.push((k.clone(), (v.clone(), w.clone())));
                }
            }
        }
        from_vec(out)
    }

    /// Left outer join: `(K, V) x (K, W) -> (K, (V, Option<W>))`.
    ///
    /// Every left row survives. Output keeps the left order.
    #[must_use]
    pub fn join_left<W: Clone>(self, right: Collection<(K, W)>) -> Collection<(K, (V, Option<W>))> {
        let rm = index(right.rows);

        let mut out = Vec::with_capacity(self.rows.len());
        for (k, v) in self.rows {
            match rm.get(&k) {
                Some(ws) => {
                    for w in ws {
                        out.push((k.clone(), (v.clone(), Some(w.clone()))));
                    }
                }
                None => out.push((k, (v, None))),
            }
        }
        from_vec(out)
    }

    /// Full outer join: `(K, V) x (K, W) -> (K, (Option<V>, Option<W>))`, sorted by key.
    ///
    /// No row from either side is lost; the unmatched side is `None`.
    #[must_use]
    pub fn join_full<W: Clone>(
        self,
        right: Collection<(K, W)>,
    ) -> Collection<(K, (Option<V>, Option<W>))> {
        let mut groups: BTreeMap<K, (Vec<V>, Vec<W>)> = BTreeMap::new();
        for (k, v) in self.rows {
            groups.entry(k).or_default().0.push(v);
        }
        for (k, w) in right.rows {
            groups.entry(k).or_default().1.push(w);
        }

        let mut out = Vec::new();
        for (k, (vs, ws)) in groups {
            match (vs.is_empty(), ws.is_empty()) {
                (false, false) => {
                    for v in &vs {
                        for w in &ws {
                            out.push((k.clone(), (Some(v.clone()), Some(w.clone()))));
                        }
                    }
                }
                (false, true) => out.extend(vs.into_iter().map(|v| (k.clone(), (Some(v), None)))),
                (true, false) => out.extend(ws.into_iter().map(|w| (k.clone(), (None, Some(w))))),
                (true, true) => {}
            }
        }
        from_vec(out)
    }
}
