//! Assertion functions for pipeline outputs.

use std::collections::BTreeMap;
use std::fmt::Debug;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics with the first differing index if the collections differ in length
/// or content.
///
/// # Example
///
/// ```
/// use retail_etl::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}"
        );
    }
}

/// Assert that no two elements share a key.
///
/// # Panics
///
/// Panics naming the duplicated key and the positions of both elements.
///
/// # Example
///
/// ```
/// use retail_etl::testing::assert_unique_by;
///
/// assert_unique_by(&[(1, 'a'), (2, 'a')], |r| r.0);
/// ```
pub fn assert_unique_by<T, K, F>(collection: &[T], key_fn: F)
where
    T: Debug,
    K: Ord + Debug,
    F: Fn(&T) -> K,
{
    let mut seen: BTreeMap<K, usize> = BTreeMap::new();
    for (i, item) in collection.iter().enumerate() {
        let key = key_fn(item);
        if let Some(first) = seen.get(&key) {
            panic!(
                "Duplicate key {key:?} at indices {first} and {i}:\n  First: {:?}\n  Second: {item:?}",
                collection[*first]
            );
        }
        seen.insert(key, i);
    }
}

/// Assert that every element satisfies `predicate`.
///
/// # Panics
///
/// Panics with the first failing element.
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Element at index {i} does not satisfy predicate: {item:?}"
        );
    }
}
