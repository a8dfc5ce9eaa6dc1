//! Assertions for comparing job output with expected results.
//!
//! Failure messages print both sides in full so a wrong key or value list is
//! visible straight from the test log.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal element by element.
///
/// # Panics
///
/// Panics on a length difference or on the first differing position.
///
/// ```
/// use ironreduce::testing::assert_collections_equal;
///
/// assert_collections_equal(&[("a", 1), ("b", 2)], &[("a", 1), ("b", 2)]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert!(
        actual.len() == expected.len(),
        "expected {} elements, got {}\n  expected: {expected:?}\n  actual:   {actual:?}",
        expected.len(),
        actual.len()
    );
    if let Some(pos) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        panic!(
            "first difference at position {pos}: expected {:?}, got {:?}\n  expected: {expected:?}\n  actual:   {actual:?}",
            expected[pos], actual[pos]
        );
    }
}

/// Assert that two collections hold the same elements in any order.
///
/// # Panics
///
/// Panics if the lengths differ or either side has an element the other lacks.
///
/// ```
/// use ironreduce::testing::assert_collections_unordered_equal;
///
/// assert_collections_unordered_equal(&[3, 1, 2], &[1, 2, 3]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    assert!(
        actual.len() == expected.len(),
        "expected {} elements, got {}\n  expected: {expected:?}\n  actual:   {actual:?}",
        expected.len(),
        actual.len()
    );
    let got: HashSet<&T> = actual.iter().collect();
    let want: HashSet<&T> = expected.iter().collect();
    let missing: Vec<&&T> = want.difference(&got).collect();
    let unexpected: Vec<&&T> = got.difference(&want).collect();
    assert!(
        missing.is_empty() && unexpected.is_empty(),
        "contents differ\n  missing:    {missing:?}\n  unexpected: {unexpected:?}"
    );
}

/// Assert that two `(key, value)` collections are equal once sorted by key.
///
/// Use for reduce output, whose key order depends on the reducer budget.
///
/// # Panics
///
/// Panics if the collections differ after sorting.
///
/// ```
/// use ironreduce::testing::assert_kv_collections_equal;
///
/// assert_kv_collections_equal(vec![("b", 2), ("a", 1)], vec![("a", 1), ("b", 2)]);
/// ```
pub fn assert_kv_collections_equal<K, V>(mut actual: Vec<(K, V)>, mut expected: Vec<(K, V)>)
where
    K: Debug + Ord,
    V: Debug + PartialEq,
{
    actual.sort_by(|(a, _), (b, _)| a.cmp(b));
    expected.sort_by(|(a, _), (b, _)| a.cmp(b));
    assert_collections_equal(&actual, &expected);
}

/// Assert that two `(key, values)` collections match by key, comparing each
/// key's values as a set.
///
/// # Panics
///
/// Panics if the key sets differ or any key's value set differs.
///
/// ```
/// use ironreduce::testing::assert_grouped_kv_equal;
///
/// assert_grouped_kv_equal(
///     vec![("hello", vec!["f2", "f1"]), ("world", vec!["f1"])],
///     vec![("world", vec!["f1"]), ("hello", vec!["f1", "f2"])],
/// );
/// ```
pub fn assert_grouped_kv_equal<K, V>(mut actual: Vec<(K, Vec<V>)>, mut expected: Vec<(K, Vec<V>)>)
where
    K: Debug + Ord,
    V: Debug + Eq + Hash,
{
    actual.sort_by(|(a, _), (b, _)| a.cmp(b));
    expected.sort_by(|(a, _), (b, _)| a.cmp(b));
    assert_collections_equal(
        &actual.iter().map(|(k, _)| k).collect::<Vec<_>>(),
        &expected.iter().map(|(k, _)| k).collect::<Vec<_>>(),
    );

    for ((key, got), (_, want)) in actual.iter().zip(&expected) {
        let got_set: HashSet<&V> = got.iter().collect();
        let want_set: HashSet<&V> = want.iter().collect();
        assert!(
            got_set == want_set,
            "values for key {key:?} differ\n  expected: {want:?}\n  actual:   {got:?}"
        );
    }
}

/// Assert that no element satisfies `predicate`.
///
/// # Panics
///
/// Panics on the first element that satisfies `predicate`.
pub fn assert_none<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    if let Some(pos) = collection.iter().position(|item| predicate(item)) {
        panic!(
            "element at position {pos} should not match: {:?}\n  collection: {collection:?}",
            collection[pos]
        );
    }
}

/// Assert that `collection` contains `element`.
///
/// # Panics
///
/// Panics if the element is not found.
pub fn assert_contains<T: Debug + PartialEq>(collection: &[T], element: &T) {
    assert!(
        collection.contains(element),
        "{element:?} not found in {collection:?}"
    );
}
