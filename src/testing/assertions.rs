//! Assertion functions for query outputs.
//!
//! Collection assertions compare plain vectors; query assertions drain a
//! [`Query`] first and panic with the underlying [`QueryError`](crate::QueryError)
//! if the pass fails.

use crate::query::{Element, Query};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironseq::testing::assert_collections_equal;
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
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two collections hold the same elements with the same
/// multiplicities, ignoring order.
///
/// # Panics
///
/// Panics if any element occurs a different number of times in each.
///
/// # Example
///
/// ```
/// use ironseq::testing::assert_collections_unordered_equal;
///
/// assert_collections_unordered_equal(&[3, 1, 1, 2], &[1, 2, 1, 3]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    fn tally<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
        let mut counts = HashMap::new();
        for item in items {
            *counts.entry(item).or_insert(0) += 1;
        }
        counts
    }

    let actual_counts = tally(actual);
    let expected_counts = tally(expected);
    if actual_counts != expected_counts {
        let missing: Vec<_> = expected_counts
            .iter()
            .filter(|(k, n)| actual_counts.get(*k) != Some(*n))
            .map(|(k, _)| *k)
            .collect();
        panic!(
            "Collection content mismatch:\n  Elements with differing counts: {missing:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
        );
    }
}

/// Drain `query` and compare the result with `expected`, in order.
///
/// # Panics
///
/// Panics if the query fails or yields a different sequence.
pub fn assert_query_yields<T>(query: &Query<T>, expected: &[T])
where
    T: Element + Debug + PartialEq,
{
    let actual = query
        .to_vec()
        .unwrap_or_else(|e| panic!("Query failed while draining: {e}"));
    assert_collections_equal(&actual, expected);
}

/// Assert that two cursors over the same query, advanced in lockstep, yield
/// identical sequences, and that a third full pass agrees with both.
///
/// Interleaving the two cursors catches operators that share per-pass state
/// between cursors.
///
/// # Panics
///
/// Panics if any pass fails or the passes disagree.
pub fn assert_reentrant<T>(query: &Query<T>)
where
    T: Element + Debug + PartialEq,
{
    let open = || {
        query
            .cursor()
            .unwrap_or_else(|e| panic!("Opening cursor failed: {e}"))
    };
    let mut a = open();
    let mut b = open();
    let (mut first, mut second) = (Vec::new(), Vec::new());
    let (mut a_done, mut b_done) = (false, false);
    while !(a_done && b_done) {
        if !a_done {
            match a.advance().unwrap_or_else(|e| panic!("First cursor failed: {e}")) {
                Some(v) => first.push(v),
                None => a_done = true,
            }
        }
        if !b_done {
            match b.advance().unwrap_or_else(|e| panic!("Second cursor failed: {e}")) {
                Some(v) => second.push(v),
                None => b_done = true,
            }
        }
    }
    assert_collections_equal(&second, &first);
    assert_query_yields(query, &first);
}

/// Assert that all elements in a collection satisfy a predicate.
///
/// # Panics
///
/// Panics if any element does not satisfy the predicate.
///
/// # Example
///
/// ```
/// use ironseq::testing::assert_all;
///
/// assert_all(&[2, 4, 6, 8], |x| x % 2 == 0);
/// ```
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}

/// Assert that a collection is sorted under `cmp` (non-decreasing).
///
/// # Panics
///
/// Panics at the first adjacent pair that is out of order.
pub fn assert_sorted_by<T: Debug>(
    collection: &[T],
    cmp: impl Fn(&T, &T) -> std::cmp::Ordering,
) {
    for (i, pair) in collection.windows(2).enumerate() {
        assert!(
            cmp(&pair[0], &pair[1]) != std::cmp::Ordering::Greater,
            "Collection out of order at index {i}:\n  {:?} > {:?}\n  Collection: {collection:?}",
            pair[0],
            pair[1]
        );
    }
}
