//! Test data builders for creating input sequences fluently.

use crate::query::{Element, Query};
use std::ops::Range;

/// A fluent builder for test input.
///
/// # Example
///
/// ```
/// use ironseq::testing::TestDataBuilder;
///
/// let data = TestDataBuilder::new()
///     .add_range(1..11)
///     .add_value(100)
///     .add_repeated(42, 5)
///     .build();
///
/// assert_eq!(data.len(), 16); // 10 + 1 + 5
/// ```
#[derive(Default)]
pub struct TestDataBuilder<T> {
    data: Vec<T>,
}

impl<T> TestDataBuilder<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    #[must_use]
    pub fn add_value(mut self, value: T) -> Self {
        self.data.push(value);
        self
    }

    #[must_use]
    pub fn add_values(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.data.extend(values);
        self
    }

    #[must_use]
    pub fn add_repeated(mut self, value: T, count: usize) -> Self
    where
        T: Clone,
    {
        self.data.extend(std::iter::repeat_n(value, count));
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<T> {
        self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl TestDataBuilder<i64> {
    /// Append every value of `range`.
    #[must_use]
    pub fn add_range(mut self, range: Range<i64>) -> Self {
        self.data.extend(range);
        self
    }
}

impl<T: Element> TestDataBuilder<T> {
    /// Build straight into a source query.
    #[must_use]
    pub fn into_query(self) -> Query<T> {
        Query::from_vec(self.data)
    }
}

/// Deterministic pseudo-random integers in `[min, max)`, from a fixed-seed LCG.
///
/// Useful for property-style checks (partition completeness, idempotence)
/// that should not depend on hand-picked input.
///
/// # Panics
///
/// Panics if `min >= max`.
///
/// # Example
///
/// ```
/// use ironseq::testing::pseudo_random_data;
///
/// let a = pseudo_random_data(50, 0, 10);
/// assert_eq!(a, pseudo_random_data(50, 0, 10));
/// assert!(a.iter().all(|n| (0..10).contains(n)));
/// ```
#[must_use]
pub fn pseudo_random_data(count: usize, min: i64, max: i64) -> Vec<i64> {
    assert!(min < max, "pseudo_random_data: empty range {min}..{max}");
    let span = max.abs_diff(min);
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let offset = (state >> 33) % span;
            min.wrapping_add_unsigned(offset)
        })
        .collect()
}
