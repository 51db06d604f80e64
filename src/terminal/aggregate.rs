//! Folding terminals: `aggregate`, `reduce`, `count`, `sum`, `average`,
//! `min`, `max`.

use crate::error::{QueryError, Result};
use crate::query::{Element, Query};
use crate::terminal::AsF64;
use std::ops::Add;

impl<T: Element> Query<T> {
    /// Fold every element into `seed`.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let total = Query::from_vec(vec![1, 2, 3]).aggregate(10, |acc, n: &i32| acc + n)?;
    /// assert_eq!(total, 16);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn aggregate<A, F>(&self, seed: A, mut f: F) -> Result<A>
    where
        F: FnMut(A, &T) -> A,
    {
        let mut cursor = self.cursor()?;
        let mut acc = seed;
        while let Some(v) = cursor.advance()? {
            acc = f(acc, &v);
        }
        Ok(acc)
    }

    /// Fold into `seed`, then shape the final accumulator with `result`.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn aggregate_select<A, R, F, S>(&self, seed: A, f: F, result: S) -> Result<R>
    where
        F: FnMut(A, &T) -> A,
        S: FnOnce(A) -> R,
    {
        self.aggregate(seed, f).map(result)
    }

    /// Fold using the first element as the seed.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if there is no first element.
    pub fn reduce<F>(&self, mut f: F) -> Result<T>
    where
        F: FnMut(T, T) -> T,
    {
        let mut cursor = self.cursor()?;
        let mut acc = cursor.advance()?.ok_or(QueryError::EmptySequence)?;
        while let Some(v) = cursor.advance()? {
            acc = f(acc, v);
        }
        Ok(acc)
    }

    /// Number of elements.
    ///
    /// Answers from the source's known length when the pipeline reports one,
    /// otherwise scans.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages during the scan.
    pub fn count(&self) -> Result<usize> {
        if let Some(len) = self.known_len() {
            return Ok(len);
        }
        self.aggregate(0, |n, _| n + 1)
    }

    /// Number of elements matching `pred`. Always scans.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn count_where<P>(&self, pred: P) -> Result<usize>
    where
        P: Fn(&T) -> bool,
    {
        self.aggregate(0, |n, v| if pred(v) { n + 1 } else { n })
    }

    /// Sum of projected values; `U::default()` for an empty sequence.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn sum_by<U, F>(&self, f: F) -> Result<U>
    where
        U: Add<Output = U> + Default,
        F: Fn(&T) -> U,
    {
        self.aggregate(U::default(), |acc, v| acc + f(v))
    }

    /// Arithmetic mean of projected values.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if there are no elements.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_by<U, F>(&self, f: F) -> Result<f64>
    where
        U: AsF64,
        F: Fn(&T) -> U,
    {
        let (sum, n) = self.aggregate((0.0, 0usize), |(sum, n), v| (sum + f(v).as_f64(), n + 1))?;
        if n == 0 {
            return Err(QueryError::EmptySequence);
        }
        Ok(sum / n as f64)
    }

    /// The element with the smallest key; the first one on ties.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if there are no elements.
    pub fn min_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        self.extreme_by(key, |candidate, best| candidate < best)
    }

    /// The element with the largest key; the first one on ties.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if there are no elements.
    pub fn max_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        self.extreme_by(key, |candidate, best| candidate > best)
    }

    fn extreme_by<K, F, B>(&self, key: F, better: B) -> Result<T>
    where
        F: Fn(&T) -> K,
        B: Fn(&K, &K) -> bool,
    {
        let mut cursor = self.cursor()?;
        let first = cursor.advance()?.ok_or(QueryError::EmptySequence)?;
        let mut best_key = key(&first);
        let mut best = first;
        while let Some(v) = cursor.advance()? {
            let k = key(&v);
            if better(&k, &best_key) {
                best_key = k;
                best = v;
            }
        }
        Ok(best)
    }
}

impl<T: Element + Add<Output = T> + Default> Query<T> {
    /// Sum of all elements; `T::default()` for an empty sequence.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn sum(&self) -> Result<T> {
        self.sum_by(T::clone)
    }
}

impl<T: Element + AsF64> Query<T> {
    /// Arithmetic mean of all elements.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if there are no elements.
    pub fn average(&self) -> Result<f64> {
        self.average_by(T::clone)
    }
}

impl<T: Element + PartialOrd> Query<T> {
    /// Smallest element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if there are no elements.
    pub fn min(&self) -> Result<T> {
        self.min_by_key(T::clone)
    }

    /// Largest element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if there are no elements.
    pub fn max(&self) -> Result<T> {
        self.max_by_key(T::clone)
    }
}
