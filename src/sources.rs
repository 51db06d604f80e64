//! Source adapters: the roots of every query.
//!
//! These constructors wrap a materialized collection, an integer range, a
//! repeated value, or a user-supplied generator as a restartable [`Query`].
//! None of them do any work until a cursor is pulled.
//!
//! ### Overview
//! - [`Query::from_vec`] / [`Query::from_iter`] -- a finite, materialized source
//!   with a known length.
//! - [`Query::range`] -- `count` consecutive integers starting at `start`.
//! - [`Query::repeat`] / [`Query::repeat_forever`] -- one value, repeated.
//! - [`Query::generate`] -- a fresh iterator per pass, possibly infinite.
//! - [`Query::from_cursor_fn`] -- raw cursor-protocol input.
//!
//! ### Example
//! ```
//! use ironseq::Query;
//!
//! let words = Query::from_vec(vec!["alpha", "beta", "gamma"]);
//! assert_eq!(words.count()?, 3);
//!
//! let naturals = Query::generate(|| 1u64..);
//! assert_eq!(naturals.take(3).to_vec()?, vec![1, 2, 3]);
//! # Ok::<(), ironseq::QueryError>(())
//! ```

use crate::cursor::{BoxCursor, Cursor, boxed_iter};
use crate::error::{QueryError, Result};
use crate::query::{Element, Query};
use std::iter;
use std::rc::Rc;

/// Cursor over a shared, materialized slice.
struct SliceCursor<T> {
    items: Rc<[T]>,
    pos: usize,
}

impl<T: Clone> Cursor<T> for SliceCursor<T> {
    fn advance(&mut self) -> Result<Option<T>> {
        let next = self.items.get(self.pos).cloned();
        if next.is_some() {
            self.pos += 1;
        }
        Ok(next)
    }
}

/// Stream a shared buffer from its start.
pub(crate) fn slice_cursor<T: Element>(items: Rc<[T]>) -> BoxCursor<T> {
    Box::new(SliceCursor { items, pos: 0 })
}

impl<T: Element> Query<T> {
    /// A query with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a query from a pre-existing [`Vec<T>`].
    ///
    /// The vector is moved into shared storage; every pass clones elements out
    /// of it. The length is known, so `count()` answers without a scan.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        let items: Rc<[T]> = data.into();
        let len = items.len();
        Self::from_factory_with_len("source", Some(len), move || {
            Ok(slice_cursor(Rc::clone(&items)))
        })
    }

    /// Create a query from any finite iterable by collecting it first.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_vec(iter.into_iter().collect())
    }

    /// `value` repeated `count` times.
    #[must_use]
    pub fn repeat(value: T, count: usize) -> Self {
        Self::from_factory_with_len("repeat", Some(count), move || {
            Ok(boxed_iter(iter::repeat_n(value.clone(), count)))
        })
    }

    /// `value` repeated without end. Pair with `take` or a short-circuiting
    /// terminal.
    #[must_use]
    pub fn repeat_forever(value: T) -> Self {
        Self::from_factory("repeat", move || Ok(boxed_iter(iter::repeat(value.clone()))))
    }

    /// A generated source: `factory` is called once per pass and must return a
    /// fresh iterator positioned at the beginning.
    ///
    /// The iterator may be infinite.
    #[must_use]
    pub fn generate<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_factory("generate", move || Ok(boxed_iter(factory().into_iter())))
    }

    /// Wrap a raw cursor factory.
    ///
    /// The factory is the nullary "give me a fresh cursor" function of the
    /// pull protocol; it is invoked once per pass.
    #[must_use]
    pub fn from_cursor_fn<F>(factory: F) -> Self
    where
        F: Fn() -> BoxCursor<T> + 'static,
    {
        Self::from_factory("cursor", move || Ok(factory()))
    }
}

impl Query<i64> {
    /// `count` consecutive integers starting at `start`.
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidArgument`] if the last value would overflow
    /// `i64`.
    ///
    /// ```
    /// use ironseq::Query;
    /// assert_eq!(Query::range(3, 4)?.to_vec()?, vec![3, 4, 5, 6]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    pub fn range(start: i64, count: usize) -> Result<Self> {
        let fits = count == 0
            || i64::try_from(count - 1)
                .ok()
                .and_then(|c| start.checked_add(c))
                .is_some();
        if !fits {
            return Err(QueryError::InvalidArgument(format!(
                "range of {count} values from {start} overflows i64"
            )));
        }
        Ok(Self::from_factory_with_len("range", Some(count), move || {
            Ok(boxed_iter((0..count).map(move |i| start + i as i64)))
        }))
    }
}
