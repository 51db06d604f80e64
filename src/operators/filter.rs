//! Filtering operators: `filter`, `filter_indexed`, `try_filter`.
//!
//! Each cursor pulls upstream until it finds an element the predicate accepts
//! or the upstream ends. The index handed to indexed predicates counts every
//! element *examined*, so it is the element's position in the source, not in
//! the output.

use crate::cursor::{BoxCursor, Cursor};
use crate::error::Result;
use crate::query::{Element, Query};
use std::rc::Rc;

struct FilterCursor<T, P> {
    upstream: BoxCursor<T>,
    pred: Rc<P>,
    index: usize,
}

impl<T, P> Cursor<T> for FilterCursor<T, P>
where
    P: Fn(&T, usize) -> bool,
{
    fn advance(&mut self) -> Result<Option<T>> {
        while let Some(v) = self.upstream.advance()? {
            let i = self.index;
            self.index += 1;
            if (self.pred)(&v, i) {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

struct TryFilterCursor<T, P> {
    upstream: BoxCursor<T>,
    pred: Rc<P>,
}

impl<T, P> Cursor<T> for TryFilterCursor<T, P>
where
    P: Fn(&T) -> anyhow::Result<bool>,
{
    fn advance(&mut self) -> Result<Option<T>> {
        while let Some(v) = self.upstream.advance()? {
            if (self.pred)(&v)? {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

impl<T: Element> Query<T> {
    /// Keep elements matching `pred`.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let odd = Query::from_vec(vec![1, 2, 3, 4, 5]).filter(|n: &i32| n % 2 == 1);
    /// assert_eq!(odd.to_vec()?, vec![1, 3, 5]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn filter<P>(self, pred: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.filter_indexed(move |t, _| pred(t))
    }

    /// Keep elements matching `pred`, which also receives the element's source
    /// position.
    #[must_use]
    pub fn filter_indexed<P>(self, pred: P) -> Self
    where
        P: Fn(&T, usize) -> bool + 'static,
    {
        let pred = Rc::new(pred);
        Self::from_factory("filter", move || {
            Ok(Box::new(FilterCursor {
                upstream: self.cursor()?,
                pred: Rc::clone(&pred),
                index: 0,
            }) as BoxCursor<T>)
        })
    }

    /// Keep elements matching a fallible predicate.
    ///
    /// A predicate error ends the pass: it is returned from the pull that
    /// evaluated it as [`QueryError::Callback`](crate::QueryError::Callback).
    #[must_use]
    pub fn try_filter<P>(self, pred: P) -> Self
    where
        P: Fn(&T) -> anyhow::Result<bool> + 'static,
    {
        let pred = Rc::new(pred);
        Self::from_factory("try_filter", move || {
            Ok(Box::new(TryFilterCursor {
                upstream: self.cursor()?,
                pred: Rc::clone(&pred),
            }) as BoxCursor<T>)
        })
    }
}
