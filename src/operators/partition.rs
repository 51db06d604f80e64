//! Partitioning operators: `skip`, `take`, `skip_while`, `take_while`,
//! `default_if_empty`.
//!
//! `skip` is the one operator that does work when its cursor is opened: the
//! prefix is discarded eagerly, before the first pull. Its observable output is
//! the same as a lazy skip.

use crate::cursor::{BoxCursor, Cursor, boxed_iter};
use crate::error::Result;
use crate::query::{Element, Query};
use std::iter;
use std::rc::Rc;
use tracing::trace;

struct SkipWhileCursor<T, P> {
    upstream: BoxCursor<T>,
    pred: Rc<P>,
    index: usize,
    skipping: bool,
}

impl<T, P> Cursor<T> for SkipWhileCursor<T, P>
where
    P: Fn(&T, usize) -> bool,
{
    fn advance(&mut self) -> Result<Option<T>> {
        if !self.skipping {
            return self.upstream.advance();
        }
        while let Some(v) = self.upstream.advance()? {
            let i = self.index;
            self.index += 1;
            if !(self.pred)(&v, i) {
                self.skipping = false;
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

struct TakeWhileCursor<T, P> {
    upstream: BoxCursor<T>,
    pred: Rc<P>,
    index: usize,
    done: bool,
}

impl<T, P> Cursor<T> for TakeWhileCursor<T, P>
where
    P: Fn(&T, usize) -> bool,
{
    fn advance(&mut self) -> Result<Option<T>> {
        if self.done {
            return Ok(None);
        }
        let next = self.upstream.advance()?;
        let i = self.index;
        self.index += 1;
        match next {
            Some(v) if (self.pred)(&v, i) => Ok(Some(v)),
            _ => {
                self.done = true;
                Ok(None)
            }
        }
    }
}

enum DefaultPhase {
    Unstarted,
    PassThrough,
    Done,
}

/// Decides empty vs. non-empty exactly once, on the first pull.
struct DefaultIfEmptyCursor<T> {
    upstream: BoxCursor<T>,
    default: Option<T>,
    phase: DefaultPhase,
}

impl<T> Cursor<T> for DefaultIfEmptyCursor<T> {
    fn advance(&mut self) -> Result<Option<T>> {
        match self.phase {
            DefaultPhase::PassThrough => self.upstream.advance(),
            DefaultPhase::Done => Ok(None),
            DefaultPhase::Unstarted => match self.upstream.advance()? {
                Some(v) => {
                    self.phase = DefaultPhase::PassThrough;
                    Ok(Some(v))
                }
                None => {
                    self.phase = DefaultPhase::Done;
                    Ok(self.default.take())
                }
            },
        }
    }
}

impl<T: Element> Query<T> {
    /// Drop the first `n` elements.
    ///
    /// The prefix is consumed when the cursor is opened, not on first pull.
    #[must_use]
    pub fn skip(self, n: usize) -> Self {
        Self::from_factory("skip", move || {
            let mut cursor = self.cursor()?;
            for discarded in 0..n {
                if cursor.advance()?.is_none() {
                    trace!(requested = n, discarded, "skip exhausted upstream");
                    return Ok(boxed_iter(iter::empty()));
                }
            }
            trace!(discarded = n, "skip discarded prefix");
            Ok(cursor)
        })
    }

    /// Keep at most the first `n` elements.
    ///
    /// Expressed as `take_while(|_, i| i < n)`, so the element at position `n`
    /// is pulled (and discarded) before the cursor reports the end.
    #[must_use]
    pub fn take(self, n: usize) -> Self {
        self.take_while(move |_, i| i < n)
    }

    /// Drop elements while `pred(value, index)` holds, then pass everything
    /// through.
    #[must_use]
    pub fn skip_while<P>(self, pred: P) -> Self
    where
        P: Fn(&T, usize) -> bool + 'static,
    {
        let pred = Rc::new(pred);
        Self::from_factory("skip_while", move || {
            Ok(Box::new(SkipWhileCursor {
                upstream: self.cursor()?,
                pred: Rc::clone(&pred),
                index: 0,
                skipping: true,
            }) as BoxCursor<T>)
        })
    }

    /// Emit elements while `pred(value, index)` holds; stop at the first
    /// failure.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let q = Query::generate(|| 1..).take_while(|n: &i32, _| *n < 4);
    /// assert_eq!(q.to_vec()?, vec![1, 2, 3]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn take_while<P>(self, pred: P) -> Self
    where
        P: Fn(&T, usize) -> bool + 'static,
    {
        let pred = Rc::new(pred);
        Self::from_factory("take_while", move || {
            Ok(Box::new(TakeWhileCursor {
                upstream: self.cursor()?,
                pred: Rc::clone(&pred),
                index: 0,
                done: false,
            }) as BoxCursor<T>)
        })
    }

    /// Emit `default` once if the sequence is empty; otherwise pass it through
    /// unchanged.
    #[must_use]
    pub fn default_if_empty(self, default: T) -> Self {
        Self::from_factory("default_if_empty", move || {
            Ok(Box::new(DefaultIfEmptyCursor {
                upstream: self.cursor()?,
                default: Some(default.clone()),
                phase: DefaultPhase::Unstarted,
            }) as BoxCursor<T>)
        })
    }
}
