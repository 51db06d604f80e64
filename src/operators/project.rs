//! Projection operators: `map`, `select_many`, `zip`, `concat`.

use crate::cursor::{BoxCursor, Cursor, IntoCursor};
use crate::error::Result;
use crate::query::{Element, Query};
use std::rc::Rc;

struct MapCursor<T, F> {
    upstream: BoxCursor<T>,
    f: Rc<F>,
    index: usize,
}

impl<T, U, F> Cursor<U> for MapCursor<T, F>
where
    F: Fn(&T, usize) -> U,
{
    fn advance(&mut self) -> Result<Option<U>> {
        let Some(v) = self.upstream.advance()? else {
            return Ok(None);
        };
        let i = self.index;
        self.index += 1;
        Ok(Some((self.f)(&v, i)))
    }
}

struct TryMapCursor<T, F> {
    upstream: BoxCursor<T>,
    f: Rc<F>,
}

impl<T, U, F> Cursor<U> for TryMapCursor<T, F>
where
    F: Fn(&T) -> anyhow::Result<U>,
{
    fn advance(&mut self) -> Result<Option<U>> {
        match self.upstream.advance()? {
            Some(v) => Ok(Some((self.f)(&v)?)),
            None => Ok(None),
        }
    }
}

type InnerSelector<T, C> = Rc<dyn Fn(&T) -> Result<BoxCursor<C>>>;

enum FlattenPhase<T, C> {
    NeedOuter,
    Inner { outer: T, inner: BoxCursor<C> },
    Finished,
}

/// Two-level cursor: the outer side advances only once the current inner
/// cursor is exhausted. Empty inner sequences are skipped without a gap.
struct SelectManyCursor<T, C, F> {
    upstream: BoxCursor<T>,
    selector: InnerSelector<T, C>,
    result: Rc<F>,
    phase: FlattenPhase<T, C>,
}

impl<T, C, R, F> Cursor<R> for SelectManyCursor<T, C, F>
where
    F: Fn(&T, C) -> R,
{
    fn advance(&mut self) -> Result<Option<R>> {
        loop {
            match &mut self.phase {
                FlattenPhase::Inner { outer, inner } => {
                    if let Some(c) = inner.advance()? {
                        return Ok(Some((self.result)(outer, c)));
                    }
                    self.phase = FlattenPhase::NeedOuter;
                }
                FlattenPhase::NeedOuter => match self.upstream.advance()? {
                    Some(outer) => {
                        let inner = (self.selector)(&outer)?;
                        self.phase = FlattenPhase::Inner { outer, inner };
                    }
                    None => {
                        self.phase = FlattenPhase::Finished;
                        return Ok(None);
                    }
                },
                FlattenPhase::Finished => return Ok(None),
            }
        }
    }
}

struct ZipCursor<T, U, F> {
    first: BoxCursor<T>,
    second: BoxCursor<U>,
    combine: Rc<F>,
}

impl<T, U, R, F> Cursor<R> for ZipCursor<T, U, F>
where
    F: Fn(&T, &U) -> R,
{
    fn advance(&mut self) -> Result<Option<R>> {
        let a = self.first.advance()?;
        let b = self.second.advance()?;
        match (a, b) {
            (Some(a), Some(b)) => Ok(Some((self.combine)(&a, &b))),
            _ => Ok(None),
        }
    }
}

impl<T: Element> Query<T> {
    /// Transform each element.
    ///
    /// The known length of the upstream, if any, is preserved.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let q = Query::from_vec(vec![1, 2, 3]).map(|n: &i32| n * n);
    /// assert_eq!(q.to_vec()?, vec![1, 4, 9]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Query<U>
    where
        U: Element,
        F: Fn(&T) -> U + 'static,
    {
        self.map_indexed(move |t, _| f(t))
    }

    /// Transform each element with access to its source position.
    #[must_use]
    pub fn map_indexed<U, F>(self, f: F) -> Query<U>
    where
        U: Element,
        F: Fn(&T, usize) -> U + 'static,
    {
        let f = Rc::new(f);
        let len = self.known_len();
        Query::from_factory_with_len("map", len, move || {
            Ok(Box::new(MapCursor {
                upstream: self.cursor()?,
                f: Rc::clone(&f),
                index: 0,
            }) as BoxCursor<U>)
        })
    }

    /// Transform each element with a fallible function.
    ///
    /// The first failure is returned from the pull that produced it.
    #[must_use]
    pub fn try_map<U, F>(self, f: F) -> Query<U>
    where
        U: Element,
        F: Fn(&T) -> anyhow::Result<U> + 'static,
    {
        let f = Rc::new(f);
        Query::from_factory("try_map", move || {
            Ok(Box::new(TryMapCursor {
                upstream: self.cursor()?,
                f: Rc::clone(&f),
            }) as BoxCursor<U>)
        })
    }

    /// Flatten: each element maps to a collection (or sub-query) whose elements
    /// are emitted in order.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let q = Query::from_vec(vec![vec![1, 2], vec![], vec![3]])
    ///     .select_many(|v: &Vec<i32>| v.clone());
    /// assert_eq!(q.to_vec()?, vec![1, 2, 3]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn select_many<C, I, S>(self, selector: S) -> Query<C>
    where
        C: Element,
        I: IntoCursor<C>,
        S: Fn(&T) -> I + 'static,
    {
        self.select_many_with(selector, |_: &T, c: C| c)
    }

    /// Flatten with a result selector that sees the outer element alongside
    /// each inner element.
    #[must_use]
    pub fn select_many_with<C, I, R, S, F>(self, selector: S, result: F) -> Query<R>
    where
        C: Element,
        R: Element,
        I: IntoCursor<C>,
        S: Fn(&T) -> I + 'static,
        F: Fn(&T, C) -> R + 'static,
    {
        let selector: InnerSelector<T, C> = Rc::new(move |t: &T| selector(t).into_cursor());
        let result = Rc::new(result);
        Query::from_factory("select_many", move || {
            Ok(Box::new(SelectManyCursor {
                upstream: self.cursor()?,
                selector: Rc::clone(&selector),
                result: Rc::clone(&result),
                phase: FlattenPhase::NeedOuter,
            }) as BoxCursor<R>)
        })
    }

    /// Pair elements of two sequences positionally, stopping at the end of the
    /// shorter one.
    ///
    /// Each pull advances both inputs once, so the longer input is read one
    /// element past the last pair.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let q = Query::from_vec(vec![1, 2, 3, 4])
    ///     .zip(Query::from_vec(vec!["one", "two", "three"]), |n: &i32, w: &&str| format!("{n} {w}"));
    /// assert_eq!(q.count()?, 3);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn zip<U, R, F>(self, second: Query<U>, combine: F) -> Query<R>
    where
        U: Element,
        R: Element,
        F: Fn(&T, &U) -> R + 'static,
    {
        let combine = Rc::new(combine);
        Query::from_factory("zip", move || {
            Ok(Box::new(ZipCursor {
                first: self.cursor()?,
                second: second.cursor()?,
                combine: Rc::clone(&combine),
            }) as BoxCursor<R>)
        })
    }

    /// Append `other` after this sequence.
    #[must_use]
    pub fn concat(self, other: Query<T>) -> Self {
        Query::concat_all(vec![self, other])
    }

    /// Flatten a list of sequences, in order.
    #[must_use]
    pub fn concat_all(sources: Vec<Query<T>>) -> Self {
        Query::from_vec(sources).select_many(|q: &Query<T>| q.clone())
    }
}
