//! Buffered sort: `order_by`, `order_by_descending`, `then_by`,
//! `then_by_descending` and their comparator forms.
//!
//! An ordering node does nothing until its first cursor is pulled. That pull
//! drains the upstream into a buffer, sorts it (stable) with the composed
//! comparator, and caches the sorted buffer **on the node**. Later cursors of
//! the same node stream the cached buffer instead of sorting again, so an
//! ordering node is stateful after first use.
//!
//! `then_by*` wraps the current comparator so that later keys only break ties
//! of earlier ones. Called on a query that is not the direct output of an
//! ordering operator, it starts a new primary sort.

use crate::cursor::{BoxCursor, Cursor};
use crate::error::Result;
use crate::node::SequenceOperator;
use crate::query::{Element, Query};
use crate::sources::slice_cursor;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;
use tracing::trace;

pub(crate) type Comparer<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

type SortCache<T> = Rc<RefCell<Option<Rc<[T]>>>>;

/// Carried by ordered queries: the unsorted source and the comparator so far.
pub(crate) struct SortState<T> {
    source: Rc<dyn SequenceOperator<T>>,
    comparer: Comparer<T>,
}

impl<T> Clone for SortState<T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
            comparer: Rc::clone(&self.comparer),
        }
    }
}

struct OrderedNode<T> {
    source: Rc<dyn SequenceOperator<T>>,
    comparer: Comparer<T>,
    cache: SortCache<T>,
}

impl<T: Element> SequenceOperator<T> for OrderedNode<T> {
    fn open(&self) -> Result<BoxCursor<T>> {
        Ok(Box::new(SortCursor {
            source: Rc::clone(&self.source),
            comparer: Rc::clone(&self.comparer),
            cache: Rc::clone(&self.cache),
            phase: SortPhase::Unrealized,
        }))
    }

    fn known_len(&self) -> Option<usize> {
        self.source.known_len()
    }

    fn name(&self) -> &'static str {
        "order_by"
    }
}

enum SortPhase<T> {
    Unrealized,
    Streaming(BoxCursor<T>),
}

struct SortCursor<T> {
    source: Rc<dyn SequenceOperator<T>>,
    comparer: Comparer<T>,
    cache: SortCache<T>,
    phase: SortPhase<T>,
}

impl<T: Element> SortCursor<T> {
    fn realize(&self) -> Result<Rc<[T]>> {
        if let Some(buffer) = self.cache.borrow().as_ref() {
            trace!(len = buffer.len(), "streaming cached sort buffer");
            return Ok(Rc::clone(buffer));
        }
        let mut items = Vec::new();
        let mut upstream = self.source.open()?;
        while let Some(v) = upstream.advance()? {
            items.push(v);
        }
        let cmp = &self.comparer;
        items.sort_by(|a, b| cmp(a, b));
        trace!(len = items.len(), "sorted buffer realized");
        let buffer: Rc<[T]> = items.into();
        *self.cache.borrow_mut() = Some(Rc::clone(&buffer));
        Ok(buffer)
    }
}

impl<T: Element> Cursor<T> for SortCursor<T> {
    fn advance(&mut self) -> Result<Option<T>> {
        if let SortPhase::Unrealized = self.phase {
            self.phase = SortPhase::Streaming(slice_cursor(self.realize()?));
        }
        match &mut self.phase {
            SortPhase::Streaming(cursor) => cursor.advance(),
            SortPhase::Unrealized => Ok(None),
        }
    }
}

impl<T: Element> Query<T> {
    fn ordered(source: Rc<dyn SequenceOperator<T>>, comparer: Comparer<T>) -> Self {
        let node = OrderedNode {
            source: Rc::clone(&source),
            comparer: Rc::clone(&comparer),
            cache: Rc::new(RefCell::new(None)),
        };
        Self {
            node: Rc::new(node),
            order: Some(SortState { source, comparer }),
        }
    }

    /// Sort ascending by a key.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let q = Query::from_vec(vec!["ccc", "a", "bb"]).order_by(|s: &&str| s.len());
    /// assert_eq!(q.to_vec()?, vec!["a", "bb", "ccc"]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn order_by<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.order_by_cmp(move |a, b| key(a).cmp(&key(b)))
    }

    /// Sort descending by a key. Ties keep source order.
    #[must_use]
    pub fn order_by_descending<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.order_by_cmp(move |a, b| key(b).cmp(&key(a)))
    }

    /// Sort with an explicit comparator.
    #[must_use]
    pub fn order_by_cmp<F>(self, cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::ordered(self.node, Rc::new(cmp))
    }

    /// Break ties of the current ordering by an ascending key.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let q = Query::from_vec(vec!["bb", "b", "ab", "a"])
    ///     .order_by(|s: &&str| s.len())
    ///     .then_by(|s: &&str| s.to_string());
    /// assert_eq!(q.to_vec()?, vec!["a", "b", "ab", "bb"]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn then_by<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.then_by_cmp(move |a, b| key(a).cmp(&key(b)))
    }

    /// Break ties of the current ordering by a descending key.
    #[must_use]
    pub fn then_by_descending<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.then_by_cmp(move |a, b| key(b).cmp(&key(a)))
    }

    /// Break ties of the current ordering with an explicit comparator.
    #[must_use]
    pub fn then_by_cmp<F>(self, cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        match self.order {
            Some(SortState { source, comparer }) => {
                let composed: Comparer<T> =
                    Rc::new(move |a: &T, b: &T| comparer(a, b).then_with(|| cmp(a, b)));
                Self::ordered(source, composed)
            }
            None => self.order_by_cmp(cmp),
        }
    }
}
