use crate::cursor::{BoxCursor, CursorIter, IntoCursor};
use crate::error::Result;
use crate::node::{FnNode, SequenceOperator};
use crate::operators::order::SortState;
use std::fmt;
use std::rc::Rc;

/// Bound shared by every element flowing through a query.
///
/// Nodes are restartable, so sources hand out a fresh copy of each element per
/// pass; hence `Clone`. Cursors own their upstream, hence `'static`.
pub trait Element: 'static + Clone {}
impl<T> Element for T where T: 'static + Clone {}

/// A lazily evaluated, restartable pipeline of sequence operators.
///
/// Building a `Query` does no work. Each call to [`cursor`](Query::cursor) or
/// [`iter`](Query::iter) starts an independent pass over the upstream source;
/// terminal operations (`to_vec`, `count`, `first`, ...) open a cursor and drain
/// it as far as they need to.
///
/// Cloning a `Query` is cheap: nodes are shared behind `Rc` and never mutated,
/// with the exception of the sort cache held by ordering nodes.
///
/// ```
/// use ironseq::Query;
///
/// let evens = Query::range(0, 10)?
///     .filter(|n: &i64| n % 2 == 0)
///     .map(|n: &i64| n * 10);
///
/// assert_eq!(evens.to_vec()?, vec![0, 20, 40, 60, 80]);
/// // a second pass re-reads the source
/// assert_eq!(evens.count()?, 5);
/// # Ok::<(), ironseq::QueryError>(())
/// ```
pub struct Query<T> {
    pub(crate) node: Rc<dyn SequenceOperator<T>>,
    /// Present only on queries produced by an ordering operator, so that
    /// `then_by` can compose onto the existing comparator.
    pub(crate) order: Option<SortState<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
            order: self.order.clone(),
        }
    }
}

impl<T: Element> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("node", &self.node.name())
            .field("ordered", &self.order.is_some())
            .finish()
    }
}

impl<T: Element> Query<T> {
    pub(crate) fn from_node<N>(node: N) -> Self
    where
        N: SequenceOperator<T>,
    {
        Self {
            node: Rc::new(node),
            order: None,
        }
    }

    /// Wrap a caller-defined [`SequenceOperator`] as the source of a new query.
    ///
    /// Every call to [`cursor`](Query::cursor) on the result calls
    /// [`open`](SequenceOperator::open) on the node.
    ///
    /// # Example
    /// ```
    /// use ironseq::{BoxCursor, IterCursor, Query, SequenceOperator};
    ///
    /// struct Digits;
    ///
    /// impl SequenceOperator<u8> for Digits {
    ///     fn open(&self) -> ironseq::Result<BoxCursor<u8>> {
    ///         Ok(Box::new(IterCursor::new(0u8..10)))
    ///     }
    ///
    ///     fn known_len(&self) -> Option<usize> {
    ///         Some(10)
    ///     }
    ///
    ///     fn name(&self) -> &'static str {
    ///         "digits"
    ///     }
    /// }
    ///
    /// let q = Query::from_operator(Digits);
    /// assert_eq!(q.known_len(), Some(10));
    /// assert_eq!(q.filter(|d| d % 4 == 0).to_vec()?, vec![0, 4, 8]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    pub fn from_operator<N>(node: N) -> Self
    where
        N: SequenceOperator<T>,
    {
        Self::from_node(node)
    }

    /// Wrap a cursor factory as a new unordered stage.
    pub(crate) fn from_factory<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> Result<BoxCursor<T>> + 'static,
    {
        Self::from_node(FnNode::new(name, factory))
    }

    /// Like [`from_factory`](Self::from_factory), with a length known up front.
    pub(crate) fn from_factory_with_len<F>(
        name: &'static str,
        len: Option<usize>,
        factory: F,
    ) -> Self
    where
        F: Fn() -> Result<BoxCursor<T>> + 'static,
    {
        Self::from_node(FnNode::new(name, factory).with_len(len))
    }

    /// Open a fresh cursor over this query.
    ///
    /// # Errors
    /// Returns an error if eager work done while opening fails (for example the
    /// discarded prefix of `skip`).
    pub fn cursor(&self) -> Result<BoxCursor<T>> {
        self.node.open()
    }

    /// Iterate this query as `Result<T>` items.
    ///
    /// The iterator stops after the first error.
    #[must_use]
    pub fn iter(&self) -> CursorIter<T> {
        match self.cursor() {
            Ok(c) => CursorIter::new(c),
            Err(e) => CursorIter::failed(e),
        }
    }

    /// Number of elements, if the node knows it without scanning.
    #[must_use]
    pub fn known_len(&self) -> Option<usize> {
        self.node.known_len()
    }

    /// Whether this query is the direct output of an ordering operator.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.order.is_some()
    }
}

impl<T: Element> IntoCursor<T> for Query<T> {
    fn into_cursor(self) -> Result<BoxCursor<T>> {
        self.cursor()
    }
}
