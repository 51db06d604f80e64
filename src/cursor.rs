//! The pull protocol every sequence stage speaks.
//!
//! A [`Cursor`] is a single-use, forward-only handle: each call to
//! [`Cursor::advance`] yields `Ok(Some(value))` for the next element,
//! `Ok(None)` once the sequence is exhausted, or an error raised while producing
//! the element. Once `Ok(None)` has been returned, callers must not rely on
//! further calls being meaningful.
//!
//! Cursors are produced on demand by [`SequenceOperator`](crate::node::SequenceOperator)
//! nodes; a [`Query`](crate::Query) can hand out any number of independent
//! cursors over the same logical pipeline.

use crate::error::Result;

/// Single-use pull handle over a sequence.
pub trait Cursor<T> {
    /// Produce the next element, or `None` at the end of the sequence.
    ///
    /// # Errors
    /// Propagates any error raised by an upstream stage or user callback.
    fn advance(&mut self) -> Result<Option<T>>;
}

/// A boxed, type-erased cursor. Every operator stores its upstream this way.
pub type BoxCursor<T> = Box<dyn Cursor<T>>;

impl<T> Cursor<T> for BoxCursor<T> {
    fn advance(&mut self) -> Result<Option<T>> {
        (**self).advance()
    }
}

/// Adapts any infallible iterator to the cursor protocol.
pub struct IterCursor<I>(I);

impl<I> IterCursor<I> {
    pub fn new(iter: I) -> Self {
        Self(iter)
    }
}

impl<I: Iterator> Cursor<I::Item> for IterCursor<I> {
    fn advance(&mut self) -> Result<Option<I::Item>> {
        Ok(self.0.next())
    }
}

/// Box an iterator as a cursor.
pub(crate) fn boxed_iter<I>(iter: I) -> BoxCursor<I::Item>
where
    I: Iterator + 'static,
{
    Box::new(IterCursor::new(iter))
}

/// Anything that can be opened as a fresh cursor.
///
/// Implemented for every [`IntoIterator`] whose iterator is `'static` (vectors,
/// ranges, arrays, option values) and for [`Query`](crate::Query) itself, so
/// `select_many` selectors may return either plain collections or sub-queries.
pub trait IntoCursor<T> {
    /// Open a cursor positioned before the first element.
    ///
    /// # Errors
    /// Returns any error raised while opening a sub-query (for example an
    /// eager `skip` prefix that failed).
    fn into_cursor(self) -> Result<BoxCursor<T>>;
}

impl<I> IntoCursor<I::Item> for I
where
    I: IntoIterator,
    I::IntoIter: 'static,
{
    fn into_cursor(self) -> Result<BoxCursor<I::Item>> {
        Ok(boxed_iter(self.into_iter()))
    }
}

/// Iterator view of a cursor, yielding `Result<T>` per element.
///
/// The iterator is fused on the first error: after yielding `Err`, it yields
/// `None`.
pub struct CursorIter<T> {
    cursor: BoxCursor<T>,
    finished: bool,
}

impl<T> CursorIter<T> {
    pub(crate) fn new(cursor: BoxCursor<T>) -> Self {
        Self {
            cursor,
            finished: false,
        }
    }

    /// Iterator that yields a single error, used when opening the cursor failed.
    pub(crate) fn failed(err: crate::QueryError) -> Self {
        Self::new(Box::new(Failed(Some(err))))
    }
}

impl<T> Iterator for CursorIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.cursor.advance() {
            Ok(Some(v)) => Some(Ok(v)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Cursor whose first pull surfaces a stored error.
struct Failed(Option<crate::QueryError>);

impl<T> Cursor<T> for Failed {
    fn advance(&mut self) -> Result<Option<T>> {
        match self.0.take() {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}
