//! Current / MoveNext / Reset style adapter over a cursor.
//!
//! Some callers expect an enumerator that exposes the last value read and a
//! boolean "advance" call. [`LegacyCursor`] provides that shape on top of the
//! pull protocol. Cursors are forward-only, so [`LegacyCursor::reset`] always
//! fails with [`QueryError::Unsupported`]; obtain a new cursor from the query
//! instead.

use crate::cursor::BoxCursor;
use crate::error::{QueryError, Result};
use crate::query::{Element, Query};
use tracing::debug;

pub struct LegacyCursor<T> {
    cursor: BoxCursor<T>,
    current: Option<T>,
}

impl<T> LegacyCursor<T> {
    pub fn new(cursor: BoxCursor<T>) -> Self {
        Self {
            cursor,
            current: None,
        }
    }

    /// The value read by the last successful [`move_next`](Self::move_next);
    /// `None` before the first call, after the end, and after a failed call.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Advance; returns whether a value was produced.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn move_next(&mut self) -> Result<bool> {
        self.current = None;
        self.current = self.cursor.advance()?;
        Ok(self.current.is_some())
    }

    /// Always fails: cursors cannot be rewound.
    ///
    /// # Errors
    /// Always returns [`QueryError::Unsupported`].
    pub fn reset(&mut self) -> Result<()> {
        debug!("reset requested on a forward-only cursor");
        Err(QueryError::Unsupported("resetting a cursor"))
    }
}

impl<T: Element> Query<T> {
    /// Open a fresh cursor wrapped in the Current/MoveNext/Reset adapter.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let mut e = Query::from_vec(vec![1, 2]).legacy_cursor()?;
    /// assert!(e.move_next()?);
    /// assert_eq!(e.current(), Some(&1));
    /// assert!(e.reset().is_err());
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    ///
    /// # Errors
    /// Returns an error if opening the cursor fails.
    pub fn legacy_cursor(&self) -> Result<LegacyCursor<T>> {
        Ok(LegacyCursor::new(self.cursor()?))
    }
}
