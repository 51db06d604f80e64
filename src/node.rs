//! Restartable pipeline stages.
//!
//! A [`Query`](crate::Query) is a handle to one [`SequenceOperator`]; opening
//! the operator yields a fresh cursor for one pass.

use crate::cursor::BoxCursor;
use crate::error::Result;

/// A restartable pipeline stage.
///
/// A node is an immutable description of how to produce a cursor. Every call to
/// [`open`](SequenceOperator::open) must return an independent cursor that
/// re-reads the upstream data from its beginning. The ordering node is the one
/// sanctioned exception: after its first realization it streams a cached,
/// sorted buffer instead of re-sorting.
pub trait SequenceOperator<T>: 'static {
    /// Produce a fresh cursor.
    ///
    /// Most operators defer all work to the first `advance()`; `skip` is the
    /// exception and discards its prefix here.
    ///
    /// # Errors
    /// Returns any error raised by eager work performed while opening.
    fn open(&self) -> Result<BoxCursor<T>>;

    /// Number of elements this node will produce, when known without a scan.
    fn known_len(&self) -> Option<usize> {
        None
    }

    /// Short operator name used in trace events.
    fn name(&self) -> &'static str;
}

/// A node backed by a cursor factory closure.
///
/// Most operators need nothing beyond "capture upstream and callbacks, build a
/// cursor struct on demand", so they are expressed through this type rather
/// than a dedicated node struct.
pub(crate) struct FnNode<F> {
    name: &'static str,
    factory: F,
    len: Option<usize>,
}

impl<F> FnNode<F> {
    pub(crate) fn new(name: &'static str, factory: F) -> Self {
        Self {
            name,
            factory,
            len: None,
        }
    }

    pub(crate) fn with_len(mut self, len: Option<usize>) -> Self {
        self.len = len;
        self
    }
}

impl<T, F> SequenceOperator<T> for FnNode<F>
where
    F: Fn() -> Result<BoxCursor<T>> + 'static,
{
    fn open(&self) -> Result<BoxCursor<T>> {
        (self.factory)()
    }

    fn known_len(&self) -> Option<usize> {
        self.len
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
