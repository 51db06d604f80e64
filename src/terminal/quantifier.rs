use crate::error::Result;
use crate::query::{Element, Query};

impl<T: Element> Query<T> {
    /// Whether every element satisfies `pred`. Stops at the first failure;
    /// `true` for an empty sequence.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn all<P>(&self, pred: P) -> Result<bool>
    where
        P: Fn(&T) -> bool,
    {
        let mut cursor = self.cursor()?;
        while let Some(v) = cursor.advance()? {
            if !pred(&v) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether the sequence has at least one element. Pulls at most one.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn any(&self) -> Result<bool> {
        Ok(self.cursor()?.advance()?.is_some())
    }

    /// Whether any element satisfies `pred`. Stops at the first match.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn any_where<P>(&self, pred: P) -> Result<bool>
    where
        P: Fn(&T) -> bool,
    {
        self.all(|v| !pred(v)).map(|none| !none)
    }
}

impl<T: Element + PartialEq> Query<T> {
    /// Whether `value` occurs in the sequence.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn contains(&self, value: &T) -> Result<bool> {
        self.any_where(|v| v == value)
    }

    /// Whether both sequences have equal elements in the same order and the
    /// same length.
    ///
    /// # Errors
    /// Propagates errors raised by either sequence.
    pub fn sequence_equal(&self, other: &Query<T>) -> Result<bool> {
        let mut a = self.cursor()?;
        let mut b = other.cursor()?;
        loop {
            match (a.advance()?, b.advance()?) {
                (None, None) => return Ok(true),
                (Some(x), Some(y)) if x == y => {}
                _ => return Ok(false),
            }
        }
    }
}
