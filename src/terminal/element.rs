//! Single-element extraction: `first`, `last`, `single`, `element_at` and
//! their `_or_default` forms.
//!
//! Predicate-less forms fail with [`QueryError::EmptySequence`] on empty
//! input; `_where` forms fail with [`QueryError::NoMatch`] when nothing
//! satisfies the predicate. The `_or_default` forms return `T::default()`
//! instead of failing on "not found", but `single*_or_default` still fails with
//! [`QueryError::MultipleMatch`].

use crate::cursor::BoxCursor;
use crate::error::{QueryError, Result};
use crate::query::{Element, Query};

/// Outcome of scanning for elements satisfying a predicate.
enum Found<T> {
    None,
    One(T),
    Many,
}

fn find_first<T>(cursor: &mut BoxCursor<T>, pred: impl Fn(&T) -> bool) -> Result<Option<T>> {
    while let Some(v) = cursor.advance()? {
        if pred(&v) {
            return Ok(Some(v));
        }
    }
    Ok(None)
}

fn find_last<T>(cursor: &mut BoxCursor<T>, pred: impl Fn(&T) -> bool) -> Result<Option<T>> {
    let mut last = None;
    while let Some(v) = cursor.advance()? {
        if pred(&v) {
            last = Some(v);
        }
    }
    Ok(last)
}

/// Stops scanning at the second match.
fn find_single<T>(cursor: &mut BoxCursor<T>, pred: impl Fn(&T) -> bool) -> Result<Found<T>> {
    let Some(found) = find_first(cursor, &pred)? else {
        return Ok(Found::None);
    };
    if find_first(cursor, &pred)?.is_some() {
        return Ok(Found::Many);
    }
    Ok(Found::One(found))
}

impl<T: Element> Query<T> {
    /// First element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if the sequence is empty.
    pub fn first(&self) -> Result<T> {
        self.cursor()?.advance()?.ok_or(QueryError::EmptySequence)
    }

    /// First element satisfying `pred`.
    ///
    /// # Errors
    /// [`QueryError::NoMatch`] if no element satisfies `pred`.
    pub fn first_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        find_first(&mut self.cursor()?, pred)?.ok_or(QueryError::NoMatch)
    }

    /// Last element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if the sequence is empty.
    pub fn last(&self) -> Result<T> {
        find_last(&mut self.cursor()?, |_| true)?.ok_or(QueryError::EmptySequence)
    }

    /// Last element satisfying `pred`.
    ///
    /// # Errors
    /// [`QueryError::NoMatch`] if no element satisfies `pred`.
    pub fn last_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        find_last(&mut self.cursor()?, pred)?.ok_or(QueryError::NoMatch)
    }

    /// The only element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if empty, [`QueryError::MultipleMatch`] if
    /// there is more than one element.
    pub fn single(&self) -> Result<T> {
        match find_single(&mut self.cursor()?, |_| true)? {
            Found::One(v) => Ok(v),
            Found::None => Err(QueryError::EmptySequence),
            Found::Many => Err(QueryError::MultipleMatch),
        }
    }

    /// The only element satisfying `pred`.
    ///
    /// # Errors
    /// [`QueryError::NoMatch`] if none matches, [`QueryError::MultipleMatch`]
    /// if more than one does.
    pub fn single_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        match find_single(&mut self.cursor()?, pred)? {
            Found::One(v) => Ok(v),
            Found::None => Err(QueryError::NoMatch),
            Found::Many => Err(QueryError::MultipleMatch),
        }
    }

    /// Element at a zero-based position.
    ///
    /// The index is signed so that negative positions are reported as out of
    /// range rather than being unrepresentable.
    ///
    /// # Errors
    /// [`QueryError::IndexOutOfRange`] if `index` is negative or not less than
    /// the number of elements.
    pub fn element_at(&self, index: isize) -> Result<T> {
        self.try_element_at(index)?
            .ok_or(QueryError::IndexOutOfRange { index })
    }

    fn try_element_at(&self, index: isize) -> Result<Option<T>> {
        let Ok(skip) = usize::try_from(index) else {
            return Ok(None);
        };
        let mut cursor = self.cursor()?;
        for _ in 0..skip {
            if cursor.advance()?.is_none() {
                return Ok(None);
            }
        }
        cursor.advance()
    }
}

impl<T: Element + Default> Query<T> {
    /// First element, or `T::default()` if empty.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn first_or_default(&self) -> Result<T> {
        Ok(self.cursor()?.advance()?.unwrap_or_default())
    }

    /// First element satisfying `pred`, or `T::default()`.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn first_where_or_default<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        Ok(find_first(&mut self.cursor()?, pred)?.unwrap_or_default())
    }

    /// Last element, or `T::default()` if empty.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn last_or_default(&self) -> Result<T> {
        Ok(find_last(&mut self.cursor()?, |_| true)?.unwrap_or_default())
    }

    /// Last element satisfying `pred`, or `T::default()`.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn last_where_or_default<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        Ok(find_last(&mut self.cursor()?, pred)?.unwrap_or_default())
    }

    /// The only element, or `T::default()` if empty.
    ///
    /// # Errors
    /// [`QueryError::MultipleMatch`] if there is more than one element.
    pub fn single_or_default(&self) -> Result<T> {
        self.single_where_or_default(|_| true)
    }

    /// The only element satisfying `pred`, or `T::default()` if none does.
    ///
    /// # Errors
    /// [`QueryError::MultipleMatch`] if more than one element satisfies `pred`.
    pub fn single_where_or_default<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        match find_single(&mut self.cursor()?, pred)? {
            Found::One(v) => Ok(v),
            Found::None => Ok(T::default()),
            Found::Many => Err(QueryError::MultipleMatch),
        }
    }

    /// Element at `index`, or `T::default()` when out of range.
    ///
    /// # Errors
    /// Propagates errors raised by upstream stages.
    pub fn element_at_or_default(&self, index: isize) -> Result<T> {
        Ok(self.try_element_at(index)?.unwrap_or_default())
    }
}
