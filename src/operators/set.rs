//! Hash-backed set operators: `distinct`, `union`, `intersect`, `except`.
//!
//! All four compare elements by a projected key (`*_by` variants) or by the
//! element itself. Output always carries the element, never the key, and keeps
//! first-occurrence order from the first sequence.
//!
//! Key sets are owned by the cursor that builds them and dropped with it, so
//! every pass starts from an empty set.

use crate::cursor::{BoxCursor, Cursor};
use crate::error::Result;
use crate::query::{Element, Query};
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;
use tracing::trace;

struct DistinctCursor<T, K, F> {
    upstream: BoxCursor<T>,
    key: Rc<F>,
    seen: HashSet<K>,
}

impl<T, K, F> Cursor<T> for DistinctCursor<T, K, F>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    fn advance(&mut self) -> Result<Option<T>> {
        while let Some(v) = self.upstream.advance()? {
            if self.seen.insert((self.key)(&v)) {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

#[derive(Clone, Copy, Debug)]
enum Membership {
    /// Emit keys present in the other sequence.
    Intersect,
    /// Emit keys absent from the other sequence.
    Except,
}

/// Cursor for `intersect`/`except`.
///
/// On first pull the other sequence is drained into a key set. Emitted keys
/// are then removed from (intersect) or added to (except) that set, which
/// suppresses duplicates within the first sequence.
struct ProbeCursor<T, K, F> {
    first: BoxCursor<T>,
    other: Query<T>,
    key: Rc<F>,
    mode: Membership,
    keys: Option<HashSet<K>>,
}

impl<T, K, F> Cursor<T> for ProbeCursor<T, K, F>
where
    T: Element,
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    fn advance(&mut self) -> Result<Option<T>> {
        let keys = match &mut self.keys {
            Some(keys) => keys,
            None => {
                let mut keys = HashSet::new();
                let mut other = self.other.cursor()?;
                while let Some(v) = other.advance()? {
                    keys.insert((self.key)(&v));
                }
                trace!(mode = ?self.mode, keys = keys.len(), "built probe key set");
                self.keys.insert(keys)
            }
        };
        while let Some(v) = self.first.advance()? {
            let k = (self.key)(&v);
            let emit = match self.mode {
                Membership::Intersect => keys.remove(&k),
                Membership::Except => keys.insert(k),
            };
            if emit {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

impl<T: Element> Query<T> {
    /// Remove duplicate elements by a projected key, keeping the first
    /// occurrence of each key.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let q = Query::from_vec(vec!["apple", "avocado", "banana"])
    ///     .distinct_by(|s: &&str| s.chars().next());
    /// assert_eq!(q.to_vec()?, vec!["apple", "banana"]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn distinct_by<K, F>(self, key: F) -> Self
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let key = Rc::new(key);
        Self::from_factory("distinct", move || {
            Ok(Box::new(DistinctCursor {
                upstream: self.cursor()?,
                key: Rc::clone(&key),
                seen: HashSet::new(),
            }) as BoxCursor<T>)
        })
    }

    /// Distinct elements of both sequences by a projected key, in order of first
    /// occurrence across `self` then `second`.
    #[must_use]
    pub fn union_by<K, F>(self, second: Query<T>, key: F) -> Self
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.concat(second).distinct_by(key)
    }

    /// Elements of `self` whose key also occurs in `other`, each key once.
    #[must_use]
    pub fn intersect_by<K, F>(self, other: Query<T>, key: F) -> Self
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.probe(other, key, Membership::Intersect)
    }

    /// Elements of `self` whose key does not occur in `other`, each key once.
    #[must_use]
    pub fn except_by<K, F>(self, other: Query<T>, key: F) -> Self
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.probe(other, key, Membership::Except)
    }

    fn probe<K, F>(self, other: Query<T>, key: F, mode: Membership) -> Self
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let key = Rc::new(key);
        let name = match mode {
            Membership::Intersect => "intersect",
            Membership::Except => "except",
        };
        Self::from_factory(name, move || {
            Ok(Box::new(ProbeCursor {
                first: self.cursor()?,
                other: other.clone(),
                key: Rc::clone(&key),
                mode,
                keys: None,
            }) as BoxCursor<T>)
        })
    }
}

impl<T: Element + Hash + Eq> Query<T> {
    /// Remove duplicate elements, keeping first-occurrence order.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let q = Query::from_vec(vec![0, 0, 1, 3, 5, 6, 5, 7, 8, 8]).distinct();
    /// assert_eq!(q.to_vec()?, vec![0, 1, 3, 5, 6, 7, 8]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn distinct(self) -> Self {
        self.distinct_by(T::clone)
    }

    /// Set union: distinct elements of `self` followed by unseen elements of
    /// `second`.
    #[must_use]
    pub fn union(self, second: Query<T>) -> Self {
        self.union_by(second, T::clone)
    }

    /// Set intersection, de-duplicated, in the order of `self`.
    #[must_use]
    pub fn intersect(self, other: Query<T>) -> Self {
        self.intersect_by(other, T::clone)
    }

    /// Set difference, de-duplicated, in the order of `self`.
    #[must_use]
    pub fn except(self, other: Query<T>) -> Self {
        self.except_by(other, T::clone)
    }
}
