//! Hash joins: `join`, `group_join` and their `try_*` forms.
//!
//! On the first pull the inner sequence is drained into a key→bucket lookup;
//! the outer sequence is then streamed against it.
//!
//! - `join` has inner-join semantics: one result per matching (outer, inner)
//!   pair, nothing for an outer element without matches.
//! - `group_join` emits one result per outer element together with its whole
//!   bucket. Outer elements with no bucket are skipped rather than paired with
//!   an empty slice.
//!
//! The `try_*` forms take an inner key selector returning `Option<K>`; a `None`
//! aborts the lookup build with [`QueryError::InvalidKey`].

use crate::cursor::{BoxCursor, Cursor};
use crate::error::{QueryError, Result};
use crate::query::{Element, Query};
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;
use tracing::trace;

type InnerKey<I, K> = Rc<dyn Fn(&I) -> Option<K>>;

/// Drain `inner` into a key→bucket lookup.
fn build_lookup<I, K>(inner: &Query<I>, key: &InnerKey<I, K>) -> Result<HashMap<K, Vec<I>>>
where
    I: Element,
    K: Hash + Eq,
{
    let mut lookup: HashMap<K, Vec<I>> = HashMap::new();
    let mut cursor = inner.cursor()?;
    let mut position = 0usize;
    while let Some(v) = cursor.advance()? {
        let k = key(&v).ok_or(QueryError::InvalidKey { position })?;
        lookup.entry(k).or_default().push(v);
        position += 1;
    }
    trace!(keys = lookup.len(), rows = position, "built join lookup");
    Ok(lookup)
}

struct JoinCursor<T, I, K, FO, FR> {
    outer: BoxCursor<T>,
    inner: Query<I>,
    outer_key: Rc<FO>,
    inner_key: InnerKey<I, K>,
    result: Rc<FR>,
    lookup: Option<HashMap<K, Vec<I>>>,
    /// Outer element being paired, its key, and the next bucket position.
    current: Option<(T, K, usize)>,
}

impl<T, I, K, R, FO, FR> Cursor<R> for JoinCursor<T, I, K, FO, FR>
where
    I: Element,
    K: Hash + Eq,
    FO: Fn(&T) -> K,
    FR: Fn(&T, &I) -> R,
{
    fn advance(&mut self) -> Result<Option<R>> {
        let lookup = match &mut self.lookup {
            Some(lookup) => lookup,
            None => self.lookup.insert(build_lookup(&self.inner, &self.inner_key)?),
        };
        loop {
            if let Some((outer, key, pos)) = &mut self.current {
                if let Some(inner) = lookup.get(key).and_then(|bucket| bucket.get(*pos)) {
                    *pos += 1;
                    return Ok(Some((self.result)(outer, inner)));
                }
                self.current = None;
            }
            let Some(outer) = self.outer.advance()? else {
                return Ok(None);
            };
            let key = (self.outer_key)(&outer);
            if lookup.contains_key(&key) {
                self.current = Some((outer, key, 0));
            }
        }
    }
}

struct GroupJoinCursor<T, I, K, FO, FR> {
    outer: BoxCursor<T>,
    inner: Query<I>,
    outer_key: Rc<FO>,
    inner_key: InnerKey<I, K>,
    result: Rc<FR>,
    lookup: Option<HashMap<K, Vec<I>>>,
}

impl<T, I, K, R, FO, FR> Cursor<R> for GroupJoinCursor<T, I, K, FO, FR>
where
    I: Element,
    K: Hash + Eq,
    FO: Fn(&T) -> K,
    FR: Fn(&T, &[I]) -> R,
{
    fn advance(&mut self) -> Result<Option<R>> {
        let lookup = match &mut self.lookup {
            Some(lookup) => lookup,
            None => self.lookup.insert(build_lookup(&self.inner, &self.inner_key)?),
        };
        while let Some(outer) = self.outer.advance()? {
            if let Some(bucket) = lookup.get(&(self.outer_key)(&outer)) {
                return Ok(Some((self.result)(&outer, bucket)));
            }
        }
        Ok(None)
    }
}

impl<T: Element> Query<T> {
    /// Inner hash join.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let owners = Query::from_vec(vec![("Terry", 1), ("Magnus", 2), ("Weiss", 3)]);
    /// let pets = Query::from_vec(vec![("Barley", 1), ("Boots", 1), ("Whiskers", 2)]);
    /// let rows = owners.join(
    ///     pets,
    ///     |o: &(&str, i32)| o.1,
    ///     |p: &(&str, i32)| p.1,
    ///     |o, p| format!("{} - {}", o.0, p.0),
    /// );
    /// assert_eq!(rows.to_vec()?, vec!["Terry - Barley", "Terry - Boots", "Magnus - Whiskers"]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn join<I, K, R, FO, FI, FR>(
        self,
        inner: Query<I>,
        outer_key: FO,
        inner_key: FI,
        result: FR,
    ) -> Query<R>
    where
        I: Element,
        K: Hash + Eq + 'static,
        R: Element,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        FR: Fn(&T, &I) -> R + 'static,
    {
        self.try_join(inner, outer_key, move |i: &I| Some(inner_key(i)), result)
    }

    /// Inner hash join with a partial inner key selector.
    ///
    /// An inner element whose key is `None` fails the pull that builds the
    /// lookup with [`QueryError::InvalidKey`].
    #[must_use]
    pub fn try_join<I, K, R, FO, FI, FR>(
        self,
        inner: Query<I>,
        outer_key: FO,
        inner_key: FI,
        result: FR,
    ) -> Query<R>
    where
        I: Element,
        K: Hash + Eq + 'static,
        R: Element,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&I) -> Option<K> + 'static,
        FR: Fn(&T, &I) -> R + 'static,
    {
        let outer_key = Rc::new(outer_key);
        let inner_key: InnerKey<I, K> = Rc::new(inner_key);
        let result = Rc::new(result);
        Query::from_factory("join", move || {
            Ok(Box::new(JoinCursor {
                outer: self.cursor()?,
                inner: inner.clone(),
                outer_key: Rc::clone(&outer_key),
                inner_key: Rc::clone(&inner_key),
                result: Rc::clone(&result),
                lookup: None,
                current: None,
            }) as BoxCursor<R>)
        })
    }

    /// Group join: each outer element paired with its whole bucket of inner
    /// matches.
    ///
    /// Outer elements without any match produce no result.
    #[must_use]
    pub fn group_join<I, K, R, FO, FI, FR>(
        self,
        inner: Query<I>,
        outer_key: FO,
        inner_key: FI,
        result: FR,
    ) -> Query<R>
    where
        I: Element,
        K: Hash + Eq + 'static,
        R: Element,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        FR: Fn(&T, &[I]) -> R + 'static,
    {
        self.try_group_join(inner, outer_key, move |i: &I| Some(inner_key(i)), result)
    }

    /// Group join with a partial inner key selector; see [`Query::try_join`].
    #[must_use]
    pub fn try_group_join<I, K, R, FO, FI, FR>(
        self,
        inner: Query<I>,
        outer_key: FO,
        inner_key: FI,
        result: FR,
    ) -> Query<R>
    where
        I: Element,
        K: Hash + Eq + 'static,
        R: Element,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&I) -> Option<K> + 'static,
        FR: Fn(&T, &[I]) -> R + 'static,
    {
        let outer_key = Rc::new(outer_key);
        let inner_key: InnerKey<I, K> = Rc::new(inner_key);
        let result = Rc::new(result);
        Query::from_factory("group_join", move || {
            Ok(Box::new(GroupJoinCursor {
                outer: self.cursor()?,
                inner: inner.clone(),
                outer_key: Rc::clone(&outer_key),
                inner_key: Rc::clone(&inner_key),
                result: Rc::clone(&result),
                lookup: None,
            }) as BoxCursor<R>)
        })
    }
}
