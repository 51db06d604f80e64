//! Grouping: `group_by`, `group_by_element`, `group_by_result`.
//!
//! The first pull drains the whole source into an insertion-ordered key→bucket
//! map; groups are then streamed in first-seen-key order, each bucket keeping
//! source order.

use crate::cursor::{BoxCursor, Cursor};
use crate::error::Result;
use crate::query::{Element, Query};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;
use std::vec;
use tracing::trace;

/// A key together with every element that projected to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grouping<K, V> {
    key: K,
    elements: Vec<V>,
}

impl<K, V> Grouping<K, V> {
    #[must_use]
    pub fn new(key: K, elements: Vec<V>) -> Self {
        Self { key, elements }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Elements of the bucket, in source order.
    pub fn elements(&self) -> &[V] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.elements.iter()
    }

    #[must_use]
    pub fn into_parts(self) -> (K, Vec<V>) {
        (self.key, self.elements)
    }
}

impl<K, V> IntoIterator for Grouping<K, V> {
    type Item = V;
    type IntoIter = vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Drain `cursor` into buckets keyed by `key`, preserving first-seen key order.
pub(crate) fn bucket_ordered<T, K, V>(
    cursor: &mut BoxCursor<T>,
    key: impl Fn(&T) -> K,
    element: impl Fn(&T) -> V,
) -> Result<Vec<(K, Vec<V>)>>
where
    K: Hash + Eq + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<(K, Vec<V>)> = Vec::new();
    while let Some(v) = cursor.advance()? {
        let k = key(&v);
        let e = element(&v);
        match index.get(&k) {
            Some(&slot) => buckets[slot].1.push(e),
            None => {
                index.insert(k.clone(), buckets.len());
                buckets.push((k, vec![e]));
            }
        }
    }
    Ok(buckets)
}

enum GroupPhase<K, V> {
    Unrealized,
    Streaming(vec::IntoIter<(K, Vec<V>)>),
}

struct GroupByCursor<T, K, V, FK, FE, FR> {
    upstream: BoxCursor<T>,
    key: Rc<FK>,
    element: Rc<FE>,
    result: Rc<FR>,
    phase: GroupPhase<K, V>,
}

impl<T, K, V, R, FK, FE, FR> Cursor<R> for GroupByCursor<T, K, V, FK, FE, FR>
where
    K: Hash + Eq + Clone,
    FK: Fn(&T) -> K,
    FE: Fn(&T) -> V,
    FR: Fn(K, Vec<V>) -> R,
{
    fn advance(&mut self) -> Result<Option<R>> {
        if let GroupPhase::Unrealized = self.phase {
            let buckets = bucket_ordered(&mut self.upstream, &*self.key, &*self.element)?;
            trace!(groups = buckets.len(), "group_by drained source");
            self.phase = GroupPhase::Streaming(buckets.into_iter());
        }
        let GroupPhase::Streaming(groups) = &mut self.phase else {
            return Ok(None);
        };
        Ok(groups.next().map(|(k, bucket)| (self.result)(k, bucket)))
    }
}

impl<T: Element> Query<T> {
    /// Group elements by key.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let groups = Query::from_vec(vec!["apple", "avocado", "banana"])
    ///     .group_by(|s: &&str| s.len() % 2)
    ///     .to_vec()?;
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0].key(), &1);
    /// assert_eq!(groups[0].elements(), &["apple", "avocado"]);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    #[must_use]
    pub fn group_by<K, FK>(self, key: FK) -> Query<Grouping<K, T>>
    where
        K: Element + Hash + Eq,
        FK: Fn(&T) -> K + 'static,
    {
        self.group_by_element(key, T::clone)
    }

    /// Group projected elements by key.
    #[must_use]
    pub fn group_by_element<K, V, FK, FE>(self, key: FK, element: FE) -> Query<Grouping<K, V>>
    where
        K: Element + Hash + Eq,
        V: Element,
        FK: Fn(&T) -> K + 'static,
        FE: Fn(&T) -> V + 'static,
    {
        self.group_by_result(key, element, Grouping::new)
    }

    /// Group projected elements by key and shape each group with `result`.
    #[must_use]
    pub fn group_by_result<K, V, R, FK, FE, FR>(
        self,
        key: FK,
        element: FE,
        result: FR,
    ) -> Query<R>
    where
        K: Element + Hash + Eq,
        V: Element,
        R: Element,
        FK: Fn(&T) -> K + 'static,
        FE: Fn(&T) -> V + 'static,
        FR: Fn(K, Vec<V>) -> R + 'static,
    {
        let key = Rc::new(key);
        let element = Rc::new(element);
        let result = Rc::new(result);
        Query::from_factory("group_by", move || {
            Ok(Box::new(GroupByCursor {
                upstream: self.cursor()?,
                key: Rc::clone(&key),
                element: Rc::clone(&element),
                result: Rc::clone(&result),
                phase: GroupPhase::Unrealized,
            }) as BoxCursor<R>)
        })
    }
}
