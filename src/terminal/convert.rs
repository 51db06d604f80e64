//! Materializing terminals: `to_vec`, `to_map`, `to_map_with`.

use crate::error::{QueryError, Result};
use crate::query::{Element, Query};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

impl<T: Element> Query<T> {
    /// Collect every element, in order.
    ///
    /// # Errors
    /// Propagates the first error raised by any stage.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(self.known_len().unwrap_or(0));
        let mut cursor = self.cursor()?;
        while let Some(v) = cursor.advance()? {
            out.push(v);
        }
        Ok(out)
    }

    /// Collect into a map keyed by `key`.
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`] if two elements project the same key.
    pub fn to_map<K, F>(&self, key: F) -> Result<HashMap<K, T>>
    where
        K: Hash + Eq + Debug,
        F: Fn(&T) -> K,
    {
        self.to_map_with(key, T::clone)
    }

    /// Collect into a map of projected keys to projected values.
    ///
    /// # Example
    /// ```
    /// use ironseq::Query;
    /// let m = Query::from_vec(vec![("a", 1), ("b", 2)]).to_map_with(|p| p.0, |p| p.1)?;
    /// assert_eq!(m["b"], 2);
    /// # Ok::<(), ironseq::QueryError>(())
    /// ```
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`] if two elements project the same key.
    pub fn to_map_with<K, V, FK, FV>(&self, key: FK, value: FV) -> Result<HashMap<K, V>>
    where
        K: Hash + Eq + Debug,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> V,
    {
        let mut out = HashMap::with_capacity(self.known_len().unwrap_or(0));
        let mut cursor = self.cursor()?;
        while let Some(v) = cursor.advance()? {
            match out.entry(key(&v)) {
                Entry::Occupied(e) => {
                    return Err(QueryError::DuplicateKey(format!("{:?}", e.key())));
                }
                Entry::Vacant(e) => {
                    e.insert(value(&v));
                }
            }
        }
        Ok(out)
    }
}
