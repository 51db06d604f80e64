//! Pre-built datasets and instrumented sources for tests.

use crate::cursor::{BoxCursor, Cursor};
use crate::error::Result;
use crate::query::{Element, Query};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Fruit names with several length and prefix ties, for multi-key sorting.
#[must_use]
pub fn fruits() -> Vec<&'static str> {
    vec![
        "grape",
        "passionfruit",
        "banana",
        "mango",
        "orange",
        "raspberry",
        "apple",
        "blueberry",
        "appla",
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Person {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pet {
    pub name: String,
    pub owner: String,
}

/// Four owners; the last one has no pets.
#[must_use]
pub fn owners() -> Vec<Person> {
    ["Magnus Hedlund", "Terry Adams", "Charlotte Weiss", "Arlene Huff"]
        .into_iter()
        .map(|name| Person {
            name: name.to_string(),
        })
        .collect()
}

/// Pets keyed by owner name. Terry owns two.
#[must_use]
pub fn pets() -> Vec<Pet> {
    [
        ("Barley", "Terry Adams"),
        ("Boots", "Terry Adams"),
        ("Whiskers", "Charlotte Weiss"),
        ("Daisy", "Magnus Hedlund"),
    ]
    .into_iter()
    .map(|(name, owner)| Pet {
        name: name.to_string(),
        owner: owner.to_string(),
    })
    .collect()
}

struct CountingCursor<T> {
    items: Rc<[T]>,
    pos: usize,
    pulls: Rc<Cell<usize>>,
}

impl<T: Clone> Cursor<T> for CountingCursor<T> {
    fn advance(&mut self) -> Result<Option<T>> {
        let next = self.items.get(self.pos).cloned();
        if next.is_some() {
            self.pos += 1;
            self.pulls.set(self.pulls.get() + 1);
        }
        Ok(next)
    }
}

/// A source over `data` that counts every element handed out, across all
/// passes.
///
/// The length is deliberately not reported, so `count()` has to scan.
#[must_use]
pub fn counting_source<T: Element>(data: Vec<T>) -> (Query<T>, Rc<Cell<usize>>) {
    let items: Rc<[T]> = data.into();
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let query = Query::from_cursor_fn(move || -> BoxCursor<T> {
        Box::new(CountingCursor {
            items: Rc::clone(&items),
            pos: 0,
            pulls: Rc::clone(&counter),
        })
    });
    (query, pulls)
}
