//! # ironseq
//!
//! A **lazy query layer** over ordered, possibly infinite, single-pass
//! sequences. Operators chain without materializing intermediate results;
//! work happens only when a terminal operation pulls.
//!
//! ## Key Features
//!
//! - **Lazy, restartable pipelines** - every [`Query`] can hand out any number
//!   of independent cursors, each re-reading its source from the start
//! - **Stateless operators** - filter, map, select_many, skip, take, zip, concat
//! - **Hash-backed operators** - distinct, union, intersect, except, group_by,
//!   join, group_join
//! - **Multi-key ordering** - order_by / then_by with per-key direction and
//!   stable, deterministic tie-breaking
//! - **Eager terminals** - count, sum, average, min/max, first/last/single,
//!   element_at, to_vec, to_map, and more
//! - **Explicit errors** - every failure is a [`QueryError`] returned from the
//!   call that triggered it
//!
//! ## Quick Start
//!
//! ```
//! use ironseq::Query;
//!
//! let words = Query::from_vec(vec!["apple", "banana", "avocado", "cherry", "apricot"]);
//!
//! let by_letter = words
//!     .filter(|w: &&str| w.len() > 5)
//!     .group_by(|w: &&str| w.chars().next().unwrap_or_default())
//!     .map(|g| (*g.key(), g.len()));
//!
//! assert_eq!(by_letter.to_vec()?, vec![('b', 1), ('a', 2), ('c', 1)]);
//! # Ok::<(), ironseq::QueryError>(())
//! ```
//!
//! ## Core Concepts
//!
//! ### Cursors
//!
//! A [`Cursor`] is the single-use pull handle: [`Cursor::advance`] returns the
//! next element, `None` at the end, or an error. Operators are implemented as
//! explicit cursor state machines that pull from their upstream only when they
//! are pulled themselves.
//!
//! ### Queries
//!
//! A [`Query<T>`] is an immutable, cheaply clonable description of a pipeline.
//! Building one does no work. Calling [`Query::cursor`] (or any terminal)
//! starts a fresh pass.
//!
//! The one stateful node is the ordering node: the first pass sorts the
//! upstream and caches the sorted buffer on the node, and later passes stream
//! that cache.
//!
//! ### Sources
//!
//! - [`Query::from_vec`] / [`Query::from_iter`] - materialized data
//! - [`Query::range`] - integer ranges
//! - [`Query::repeat`] / [`Query::repeat_forever`] - repeated values
//! - [`Query::generate`] / [`Query::from_cursor_fn`] - generated or custom input
//!
//! ### Joins
//!
//! ```
//! use ironseq::Query;
//!
//! let owners = Query::from_vec(vec![("Terry", 1), ("Charlotte", 2), ("Arlene", 3)]);
//! let pets = Query::from_vec(vec![("Barley", 1), ("Boots", 1), ("Whiskers", 2)]);
//!
//! let counts = owners.group_join(
//!     pets,
//!     |o: &(&str, i32)| o.1,
//!     |p: &(&str, i32)| p.1,
//!     |o, bucket| (o.0, bucket.len()),
//! );
//! // owners with no pets are skipped by group_join
//! assert_eq!(counts.to_vec()?, vec![("Terry", 2), ("Charlotte", 1)]);
//! # Ok::<(), ironseq::QueryError>(())
//! ```
//!
//! ## Concurrency
//!
//! Evaluation is single-threaded and pull-based. Queries use `Rc` internally
//! and are neither `Send` nor `Sync`.
//!
//! ## Feature Flags
//!
//! - `serde` (default) - `Serialize`/`Deserialize` for [`Grouping`] and the
//!   testing fixtures
//!
//! ## Module Overview
//!
//! - [`cursor`] - the pull protocol and iterator adapters
//! - [`node`] - the restartable node trait behind every query
//! - [`query`] - the [`Query`] pipeline wrapper
//! - [`sources`] - source constructors
//! - [`legacy`] - Current/MoveNext/Reset adapter
//! - [`testing`] - assertions, builders, and fixtures for tests

pub mod cursor;
pub mod error;
pub mod legacy;
pub mod node;
pub mod query;
pub mod sources;
pub mod testing;

mod operators;
mod terminal;

pub use cursor::{BoxCursor, Cursor, CursorIter, IntoCursor, IterCursor};
pub use error::{QueryError, Result};
pub use legacy::LegacyCursor;
pub use node::SequenceOperator;
pub use operators::Grouping;
pub use query::{Element, Query};
pub use terminal::AsF64;

pub use ordered_float::{NotNan, OrderedFloat};
