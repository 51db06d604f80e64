//! Testing utilities for ironseq queries.
//!
//! This module gives downstream crates (and this crate's own tests) the pieces
//! needed to test query pipelines idiomatically:
//!
//! - **Assertions**: compare collections and drained queries, and check that
//!   independent cursors over one query agree
//! - **Test data builders**: generate deterministic input data
//! - **Fixtures**: small domain datasets plus a source that counts pulls
//!
//! # Quick Start
//!
//! ```
//! use ironseq::Query;
//! use ironseq::testing::*;
//!
//! let q = Query::from_vec(vec![1, 2, 3]).map(|x: &i32| x * 2);
//! assert_query_yields(&q, &[2, 4, 6]);
//! assert_reentrant(&q);
//! ```
//!
//! # Verifying laziness
//!
//! [`counting_source`] returns a query together with a shared counter of how
//! many elements have been pulled from it:
//!
//! ```
//! use ironseq::testing::counting_source;
//!
//! let (q, pulls) = counting_source(vec![1, 2, 3, 4, 5]);
//! let q = q.filter(|n: &i32| *n > 1);
//! assert_eq!(pulls.get(), 0);
//! assert_eq!(q.first().unwrap(), 2);
//! assert_eq!(pulls.get(), 2);
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
