//! Eager terminal operations.
//!
//! Terminals open a fresh cursor, drain it as far as they need to, and return
//! a plain value. They borrow the query, so several terminals can run against
//! the same pipeline; each one is an independent pass.

pub(crate) mod aggregate;
pub(crate) mod convert;
pub(crate) mod element;
pub(crate) mod numeric;
pub(crate) mod quantifier;

pub use numeric::AsF64;
