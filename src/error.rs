//! Error type shared by cursors and terminal operations.
//!
//! Every failure is raised at the point of detection and returned from the
//! `advance()` or terminal call that triggered it. Nothing in the crate catches
//! or retries; callers that prefer a fallback use the `*_or_default` terminals.

use thiserror::Error;

/// Canonical result for the crate.
pub type Result<T, E = QueryError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum QueryError {
    /// A terminal that needs at least one element ran on an empty sequence.
    #[error("sequence contains no elements")]
    EmptySequence,

    #[error("no element satisfies the predicate")]
    NoMatch,

    #[error("more than one element satisfies the predicate")]
    MultipleMatch,

    #[error("index {index} is out of range")]
    IndexOutOfRange { index: isize },

    /// An inner key selector of a join yielded no key.
    #[error("join key selector produced no key for inner element {position}")]
    InvalidKey { position: usize },

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure raised by a user callback of the `try_*` operator family.
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}
