pub(crate) mod filter;
pub(crate) mod grouping;
pub(crate) mod join;
pub(crate) mod order;
pub(crate) mod partition;
pub(crate) mod project;
pub(crate) mod set;

pub use grouping::Grouping;
