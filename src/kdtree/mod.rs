//! A 2D k-d tree over city records keyed by their integer coordinates.

#![warn(missing_docs)]

mod delete;
mod index;
mod result;
mod traversal;

pub use index::KDTree;
pub use result::{Deletion, Within};

#[cfg(test)]
mod test;
