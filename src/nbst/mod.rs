//! A binary search tree over city records keyed by name.
//!
//! Duplicate names are allowed. A record whose name compares less than or equal to a node's name
//! descends to the left, so duplicates accumulate along left spines.

mod index;

pub use index::NameTree;
