use std::fmt::Display;

use crate::city::City;

/// Operations shared by the name index and the coordinate index.
///
/// The [`Display`] implementation of an index is its indented in-order dump: one line per record,
/// each line being the node depth, `2 * depth` spaces, and the city rendering.
pub trait CityIndex: Display {
    /// Add a city to the index, returning `true` if it was stored.
    fn insert(&mut self, city: City) -> bool;

    /// The number of records in this index.
    fn len(&self) -> usize;

    /// Returns `true` if this index holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records in in-order traversal order.
    fn cities(&self) -> Vec<&City>;

    /// The indented in-order dump of this index.
    fn print_tree(&self) -> String {
        self.to_string()
    }
}
