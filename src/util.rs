use std::fmt;

use crate::city::City;

/// Write one line of an indented tree dump: the depth, `2 * depth` spaces, then the city.
pub(crate) fn write_tree_line(f: &mut fmt::Formatter<'_>, depth: usize, city: &City) -> fmt::Result {
    writeln!(f, "{}{:pad$}{}", depth, "", city, pad = 2 * depth)
}
