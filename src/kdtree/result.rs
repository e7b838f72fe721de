use std::fmt;

use crate::city::City;

/// The outcome of deleting a point from a [`KDTree`][crate::kdtree::KDTree].
///
/// Renders as `"<visits>\n<name>"` when a city was removed and as `"<visits> "` (with a trailing
/// space) when no city was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    /// Number of tree nodes entered, including those inspected while repairing the tree.
    pub visits: usize,
    /// The removed city, if any.
    pub city: Option<City>,
}

impl Deletion {
    /// Returns `true` if a city was removed.
    pub fn is_hit(&self) -> bool {
        self.city.is_some()
    }
}

impl fmt::Display for Deletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.city {
            Some(city) => write!(f, "{}\n{}", self.visits, city.name()),
            None => write!(f, "{} ", self.visits),
        }
    }
}

/// The cities found by a radius search, in visit order.
///
/// Renders as one city per line followed by the visit count on the last line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Within<'a> {
    /// Cities within the radius.
    pub cities: Vec<&'a City>,
    /// Number of tree nodes entered.
    pub visits: usize,
}

impl fmt::Display for Within<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for city in &self.cities {
            writeln!(f, "{}", city)?;
        }
        write!(f, "{}", self.visits)
    }
}
