use tracing::{debug, trace};

use crate::city::City;
use crate::error::{GisError, Result};
use crate::kdtree::KDTree;
use crate::nbst::NameTree;
use crate::r#trait::CityIndex;

/// The largest coordinate accepted for a city by default.
pub const MAX_COORD: i32 = 32767;

/// An in-memory city database.
///
/// Every city is stored twice: once in a [`NameTree`] for lookups by name and once in a
/// [`KDTree`] for lookups by coordinate. Each mutation validates its input before touching either
/// index, so both always hold the same records.
#[derive(Debug, Clone)]
pub struct GisDb {
    names: NameTree,
    points: KDTree,
    max_coord: i32,
}

impl Default for GisDb {
    fn default() -> Self {
        Self::new()
    }
}

impl GisDb {
    /// Create an empty database accepting coordinates in `0..=MAX_COORD`.
    pub fn new() -> Self {
        Self::new_with_max_coord(MAX_COORD)
    }

    /// Create an empty database accepting coordinates in `0..=max_coord`.
    pub fn new_with_max_coord(max_coord: i32) -> Self {
        Self {
            names: NameTree::new(),
            points: KDTree::new(),
            max_coord,
        }
    }

    /// The largest accepted coordinate.
    pub fn max_coord(&self) -> i32 {
        self.max_coord
    }

    /// The number of cities stored.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no city is stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove every city. Always succeeds.
    pub fn clear(&mut self) -> bool {
        self.names = NameTree::new();
        self.points = KDTree::new();
        debug!("database cleared");
        true
    }

    /// Add a city, returning `true` if it was stored.
    ///
    /// The city is refused when its name is empty, when either coordinate lies outside
    /// `0..=max_coord`, or when another city already occupies `(x, y)`.
    pub fn insert(&mut self, name: &str, x: i32, y: i32) -> bool {
        match self.try_insert(name, x, y) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, city_name = name, x, y, "insert refused");
                false
            }
        }
    }

    /// Add a city, reporting why it was refused.
    pub fn try_insert(&mut self, name: &str, x: i32, y: i32) -> Result<()> {
        let range = 0..=self.max_coord;
        if !range.contains(&x) || !range.contains(&y) {
            return Err(GisError::CoordinateOutOfRange {
                x,
                y,
                max: self.max_coord,
            });
        }

        let city = City::try_new(name, x, y)?;
        // A refused k-d insert leaves both indexes untouched.
        if !self.points.insert(city.clone()) {
            return Err(GisError::DuplicateCoordinate { x, y });
        }
        trace!(%city, "insert");
        self.names.insert(city);
        Ok(())
    }

    /// Remove the city at `(x, y)`.
    ///
    /// Returns the number of k-d tree nodes visited and the city name on two lines, or an empty
    /// string when no city is stored there.
    pub fn delete_at(&mut self, x: i32, y: i32) -> String {
        let deletion = self.points.delete(x, y);
        let Some(city) = deletion.city.as_ref() else {
            debug!(x, y, visits = deletion.visits, "no city to delete");
            return String::new();
        };

        let removed = self.names.delete_city(city);
        debug_assert!(removed, "{city} missing from the name index");
        debug!(%city, visits = deletion.visits, "deleted by coordinate");
        deletion.to_string()
    }

    /// Remove every city with the given name.
    ///
    /// Returns each removed city on its own line, in name index order, or an empty string when
    /// no city has that name.
    pub fn delete_named(&mut self, name: &str) -> String {
        let listing = self.names.find_all_string(name);
        if listing.is_empty() {
            return String::new();
        }

        let coords: Vec<(i32, i32)> = self
            .names
            .find_all(name)
            .iter()
            .map(|city| (city.x(), city.y()))
            .collect();
        for (x, y) in coords {
            let deletion = self.points.delete(x, y);
            debug_assert!(deletion.is_hit(), "({x}, {y}) missing from the k-d tree");
        }
        self.names.delete_all(name);

        debug!(city_name = name, "deleted by name");
        listing
    }

    /// The city stored at `(x, y)`, if any.
    pub fn city_at(&self, x: i32, y: i32) -> Option<&City> {
        self.points.find(x, y)
    }

    /// Every city with the given name, in name index order.
    pub fn cities_named(&self, name: &str) -> Vec<&City> {
        self.names.find_all(name)
    }

    /// All cities, ordered by name.
    pub fn cities(&self) -> Vec<&City> {
        self.names.cities()
    }

    /// The name of the city at `(x, y)`, or an empty string.
    pub fn info_at(&self, x: i32, y: i32) -> String {
        self.city_at(x, y)
            .map(|city| city.name().to_string())
            .unwrap_or_default()
    }

    /// Every city with the given name, one per line, or an empty string.
    pub fn info_named(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        self.names.find_all_string(name)
    }

    /// All cities within `radius` of `(x, y)`, one per line, followed by the number of k-d tree
    /// nodes visited. Returns an empty string for a negative radius.
    pub fn search(&self, x: i32, y: i32, radius: i32) -> String {
        match self.points.search(x, y, radius) {
            Some(within) => {
                trace!(
                    x,
                    y,
                    radius,
                    found = within.cities.len(),
                    visits = within.visits,
                    "search"
                );
                within.to_string()
            }
            None => String::new(),
        }
    }

    /// The name index as an indented in-order listing.
    pub fn print(&self) -> String {
        self.names.print_tree()
    }

    /// The k-d tree as an indented in-order listing.
    pub fn debug(&self) -> String {
        self.points.print_tree()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.names.assert_valid();
        self.points.assert_valid();

        let mut by_name: Vec<&City> = self.names.cities();
        let mut by_point: Vec<&City> = self.points.cities();
        by_name.sort();
        by_point.sort();
        assert_eq!(by_name, by_point, "indexes disagree");
    }
}
