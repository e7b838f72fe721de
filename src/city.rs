//! The city record stored by both indexes.

use std::cmp::Ordering;
use std::fmt;

use geo_traits::CoordTrait;

use crate::error::{GisError, Result};
use crate::r#type::Axis;

/// An immutable named point.
///
/// Cities order by name first. Records that share a name are ordered by `x`, then `y`, so that
/// the ordering agrees with equality, which compares all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct City {
    name: String,
    x: i32,
    y: i32,
}

impl City {
    /// Create a new city, refusing an empty name.
    pub fn try_new(name: impl Into<String>, x: i32, y: i32) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(GisError::EmptyName);
        }
        Ok(Self { name, x, y })
    }

    /// The name of this city.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The x coordinate of this city.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// The y coordinate of this city.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// The coordinate of this city on the given axis.
    #[inline]
    pub fn coord(&self, axis: Axis) -> i32 {
        axis.select(self.x, self.y)
    }

    /// Returns `true` if this city lies exactly at `(x, y)`.
    #[inline]
    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// Returns `true` if this city carries the given name.
    #[inline]
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.x, self.y)
    }
}

impl Ord for City {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.x.cmp(&other.x))
            .then(self.y.cmp(&other.y))
    }
}

impl PartialOrd for City {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl CoordTrait for City {
    type T = i32;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}
