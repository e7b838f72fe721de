use std::fmt;

use crate::city::City;
use crate::kdtree::delete::delete_at;
use crate::kdtree::Deletion;
use crate::r#trait::CityIndex;
use crate::r#type::Axis;
use crate::util::write_tree_line;

pub(super) type Link = Option<Box<Node>>;

/// A node of the k-d tree. The depth, and so the discriminating axis, is not stored; it is
/// recomputed while descending.
#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) city: City,
    pub(super) left: Link,
    pub(super) right: Link,
    /// Set once a deletion has replaced this node's record. Until then every record in the right
    /// subtree is strictly greater on the splitting axis.
    pub(super) ties_right: bool,
}

impl Node {
    fn new(city: City) -> Box<Self> {
        Box::new(Self {
            city,
            left: None,
            right: None,
            ties_right: false,
        })
    }
}

/// A 2D k-d tree of cities.
///
/// The root splits on `x`, its children on `y`, and so on. A city whose coordinate on the
/// discriminating axis is less than or equal to a node's goes to the left. No two cities share
/// both coordinates.
#[derive(Debug, Clone, Default)]
pub struct KDTree {
    pub(super) root: Link,
    pub(super) num_items: usize,
}

impl KDTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The city located exactly at `(x, y)`, if any.
    ///
    /// This is a pure lookup and does not count visits.
    pub fn find(&self, x: i32, y: i32) -> Option<&City> {
        find_at(&self.root, x, y, Axis::X)
    }

    /// Returns `true` if a city is stored at `(x, y)`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.find(x, y).is_some()
    }

    /// Remove the city at `(x, y)`.
    ///
    /// The returned [`Deletion`] carries the number of nodes entered, both while descending to the
    /// point and while searching for replacement records, and the removed city if there was one.
    /// The tree is unchanged when no city is stored at `(x, y)`.
    pub fn delete(&mut self, x: i32, y: i32) -> Deletion {
        let mut visits = 0;
        let mut removed = None;
        self.root = delete_at(self.root.take(), x, y, 0, &mut visits, &mut removed);
        if removed.is_some() {
            self.num_items -= 1;
        }
        Deletion {
            visits,
            city: removed,
        }
    }

    /// Check the splitting rule and coordinate uniqueness of every node.
    ///
    /// Repairs after a deletion may leave records equal to a node's splitting value in its right
    /// subtree. Only nodes marked by such a repair allow that.
    #[cfg(test)]
    pub(crate) fn assert_valid(&self) {
        use std::collections::HashSet;

        fn check<'a>(link: &'a Link, depth: usize, out: &mut Vec<&'a City>) {
            let Some(node) = link else { return };
            let axis = Axis::from_depth(depth);
            let split = node.city.coord(axis);
            let start = out.len();
            check(&node.left, depth + 1, out);
            for city in &out[start..] {
                assert!(city.coord(axis) <= split, "{city} left of {}", node.city);
            }
            out.push(&node.city);
            let start = out.len();
            check(&node.right, depth + 1, out);
            for city in &out[start..] {
                let value = city.coord(axis);
                assert!(
                    value > split || (node.ties_right && value == split),
                    "{city} right of {}",
                    node.city
                );
            }
        }

        let mut cities = vec![];
        check(&self.root, 0, &mut cities);
        assert_eq!(cities.len(), self.num_items);

        let unique: HashSet<(i32, i32)> = cities.iter().map(|c| (c.x(), c.y())).collect();
        assert_eq!(unique.len(), cities.len(), "duplicate coordinates");
        for city in cities {
            assert_eq!(self.find(city.x(), city.y()), Some(city), "unreachable {city}");
        }
    }
}

impl CityIndex for KDTree {
    /// Insert a city, refusing it if a city is already stored at the same coordinates.
    fn insert(&mut self, city: City) -> bool {
        if self.contains(city.x(), city.y()) {
            return false;
        }
        insert_at(&mut self.root, city, Axis::X);
        self.num_items += 1;
        true
    }

    fn len(&self) -> usize {
        self.num_items
    }

    fn cities(&self) -> Vec<&City> {
        fn walk<'a>(link: &'a Link, out: &mut Vec<&'a City>) {
            if let Some(node) = link {
                walk(&node.left, out);
                out.push(&node.city);
                walk(&node.right, out);
            }
        }

        let mut result = Vec::with_capacity(self.num_items);
        walk(&self.root, &mut result);
        result
    }
}

impl fmt::Display for KDTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn in_order(link: &Link, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let Some(node) = link else { return Ok(()) };
            in_order(&node.left, depth + 1, f)?;
            write_tree_line(f, depth, &node.city)?;
            in_order(&node.right, depth + 1, f)
        }

        in_order(&self.root, 0, f)
    }
}

fn insert_at(link: &mut Link, city: City, axis: Axis) {
    match link {
        None => *link = Some(Node::new(city)),
        Some(node) => {
            let child = if city.coord(axis) <= node.city.coord(axis) {
                &mut node.left
            } else {
                &mut node.right
            };
            insert_at(child, city, axis.next());
        }
    }
}

/// Equal values on the splitting axis steer left. The right side is also tried for an equal
/// value below a node whose record was replaced by a deletion.
fn find_at(link: &Link, x: i32, y: i32, axis: Axis) -> Option<&City> {
    let node = link.as_deref()?;
    if node.city.is_at(x, y) {
        return Some(&node.city);
    }

    let target = axis.select(x, y);
    let split = node.city.coord(axis);
    if target < split {
        find_at(&node.left, x, y, axis.next())
    } else if target == split && node.ties_right {
        find_at(&node.left, x, y, axis.next()).or_else(|| find_at(&node.right, x, y, axis.next()))
    } else if target == split {
        find_at(&node.left, x, y, axis.next())
    } else {
        find_at(&node.right, x, y, axis.next())
    }
}
