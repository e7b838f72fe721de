//! Radius search over the k-d tree.

use geo_traits::CoordTrait;
use tinyvec::TinyVec;

use crate::kdtree::index::Node;
use crate::kdtree::{KDTree, Within};
use crate::r#type::Axis;

impl KDTree {
    /// Search the tree for cities within a given radius.
    ///
    /// - qx: x value of query point
    /// - qy: y value of query point
    /// - radius: search radius, inclusive
    ///
    /// Returns the cities found in pre-order (node, left subtree, right subtree) together with the
    /// number of nodes entered, or `None` for a negative radius.
    pub fn search(&self, qx: i32, qy: i32, radius: i32) -> Option<Within<'_>> {
        if radius < 0 {
            return None;
        }

        // Squared distances between any two i32 points fit in i128.
        let (qx, qy) = (i128::from(qx), i128::from(qy));
        let r = i128::from(radius);
        let r2 = r * r;

        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[(Option<&Node>, usize); 32]> = TinyVec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((Some(root), 0));
        }

        let mut cities = vec![];
        let mut visits = 0;

        while let Some((node, depth)) = stack.pop() {
            let Some(node) = node else { continue };
            visits += 1;

            let dx = i128::from(node.city.x()) - qx;
            let dy = i128::from(node.city.y()) - qy;
            if dx * dx + dy * dy <= r2 {
                cities.push(&node.city);
            }

            let diff = Axis::from_depth(depth).select(dx, dy);

            // Note: the right child is pushed first so that the left subtree is searched first.
            // Both sides are searched when the query lies on the splitting line.
            if diff <= r {
                if let Some(right) = node.right.as_deref() {
                    stack.push((Some(right), depth + 1));
                }
            }
            if diff >= -r {
                if let Some(left) = node.left.as_deref() {
                    stack.push((Some(left), depth + 1));
                }
            }
        }

        Some(Within { cities, visits })
    }

    /// Search the tree for cities within a given radius.
    ///
    /// - coord: coordinate of query point
    /// - radius: search radius, inclusive
    pub fn within_coord(&self, coord: &impl CoordTrait<T = i32>, radius: i32) -> Option<Within<'_>> {
        self.search(coord.x(), coord.y(), radius)
    }

    /// The rendered result of [`search`][Self::search]: matching cities one per line followed by
    /// the visit count, or an empty string for a negative radius.
    pub fn search_string(&self, qx: i32, qy: i32, radius: i32) -> String {
        self.search(qx, qy, radius)
            .map(|within| within.to_string())
            .unwrap_or_default()
    }
}
