//! Point deletion for the k-d tree.
//!
//! A removed node is never unlinked from the middle of the tree. Instead its record is replaced
//! by the record with the smallest value on the node's splitting axis, taken from the right
//! subtree, and that record is deleted from the subtree in turn. When the node has no right
//! subtree, the minimum is taken from the left subtree and the left subtree becomes the right
//! one. Every node entered, including the nodes inspected by the minimum searches, counts as a
//! visit.
//!
//! A replaced node is marked, since records tying with its new splitting value may remain on its
//! right. Lookups fall back to the right subtree on a tie only at marked nodes, so a tree that
//! has never been repaired costs exactly one descent.

use std::mem;

use crate::city::City;
use crate::kdtree::index::{Link, Node};
use crate::r#type::Axis;

/// Delete the point `(x, y)` from the subtree rooted at `link`, which sits at `depth`, and return
/// the new subtree root. The removed record is written to `removed`.
pub(super) fn delete_at(
    link: Link,
    x: i32,
    y: i32,
    depth: usize,
    visits: &mut usize,
    removed: &mut Option<City>,
) -> Link {
    let mut node = link?;
    *visits += 1;

    if node.city.is_at(x, y) {
        return remove_node(node, depth, visits, removed);
    }

    let axis = Axis::from_depth(depth);
    let target = axis.select(x, y);
    let split = node.city.coord(axis);
    if target <= split {
        node.left = delete_at(node.left.take(), x, y, depth + 1, visits, removed);
        if removed.is_none() && target == split && node.ties_right {
            node.right = delete_at(node.right.take(), x, y, depth + 1, visits, removed);
        }
    } else {
        node.right = delete_at(node.right.take(), x, y, depth + 1, visits, removed);
    }
    Some(node)
}

fn remove_node(
    mut node: Box<Node>,
    depth: usize,
    visits: &mut usize,
    removed: &mut Option<City>,
) -> Link {
    let subtree = match (node.left.take(), node.right.take()) {
        (None, None) => {
            let Node { city, .. } = *node;
            *removed = Some(city);
            return None;
        }
        (left, Some(right)) => {
            node.left = left;
            right
        }
        // No right subtree: the left subtree is repaired and then hung on the right.
        (Some(left), None) => left,
    };

    let axis = Axis::from_depth(depth);
    let successor = find_min(&subtree, axis, depth + 1, visits).clone();
    // Only the record removed from this node is reported, not the successor's old slot.
    node.right = delete_at(
        Some(subtree),
        successor.x(),
        successor.y(),
        depth + 1,
        visits,
        &mut None,
    );
    *removed = Some(mem::replace(&mut node.city, successor));
    // Other records with the successor's value on this axis stay in the right subtree.
    node.ties_right = true;
    Some(node)
}

/// The record with the smallest coordinate on `target` within the subtree rooted at `node`,
/// which sits at `depth`.
///
/// When the node splits on `target`, nothing to its right can be smaller, so only the left spine
/// is followed. Otherwise both children are searched and compared against the node itself; on
/// ties the node wins, then the left child.
fn find_min<'a>(
    node: &'a Node,
    target: Axis,
    depth: usize,
    visits: &mut usize,
) -> &'a City {
    *visits += 1;

    if Axis::from_depth(depth) == target {
        return match node.left.as_deref() {
            Some(left) => find_min(left, target, depth + 1, visits),
            None => &node.city,
        };
    }

    let mut min = &node.city;
    for child in [node.left.as_deref(), node.right.as_deref()]
        .into_iter()
        .flatten()
    {
        let candidate = find_min(child, target, depth + 1, visits);
        if candidate.coord(target) < min.coord(target) {
            min = candidate;
        }
    }
    min
}
