use std::cmp::Ordering;
use std::fmt;

use crate::city::City;
use crate::r#trait::CityIndex;
use crate::util::write_tree_line;

type Link = Option<Box<Node>>;

#[derive(Debug, Clone)]
struct Node {
    city: City,
    left: Link,
    right: Link,
    /// Distance from the root, used when rendering the tree.
    depth: usize,
}

impl Node {
    fn new(city: City, depth: usize) -> Box<Self> {
        Box::new(Self {
            city,
            left: None,
            right: None,
            depth,
        })
    }

    /// Reassign depths after this subtree moved to a new position.
    fn relevel(&mut self, depth: usize) {
        self.depth = depth;
        if let Some(left) = self.left.as_mut() {
            left.relevel(depth + 1);
        }
        if let Some(right) = self.right.as_mut() {
            right.relevel(depth + 1);
        }
    }
}

/// A binary search tree of cities ordered by name.
///
/// For every node, names in the left subtree are `<=` the node's name and names in the right
/// subtree are strictly greater.
#[derive(Debug, Clone, Default)]
pub struct NameTree {
    root: Link,
    num_items: usize,
}

impl NameTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// All cities with the given name.
    ///
    /// Matches are listed in pre-order: a node before its left subtree, the left subtree before
    /// the right one.
    pub fn find_all(&self, name: &str) -> Vec<&City> {
        let mut result = vec![];
        collect_named(&self.root, name, &mut result);
        result
    }

    /// The renderings of [`find_all`][Self::find_all], one per line, or an empty string.
    pub fn find_all_string(&self, name: &str) -> String {
        self.find_all(name)
            .iter()
            .map(|city| city.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Remove exactly one city with the given name.
    ///
    /// Returns `true` if a city was removed.
    pub fn delete_one(&mut self, name: &str) -> bool {
        self.delete_first(|city| city.has_name(name))
    }

    /// Remove exactly one record equal to `city` (same name and coordinates).
    ///
    /// Returns `true` if a record was removed.
    pub fn delete_city(&mut self, city: &City) -> bool {
        self.delete_first(|candidate| candidate == city)
    }

    /// Remove every city with the given name.
    ///
    /// Returns `true` if at least one city was removed.
    pub fn delete_all(&mut self, name: &str) -> bool {
        let mut removed = 0;
        self.root = delete_all_at(self.root.take(), name, &mut removed);
        self.num_items -= removed;
        removed > 0
    }

    fn delete_first<F: Fn(&City) -> bool>(&mut self, matches: F) -> bool {
        let mut deleted = false;
        self.root = delete_first_at(self.root.take(), &matches, &mut deleted);
        if deleted {
            self.num_items -= 1;
        }
        deleted
    }

    /// Check the ordering and depth bookkeeping of every node.
    #[cfg(test)]
    pub(crate) fn assert_valid(&self) {
        fn check<'a>(link: &'a Link, depth: usize, out: &mut Vec<&'a City>) {
            let Some(node) = link else { return };
            assert_eq!(node.depth, depth, "stale depth at {}", node.city);
            let start = out.len();
            check(&node.left, depth + 1, out);
            for city in &out[start..] {
                assert!(city.name() <= node.city.name(), "{city} left of {}", node.city);
            }
            out.push(&node.city);
            let start = out.len();
            check(&node.right, depth + 1, out);
            for city in &out[start..] {
                assert!(city.name() > node.city.name(), "{city} right of {}", node.city);
            }
        }

        let mut cities = vec![];
        check(&self.root, 0, &mut cities);
        assert_eq!(cities.len(), self.num_items);
    }
}

impl CityIndex for NameTree {
    fn insert(&mut self, city: City) -> bool {
        insert_at(&mut self.root, city, 0);
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

impl fmt::Display for NameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn in_order(link: &Link, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let Some(node) = link else { return Ok(()) };
            in_order(&node.left, f)?;
            write_tree_line(f, node.depth, &node.city)?;
            in_order(&node.right, f)
        }

        in_order(&self.root, f)
    }
}

fn insert_at(link: &mut Link, city: City, depth: usize) {
    match link {
        None => *link = Some(Node::new(city, depth)),
        Some(node) => {
            let child = if city.name() <= node.city.name() {
                &mut node.left
            } else {
                &mut node.right
            };
            insert_at(child, city, depth + 1);
        }
    }
}

fn collect_named<'a>(link: &'a Link, name: &str, out: &mut Vec<&'a City>) {
    let Some(node) = link else { return };
    match name.cmp(node.city.name()) {
        Ordering::Equal => {
            out.push(&node.city);
            collect_named(&node.left, name, out);
            collect_named(&node.right, name, out);
        }
        Ordering::Less => collect_named(&node.left, name, out),
        Ordering::Greater => collect_named(&node.right, name, out),
    }
}

/// Post-order removal of every match. Children are cleaned first, so by the time a node is
/// removed its left subtree no longer contains the name.
fn delete_all_at(link: Link, name: &str, removed: &mut usize) -> Link {
    let mut node = link?;
    node.left = delete_all_at(node.left.take(), name, removed);
    node.right = delete_all_at(node.right.take(), name, removed);
    if node.city.has_name(name) {
        *removed += 1;
        return remove_node(node);
    }
    Some(node)
}

/// Post-order walk that stops at the first match: left subtree, then the node, then the right
/// subtree.
fn delete_first_at<F: Fn(&City) -> bool>(link: Link, matches: &F, deleted: &mut bool) -> Link {
    let mut node = link?;
    node.left = delete_first_at(node.left.take(), matches, deleted);
    if *deleted {
        return Some(node);
    }
    if matches(&node.city) {
        *deleted = true;
        return remove_node(node);
    }
    node.right = delete_first_at(node.right.take(), matches, deleted);
    Some(node)
}

/// Unlink a single node, returning the subtree that takes its place.
fn remove_node(mut node: Box<Node>) -> Link {
    let depth = node.depth;
    match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(mut child), None) | (None, Some(mut child)) => {
            child.relevel(depth);
            Some(child)
        }
        (Some(left), Some(right)) => {
            // Two children: the largest name on the left takes this node's place.
            let (rest, max) = take_max(left);
            node.city = max;
            node.left = rest;
            node.right = Some(right);
            Some(node)
        }
    }
}

/// Detach the rightmost node of a subtree, returning what remains and the detached record.
fn take_max(mut node: Box<Node>) -> (Link, City) {
    match node.right.take() {
        Some(right) => {
            let (rest, max) = take_max(right);
            node.right = rest;
            (Some(node), max)
        }
        None => {
            let Node {
                city, left, depth, ..
            } = *node;
            let left = left.map(|mut left| {
                left.relevel(depth);
                left
            });
            (left, city)
        }
    }
}
