use crate::city::City;
use crate::kdtree::{Deletion, KDTree};
use crate::r#trait::CityIndex;

fn city(name: &str, x: i32, y: i32) -> City {
    City::try_new(name, x, y).unwrap()
}

fn make_tree(cities: &[(&str, i32, i32)]) -> KDTree {
    let mut tree = KDTree::new();
    for (name, x, y) in cities {
        assert!(tree.insert(city(name, *x, *y)), "{name} refused");
    }
    tree.assert_valid();
    tree
}

fn reference_tree() -> KDTree {
    make_tree(&[
        ("Chicago", 100, 150),
        ("Atlanta", 10, 500),
        ("Tacoma", 1000, 100),
        ("Baltimore", 0, 300),
        ("Washington", 5, 350),
        ("L", 101, 150),
        ("L", 11, 500),
    ])
}

fn names(tree: &KDTree, qx: i32, qy: i32, r: i32) -> Vec<String> {
    tree.search(qx, qy, r)
        .unwrap()
        .cities
        .iter()
        .map(|city| city.name().to_string())
        .collect()
}

#[test]
fn insert_alternates_axes() {
    let tree = make_tree(&[("CityA", 50, 50), ("CityB", 25, 75), ("CityC", 75, 25)]);
    assert_eq!(
        tree.print_tree(),
        "1  CityB (25, 75)\n0CityA (50, 50)\n1  CityC (75, 25)\n"
    );

    // equal x goes left at the root, equal y goes left one level down
    let tree = make_tree(&[("Root", 50, 50), ("EqualX", 50, 75), ("EqualY", 40, 75)]);
    assert_eq!(
        tree.print_tree(),
        "2    EqualY (40, 75)\n1  EqualX (50, 75)\n0Root (50, 50)\n"
    );
}

#[test]
fn prints_reference_tree() {
    let tree = reference_tree();
    assert_eq!(
        tree.print_tree(),
        "2    Baltimore (0, 300)\n\
         3      Washington (5, 350)\n\
         4        L (11, 500)\n\
         1  Atlanta (10, 500)\n\
         0Chicago (100, 150)\n\
         1  Tacoma (1000, 100)\n\
         2    L (101, 150)\n"
    );
    assert_eq!(KDTree::new().print_tree(), "");
}

#[test]
fn refuses_duplicate_coordinates() {
    let mut tree = make_tree(&[("First", 10, 20)]);
    assert!(!tree.insert(city("Second", 10, 20)));
    assert_eq!(tree.print_tree(), "0First (10, 20)\n");
    assert_eq!(tree.len(), 1);
}

#[test]
fn accepts_any_signed_coordinates() {
    let tree = make_tree(&[
        ("Negative", -10, -5),
        ("Zero", 0, 0),
        ("Large", 999999, 999999),
    ]);
    assert_eq!(tree.find(-10, -5).unwrap().name(), "Negative");
    assert_eq!(tree.find(999999, 999999).unwrap().name(), "Large");
}

#[test]
fn find_exact_coordinates() {
    let tree = reference_tree();
    assert_eq!(tree.find(101, 150).unwrap().name(), "L");
    assert_eq!(tree.find(5, 350).unwrap().name(), "Washington");
    assert!(tree.find(150, 101).is_none());
    assert!(tree.find(999, 999).is_none());
    assert!(KDTree::new().find(50, 50).is_none());
}

#[test]
fn delete_on_empty_tree() {
    let mut tree = KDTree::new();
    let deletion = tree.delete(50, 50);
    assert_eq!(
        deletion,
        Deletion {
            visits: 0,
            city: None
        }
    );
    assert_eq!(deletion.to_string(), "0 ");
}

#[test]
fn delete_miss_counts_visits() {
    let mut tree = reference_tree();
    let deletion = tree.delete(999, 999);
    assert!(!deletion.is_hit());
    assert_eq!(deletion.to_string(), "3 ");
    assert_eq!(tree.len(), 7);
    tree.assert_valid();
}

#[test]
fn delete_miss_on_axis_tie_follows_one_path() {
    let mut tree = make_tree(&[("A", 5, 5), ("B", 5, 10), ("C", 9, 1)]);
    assert_eq!(tree.delete(5, 7).to_string(), "2 ");
    assert!(tree.find(5, 7).is_none());
    assert_eq!(tree.len(), 3);
    tree.assert_valid();
}

#[test]
fn delete_root_with_right_subtree() {
    let mut tree = reference_tree();
    assert_eq!(tree.delete(1000, 100).to_string(), "4\nTacoma");
    // root, the successor search, then removing the successor leaf
    let deletion = tree.delete(100, 150);
    assert_eq!(deletion.to_string(), "3\nChicago");
    assert_eq!(deletion.city, Some(city("Chicago", 100, 150)));
    tree.assert_valid();
    assert!(tree.find(100, 150).is_none());
    assert_eq!(tree.find(101, 150).unwrap().name(), "L");
    assert_eq!(tree.len(), 5);
}

#[test]
fn delete_leaf() {
    let mut tree = make_tree(&[("CityA", 50, 50), ("CityB", 25, 75), ("CityD", 10, 30)]);
    assert_eq!(tree.delete(10, 30).to_string(), "3\nCityD");
    assert_eq!(tree.print_tree(), "1  CityB (25, 75)\n0CityA (50, 50)\n");
}

#[test]
fn delete_with_only_left_subtree_moves_it_right() {
    let mut tree = make_tree(&[("Root", 50, 50), ("A", 30, 60), ("B", 20, 55), ("C", 40, 40)]);
    let deletion = tree.delete(50, 50);
    assert_eq!(deletion.visits, 7);
    assert_eq!(deletion.to_string(), "7\nRoot");
    tree.assert_valid();
    assert_eq!(
        tree.print_tree(),
        "0B (20, 55)\n2    C (40, 40)\n1  A (30, 60)\n"
    );
}

#[test]
fn delete_keeps_tied_records_reachable() {
    let mut tree = make_tree(&[("A", 10, 0), ("B", 20, 0), ("C", 20, 5)]);
    assert_eq!(tree.delete(10, 0).to_string(), "6\nA");
    tree.assert_valid();

    // C now sits right of a node with the same x
    assert_eq!(tree.find(20, 5).unwrap().name(), "C");
    assert!(!tree.insert(city("Dup", 20, 5)));
    // the repaired root also tries its right side on a miss
    assert_eq!(tree.delete(20, 9).to_string(), "2 ");
    assert_eq!(tree.delete(20, 5).to_string(), "2\nC");
    assert!(!tree.is_empty());
    assert_eq!(tree.print_tree(), "0B (20, 0)\n");
}

#[test]
fn find_min_explores_left_subtree() {
    let mut tree = make_tree(&[
        ("Root", 200, 200),
        ("Left", 100, 250),
        ("LL", 80, 240),
        ("LR", 120, 260),
        ("LLL", 70, 235),
        ("LLR", 90, 245),
    ]);
    assert!(tree.delete(200, 200).is_hit());
    tree.assert_valid();
    assert!(tree.find(200, 200).is_none());
    assert_eq!(tree.find(70, 235).unwrap().name(), "LLL");
    assert_eq!(tree.find(100, 250).unwrap().name(), "Left");
    assert_eq!(tree.len(), 5);
}

#[test]
fn repeated_deletes_stay_consistent() {
    let mut tree = make_tree(&[
        ("A", 100, 100),
        ("B", 80, 120),
        ("C", 120, 80),
        ("D", 70, 110),
        ("E", 90, 130),
        ("F", 110, 70),
        ("G", 130, 90),
        ("H", 60, 105),
    ]);
    for (x, y) in [(100, 100), (80, 120), (120, 80)] {
        assert!(tree.delete(x, y).is_hit());
        tree.assert_valid();
        assert!(tree.find(x, y).is_none());
    }
    for (x, y) in [(70, 110), (90, 130), (110, 70), (130, 90), (60, 105)] {
        assert!(tree.find(x, y).is_some());
    }
}

#[test]
fn search_after_deletes() {
    let mut tree = reference_tree();
    tree.delete(1000, 100);
    tree.delete(100, 150);
    assert_eq!(
        tree.search_string(0, 0, 2000),
        "L (101, 150)\nAtlanta (10, 500)\nBaltimore (0, 300)\nWashington (5, 350)\nL (11, 500)\n5"
    );
}

#[test]
fn search_radius_edges() {
    let tree = make_tree(&[("CityA", 50, 50), ("CityB", 25, 75), ("CityC", 75, 25)]);
    assert_eq!(names(&tree, 50, 50, 0), vec!["CityA"]);
    assert!(tree.search(50, 50, -5).is_none());
    assert_eq!(tree.search_string(50, 50, -5), "");
    assert_eq!(KDTree::new().search_string(50, 50, 100), "0");

    let tree = make_tree(&[
        ("Origin", 0, 0),
        ("East3", 3, 0),
        ("North4", 0, 4),
        ("NE5", 3, 4),
        ("Far", 4, 4),
    ]);
    // a city at exactly the radius is included
    let found = names(&tree, 0, 0, 5);
    assert_eq!(found.len(), 4);
    assert!(!found.contains(&"Far".to_string()));
}

#[test]
fn search_extreme_query_points() {
    let tree = make_tree(&[("A", i32::MAX, 0)]);
    assert_eq!(tree.search_string(i32::MIN, 0, 5), "1");
    assert_eq!(tree.search_string(i32::MIN, i32::MIN, i32::MAX), "1");

    let tree = make_tree(&[("Max", i32::MAX, i32::MAX), ("Min", i32::MIN, i32::MIN)]);
    assert_eq!(
        tree.search_string(i32::MIN, i32::MIN, 0),
        "Min (-2147483648, -2147483648)\n2"
    );
    assert_eq!(names(&tree, i32::MIN, i32::MIN, i32::MAX), vec!["Min"]);
    assert_eq!(names(&tree, i32::MAX, i32::MAX, i32::MAX), vec!["Max"]);
}

#[test]
fn search_prunes_left_side() {
    let tree = make_tree(&[("Root", 100, 100), ("Left", 50, 100), ("Right", 150, 100)]);
    let within = tree.search(140, 100, 5).unwrap();
    assert!(within.cities.is_empty());
    assert_eq!(within.visits, 2);
}

#[test]
fn search_prunes_right_side() {
    let tree = make_tree(&[("Root", 100, 100), ("Left", 50, 100), ("Right", 150, 100)]);
    assert_eq!(tree.search_string(60, 100, 5), "2");
}

#[test]
fn search_visits_in_pre_order() {
    let tree = make_tree(&[
        ("A", 100, 100),
        ("B", 50, 150),
        ("C", 25, 150),
        ("D", 75, 150),
        ("E", 150, 100),
    ]);
    assert_eq!(tree.search_string(40, 150, 30), "B (50, 150)\nC (25, 150)\n4");

    let tree = make_tree(&[
        ("A", 100, 100),
        ("B", 50, 100),
        ("C", 150, 150),
        ("D", 150, 125),
        ("E", 150, 175),
    ]);
    assert_eq!(
        tree.search_string(160, 150, 30),
        "C (150, 150)\nD (150, 125)\nE (150, 175)\n4"
    );
}

#[test]
fn search_by_coord() {
    let tree = reference_tree();
    let center = city("Query", 100, 150);
    let within = tree.within_coord(&center, 1).unwrap();
    assert_eq!(
        within.cities,
        vec![&city("Chicago", 100, 150), &city("L", 101, 150)]
    );
}
