mod common;

use std::collections::HashSet;

use kurbo::Point;
use proptest::prelude::*;
use xor_tree::tree::{leaf_count, node_count};
use xor_tree::{generate_tree, Hierarchy, LayoutConfig};

proptest! {
    #[test]
    fn generated_trees_are_complete(
        depth in 1usize..=11,
        cx in 1.0f64..2000.0,
        cy in 1.0f64..2000.0,
    ) {
        let center = Point::new(cx, cy);
        let tree = generate_tree(depth, center);
        let hierarchy = Hierarchy::new(&tree);

        prop_assert_eq!(hierarchy.len(), node_count(depth));
        prop_assert_eq!(hierarchy.leaves().count(), leaf_count(depth));
        prop_assert_eq!(tree.position, center);
        prop_assert_eq!(tree.angle, 0.0);

        let mut seen = HashSet::new();
        for node in hierarchy.descendants() {
            prop_assert_eq!(node.id().len(), node.depth());
            prop_assert!(seen.insert(node.id().to_string()), "duplicate {}", node.id());
            if let Some(parent) = node.parent() {
                prop_assert!(parent.id().is_prefix_of(node.id()));
                prop_assert_eq!(parent.id().len() + 1, node.id().len());
            }
        }
    }

    #[test]
    fn leaves_share_one_radius(depth in 2usize..=10, cy in 10.0f64..1000.0) {
        let center = Point::new(500.0, cy);
        let config = LayoutConfig::new(depth, center);
        let tree = xor_tree::tree::generate(&config);
        let hierarchy = Hierarchy::new(&tree);

        let expected = config.leaf_distance() * ((depth - 1) as f64 / depth as f64).sqrt();
        for leaf in hierarchy.leaves() {
            prop_assert!((leaf.position().distance(center) - expected).abs() < 1e-6);
        }
    }
}

#[test]
fn depth_one_is_a_single_root() {
    let center = common::viewport_center();
    let tree = generate_tree(1, center);
    let hierarchy = Hierarchy::new(&tree);

    assert_eq!(hierarchy.len(), 1);
    assert_eq!(tree.id.to_string(), "0b");
    assert_eq!(tree.position, center);
    assert!(tree.children.is_none());
}

#[test]
fn depth_three_ids_in_order() {
    let tree = generate_tree(3, common::viewport_center());
    let hierarchy = Hierarchy::new(&tree);
    let leaves: Vec<String> = hierarchy.leaves().map(|n| n.id().to_string()).collect();
    assert_eq!(leaves, vec!["0b00", "0b01", "0b10", "0b11"]);
}
