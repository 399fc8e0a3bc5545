mod common;

use common::{binary, id, visualizer};
use kurbo::Point;
use proptest::prelude::*;
use xor_tree::{Action, Layer, NodeId, VisualizerState};

#[test]
fn depth_buttons_walk_up_and_down() {
    let mut vis = visualizer(1);
    vis.dispatch(Action::IncDepth);
    vis.dispatch(Action::IncDepth);
    assert_eq!(vis.state().depth, 3);
    assert_eq!(vis.state().selected, Some(id("0b00")));
    assert_eq!(vis.hierarchy().len(), 7);

    vis.dispatch(Action::SetRadius(1));
    vis.dispatch(Action::DecDepth);
    assert_eq!(vis.state().depth, 2);
    assert_eq!(vis.state().selected, Some(id("0b0")));
    assert_eq!((vis.state().radius, vis.state().radius_n), (0, 0));
    assert_eq!(vis.leaf_spans().len(), 2);
}

#[test]
fn radius_buttons_keep_exponent_in_step() {
    let mut state = VisualizerState::new(6, 16, Point::new(400.0, 300.0));
    state.apply(Action::SetRadius(3));
    assert_eq!((state.radius, state.radius_n), (3, 7));

    state.apply(Action::RadiusNInc);
    assert_eq!((state.radius, state.radius_n), (4, 8));
    state.apply(Action::RadiusNDec);
    assert_eq!((state.radius, state.radius_n), (3, 7));

    for _ in 0..10 {
        state.apply(Action::RadiusNDec);
    }
    assert_eq!((state.radius, state.radius_n), (0, 0));
}

#[test]
fn layer_toggles_survive_depth_changes() {
    let mut vis = visualizer(4);
    vis.dispatch(Action::SetLayer(Layer::Heat, true));
    vis.dispatch(Action::SetLayer(Layer::BinaryLinks, false));
    vis.dispatch(Action::ChangeDepth(6));

    let layers = vis.state().layers;
    assert!(layers.is_visible(Layer::Heat));
    assert!(!layers.is_visible(Layer::BinaryLinks));
    assert!(layers.is_visible(Layer::BinaryNodes));
}

#[test]
fn center_change_moves_every_node() {
    let mut vis = visualizer(5);
    let before: Vec<Point> = vis.hierarchy().descendants().map(|n| n.position()).collect();
    vis.dispatch(Action::SetCenter(Point::new(100.0, 100.0)));
    let after: Vec<Point> = vis.hierarchy().descendants().map(|n| n.position()).collect();

    assert_eq!(before.len(), after.len());
    assert!(before.iter().zip(&after).all(|(a, b)| a != b));
    assert_eq!(vis.tree().position, Point::new(100.0, 100.0));
}

#[test]
fn stale_selection_after_set_depth_reads_zero() {
    let mut vis = visualizer(3);
    vis.select("0b01").unwrap();
    vis.dispatch(Action::SetDepth(4));
    let heat = vis.heat_map();
    assert!(heat.cells().iter().all(|c| c.distance_value() == Some(0)));
}

proptest! {
    #[test]
    fn radius_highlights_exactly_n_plus_one_leaves(
        depth in 2usize..=9,
        selected in any::<u64>(),
        radius in any::<u64>(),
    ) {
        let bits = depth - 1;
        let leaves = 1u64 << bits;
        let selected = binary(selected % leaves, bits);
        let radius_n = radius % leaves;

        let mut vis = visualizer(depth);
        vis.select(&selected).unwrap();
        vis.dispatch(Action::SetRadiusN(radius_n));

        let highlighted = vis.heat_map().cells().iter().filter(|c| c.in_radius).count() as u64;
        let expected = if radius_n == 0 { 0 } else { radius_n + 1 };
        prop_assert_eq!(highlighted, expected);
    }
}

#[test]
fn change_depth_always_selects_leftmost_leaf() {
    let mut vis = visualizer(1);
    for depth in 1..=16 {
        vis.dispatch(Action::ChangeDepth(depth));
        assert_eq!(vis.state().selected, Some(NodeId::zeros(depth - 1)));
        let hierarchy = vis.hierarchy();
        let selected = hierarchy.find(&NodeId::zeros(depth - 1)).unwrap();
        assert!(selected.is_leaf());
    }
}
