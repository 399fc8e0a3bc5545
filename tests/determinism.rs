mod common;

use std::collections::HashSet;

use blake3::hash;
use common::visualizer;
use xor_tree::{Action, Layer, Tooltip};

#[test]
fn svg_rendering_is_deterministic() {
    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let mut vis = visualizer(7);
        vis.select("0b010110").expect("leaf exists");
        vis.dispatch(Action::SetLayer(Layer::Heat, true));
        vis.dispatch(Action::SetLayer(Layer::HexaryLinks, true));
        vis.dispatch(Action::SetRadiusN(5));

        let svg = vis.render_svg().expect("rendering succeeds");
        fingerprints.insert(hash(svg.as_bytes()));
    }

    assert_eq!(fingerprints.len(), 1, "outputs diverged across runs");
}

#[test]
fn frame_fingerprint_follows_visible_changes() {
    let mut vis = visualizer(6);
    let base = vis.frame().fingerprint();
    assert_eq!(base, visualizer(6).frame().fingerprint());

    vis.select("0b10101").unwrap();
    let selected = vis.frame().fingerprint();
    assert_ne!(base, selected);

    let position = vis.tree().position;
    vis.dispatch(Action::SetTooltip(Some(Tooltip {
        id: "0b1".parse().unwrap(),
        position,
    })));
    assert_ne!(selected, vis.frame().fingerprint());

    vis.dispatch(Action::SetTooltip(None));
    assert_eq!(selected, vis.frame().fingerprint());
}
