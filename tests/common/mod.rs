#![allow(dead_code)]

use kurbo::Point;
use xor_tree::{generate_tree, leaf_spans, Hierarchy, LeafAngleInfo, NodeId, Visualizer, VisualizerConfig};

/// Angular tolerance for span comparisons.
pub const EPS: f64 = 1e-6;

pub fn viewport_center() -> Point {
    Point::new(640.0, 360.0)
}

pub fn id(text: &str) -> NodeId {
    text.parse().expect("valid node id")
}

/// `0b`-prefixed text of the low `bits` bits of `value` (`bits ≥ 1`).
pub fn binary(value: u64, bits: usize) -> String {
    format!("0b{:0width$b}", value, width = bits)
}

pub fn spans(depth: usize, center: Point) -> Vec<LeafAngleInfo> {
    let tree = generate_tree(depth, center);
    let hierarchy = Hierarchy::new(&tree);
    leaf_spans(&hierarchy, center)
}

pub fn visualizer(depth: usize) -> Visualizer {
    let mut vis = Visualizer::new(VisualizerConfig::for_viewport(1280.0, 720.0))
        .expect("default config is valid");
    vis.set_depth(depth).expect("depth within range");
    vis
}
