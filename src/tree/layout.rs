//! Radial tree geometry
//!
//! Children of a node at bearing θ sit at θ ± range/2, and the range halves
//! per level. Radial distance grows as `leaf_distance · (level/depth)^k`.

use kurbo::Point;
use tracing::debug;

use super::TreeNode;
use crate::bits::NodeId;

/// Deepest tree whose leaf fan stays under 360°.
pub const MAX_NON_OVERLAPPING_DEPTH: usize = 20;

/// Fraction of the center's vertical offset used as the leaf radius.
pub const DEFAULT_LEAF_RATIO: f64 = 0.8;

/// How radial distance grows with level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum RadialProfile {
    /// k = 1/2
    SquareRoot,
    /// k = depth / (depth + offset)
    DepthRatio {
        /// Constant added to the depth in the denominator.
        offset: f64,
    },
}

impl Default for RadialProfile {
    fn default() -> Self {
        RadialProfile::SquareRoot
    }
}

impl RadialProfile {
    /// Exponent k for a tree of the given depth.
    pub fn exponent(&self, depth: usize) -> f64 {
        match *self {
            RadialProfile::SquareRoot => 0.5,
            RadialProfile::DepthRatio { offset } => {
                let depth = depth as f64;
                depth / (depth + offset)
            }
        }
    }
}

/// Parameters of one generated layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Number of node levels, root included (≥ 1).
    pub depth: usize,

    /// Root position.
    pub center: Point,

    /// Radial spacing profile.
    pub profile: RadialProfile,

    /// Leaf radius as a fraction of `center.y`.
    pub leaf_ratio: f64,
}

impl LayoutConfig {
    /// Default layout for `depth` around `center`.
    pub fn new(depth: usize, center: Point) -> Self {
        Self {
            depth,
            center,
            profile: RadialProfile::default(),
            leaf_ratio: DEFAULT_LEAF_RATIO,
        }
    }

    /// Override the radial profile.
    pub fn with_profile(mut self, profile: RadialProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Override the leaf radius ratio.
    pub fn with_leaf_ratio(mut self, leaf_ratio: f64) -> Self {
        self.leaf_ratio = leaf_ratio;
        self
    }

    /// Radius reached by the deepest level.
    pub fn leaf_distance(&self) -> f64 {
        self.center.y * self.leaf_ratio
    }

    /// Fan-out of the root's children, in degrees.
    pub fn initial_angle_range(&self) -> f64 {
        initial_angle_range(self.depth)
    }
}

/// Root fan-out in degrees: `45 + 120^((depth − 1)^(1/8) / √2)`.
///
/// Grows quickly for the first few depths and flattens out afterwards, so
/// deep trees widen without exploding. Leaves cover `[-range, range]`,
/// which stays inside a full turn up to [`MAX_NON_OVERLAPPING_DEPTH`].
pub fn initial_angle_range(depth: usize) -> f64 {
    let depth = depth.max(1) as f64;
    45.0 + 120f64.powf((depth - 1.0).powf(0.125) / std::f64::consts::SQRT_2)
}

/// Generate the default layout for `depth` around `center`.
pub fn generate_tree(depth: usize, center: Point) -> TreeNode {
    generate(&LayoutConfig::new(depth, center))
}

/// Generate a fully positioned tree.
///
/// Total for every input: depth 0 is treated as 1, and depth 1 yields a
/// lone root.
pub fn generate(config: &LayoutConfig) -> TreeNode {
    let depth = config.depth.max(1);
    let placer = Placer {
        center: config.center,
        depth,
        leaf_distance: config.leaf_distance(),
        exponent: config.profile.exponent(depth),
    };

    let mut root = TreeNode::new(NodeId::root(), config.center, 0.0);
    let range = initial_angle_range(depth);
    placer.add_children(&mut root, 1, range);

    debug!(
        depth,
        range,
        leaf_distance = placer.leaf_distance,
        "generated tree layout"
    );
    root
}

struct Placer {
    center: Point,
    depth: usize,
    leaf_distance: f64,
    exponent: f64,
}

impl Placer {
    fn add_children(&self, node: &mut TreeNode, level: usize, angle_range: f64) {
        if level >= self.depth {
            return;
        }

        let distance = self.leaf_distance * (level as f64 / self.depth as f64).powf(self.exponent);
        let [left, right] = [false, true].map(|right| {
            let sign = if right { 1.0 } else { -1.0 };
            let angle = node.angle + sign * angle_range / 2.0;
            let radians = angle.to_radians();
            let position = Point::new(
                self.center.x + distance * radians.sin(),
                self.center.y - distance * radians.cos(),
            );
            let mut child = TreeNode::new(node.id.child(right), position, angle);
            self.add_children(&mut child, level + 1, angle_range / 2.0);
            child
        });
        node.children = Some(Box::new([left, right]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_one_is_single_root() {
        let root = generate_tree(1, Point::new(0.0, 0.0));
        assert!(root.is_leaf());
        assert_eq!(root.id.to_string(), "0b");
        assert_eq!(root.position, Point::new(0.0, 0.0));
        assert_eq!(root.angle, 0.0);
    }

    #[test]
    fn test_depth_zero_treated_as_one() {
        let root = generate_tree(0, Point::new(5.0, 5.0));
        assert!(root.is_leaf());
    }

    #[test]
    fn test_children_fan_symmetrically() {
        let center = Point::new(400.0, 300.0);
        let root = generate_tree(2, center);
        let left = root.left().unwrap();
        let right = root.right().unwrap();
        let half = initial_angle_range(2) / 2.0;

        assert!((left.angle + half).abs() < 1e-12);
        assert!((right.angle - half).abs() < 1e-12);
        assert!((left.y() - right.y()).abs() < 1e-9);
        assert!((left.x() - center.x + right.x() - center.x).abs() < 1e-9);
    }

    #[test]
    fn test_leaves_reach_leaf_distance() {
        let center = Point::new(400.0, 300.0);
        let config = LayoutConfig::new(5, center);
        let root = generate(&config);

        let mut node = &root;
        while let Some(right) = node.right() {
            node = right;
        }
        let expected = config.leaf_distance() * (4.0f64 / 5.0).sqrt();
        assert!((node.position.distance(center) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_depth_ratio_profile() {
        let profile = RadialProfile::DepthRatio { offset: 2.0 };
        assert!((profile.exponent(6) - 0.75).abs() < 1e-12);

        let center = Point::new(100.0, 100.0);
        let root = generate(&LayoutConfig::new(4, center).with_profile(profile));
        let child = root.left().unwrap();
        let expected = 80.0 * (1.0f64 / 4.0).powf(4.0 / 6.0);
        assert!((child.position.distance(center) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_initial_range_is_monotonic_and_bounded() {
        let mut previous = initial_angle_range(1);
        assert!((previous - 46.0).abs() < 1e-12);
        for depth in 2..=64 {
            let range = initial_angle_range(depth);
            assert!(range > previous);
            previous = range;
        }
        assert!(initial_angle_range(MAX_NON_OVERLAPPING_DEPTH) < 180.0);
        assert!(initial_angle_range(MAX_NON_OVERLAPPING_DEPTH + 1) > 180.0);
    }
}
