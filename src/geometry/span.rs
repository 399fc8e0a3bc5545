//! Leaf slices for the radial heat map
//!
//! Every leaf owns the arc between two boundary ancestors:
//! - near side: its own parent (bisects the leaf and its sibling)
//! - far side: the parent of the first ancestor on the other branch
//!   (bisects the leaf and its neighbour in the adjacent subtree)
//!
//! The outermost leaves have no far-side ancestor. Their open edge is the
//! near edge reflected through the leaf.

use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::Point;
use tracing::trace;

use super::{bearing, unwrap_near, wrap_angle, AngleSpan};
use crate::tree::{Hierarchy, HierarchyNode, NodeIndex};

/// Angular placement of one leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct LeafAngleInfo {
    /// The leaf itself.
    pub leaf: NodeIndex,
    /// Node whose bearing bounds the slice on the left.
    pub left_parent: NodeIndex,
    /// Node whose bearing bounds the slice on the right.
    pub right_parent: NodeIndex,
    /// Bearing of the leaf.
    pub node_angle: f64,
    /// Start of the slice.
    pub left_parent_angle: f64,
    /// End of the slice.
    pub right_parent_angle: f64,
}

impl LeafAngleInfo {
    /// The slice `[left_parent_angle, right_parent_angle)`.
    pub fn span(&self) -> AngleSpan {
        AngleSpan::new(self.left_parent_angle, self.right_parent_angle)
    }
}

/// Rendering angle of a node.
///
/// A node on the center (the root) takes the bisector of its children's
/// bearings, which follows the layout even when a negative leaf distance
/// turns every node half a turn. With the children on the center as well
/// (a zero-radius layout) the layout bearing is used.
fn node_bearing(node: HierarchyNode<'_, '_>, center: Point) -> f64 {
    if let Some(angle) = bearing(node.position(), center) {
        return angle;
    }
    let children = node.children().and_then(|[left, right]| {
        let left = bearing(left.position(), center)?;
        let right = bearing(right.position(), center)?;
        Some(AngleSpan::new(left, unwrap_near(right, left)).mid())
    });
    children.unwrap_or_else(|| node.data().angle.to_radians())
}

/// Derive the slice owned by `leaf`.
///
/// Never fails. A lone root owns the full circle, and the two leaves of a
/// depth-2 tree own the quarter circles either side of "up".
pub fn leaf_angles(leaf: HierarchyNode<'_, '_>, center: Point) -> LeafAngleInfo {
    let node_angle = wrap_angle(node_bearing(leaf, center));

    let Some(parent) = leaf.parent() else {
        let full = AngleSpan::full();
        return LeafAngleInfo {
            leaf: leaf.index(),
            left_parent: leaf.index(),
            right_parent: leaf.index(),
            node_angle: 0.0,
            left_parent_angle: full.start,
            right_parent_angle: full.end,
        };
    };
    let right = leaf.id().ends_with(true);

    if parent.parent().is_none() {
        let (start, end) = if right { (0.0, FRAC_PI_2) } else { (-FRAC_PI_2, 0.0) };
        return LeafAngleInfo {
            leaf: leaf.index(),
            left_parent: parent.index(),
            right_parent: parent.index(),
            node_angle: node_angle.clamp(start, end),
            left_parent_angle: start,
            right_parent_angle: end,
        };
    }

    // Climb while still on the leaf's own side; the first node on the other
    // side hangs off the far boundary ancestor.
    let mut opp = parent;
    while let Some(up) = opp.parent() {
        if !opp.id().ends_with(right) {
            break;
        }
        opp = up;
    }
    let far = if opp.id().ends_with(!right) { opp.parent() } else { None };

    let near_angle = unwrap_near(node_bearing(parent, center), node_angle);
    let far_angle = match far {
        Some(node) => unwrap_near(node_bearing(node, center), node_angle),
        None => {
            trace!(leaf = %leaf.id(), "open boundary, reflecting near edge");
            node_angle + (node_angle - near_angle)
        }
    };
    let far_parent = far.unwrap_or(opp);

    let (left_parent, right_parent, left_parent_angle, right_parent_angle) = if right {
        (parent, far_parent, near_angle, far_angle)
    } else {
        (far_parent, parent, far_angle, near_angle)
    };

    LeafAngleInfo {
        leaf: leaf.index(),
        left_parent: left_parent.index(),
        right_parent: right_parent.index(),
        node_angle,
        left_parent_angle,
        right_parent_angle,
    }
}

/// Slices for every leaf, in ascending id order.
pub fn leaf_spans(hierarchy: &Hierarchy<'_>, center: Point) -> Vec<LeafAngleInfo> {
    let spans: Vec<_> = hierarchy
        .leaves()
        .map(|leaf| leaf_angles(leaf, center))
        .collect();
    trace!(leaves = spans.len(), "derived leaf spans");
    spans
}

/// Total angle covered by the leaves of a `depth`-level layout, or `None`
/// where the fixed special cases apply.
pub fn covered_range(depth: usize) -> Option<f64> {
    match depth {
        0 | 1 => None,
        2 => Some(PI),
        _ => Some(2.0 * crate::tree::initial_angle_range(depth).to_radians()),
    }
}
