//! Radial binary tree
//!
//! Generated fresh for every (depth, center) pair, then walked through a
//! borrowed [`Hierarchy`]. Nothing is mutated after generation.

mod hierarchy;
mod layout;
mod node;

pub use hierarchy::{Ancestors, Descendants, Hierarchy, HierarchyNode, Link, NodeIndex};
pub use layout::{
    generate, generate_tree, initial_angle_range, LayoutConfig, RadialProfile,
    DEFAULT_LEAF_RATIO, MAX_NON_OVERLAPPING_DEPTH,
};
pub use node::TreeNode;

/// Nodes in a tree of `depth` levels: 2^depth − 1, saturating at
/// `usize::MAX`.
pub fn node_count(depth: usize) -> usize {
    pow2(depth.max(1)).saturating_sub(1)
}

/// Leaves in a tree of `depth` levels: 2^(depth − 1), saturating at
/// `usize::MAX`.
pub fn leaf_count(depth: usize) -> usize {
    pow2(depth.max(1) - 1)
}

fn pow2(exp: usize) -> usize {
    u32::try_from(exp)
        .ok()
        .and_then(|exp| 1usize.checked_shl(exp))
        .unwrap_or(usize::MAX)
}
