//! Positioned tree node
//!
//! Node = (id, position, bearing)
//! Children are owned: [left (bit 0), right (bit 1)]

use std::fmt;

use kurbo::Point;

use crate::bits::NodeId;

/// One node of the generated binary tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Root-to-node bit path.
    pub id: NodeId,

    /// Cartesian position (screen coordinates, y grows downward).
    pub position: Point,

    /// Bearing in degrees used while placing children (0 = up, clockwise).
    pub angle: f64,

    /// Left and right children, absent on leaves.
    pub children: Option<Box<[TreeNode; 2]>>,
}

impl TreeNode {
    /// Create a childless node.
    pub fn new(id: NodeId, position: Point, angle: f64) -> Self {
        Self {
            id,
            position,
            angle,
            children: None,
        }
    }

    /// Check if leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// X coordinate.
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Y coordinate.
    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Left child (bit 0).
    pub fn left(&self) -> Option<&TreeNode> {
        self.children.as_deref().map(|[left, _]| left)
    }

    /// Right child (bit 1).
    pub fn right(&self) -> Option<&TreeNode> {
        self.children.as_deref().map(|[_, right]| right)
    }

    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        1 + self
            .children
            .iter()
            .flat_map(|children| children.iter())
            .map(TreeNode::size)
            .sum::<usize>()
    }

    /// Distance from this node to its deepest leaf.
    ///
    /// Generated trees are perfect, so following the left spine suffices.
    pub fn height(&self) -> usize {
        let mut node = self;
        let mut height = 0;
        while let Some(left) = node.left() {
            node = left;
            height += 1;
        }
        height
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ ({:.2}, {:.2}) {:.2}°",
            self.id, self.position.x, self.position.y, self.angle
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        let root_id = NodeId::root();
        let mut root = TreeNode::new(root_id.clone(), Point::new(0.0, 0.0), 0.0);
        root.children = Some(Box::new([
            TreeNode::new(root_id.child(false), Point::new(-1.0, -1.0), -45.0),
            TreeNode::new(root_id.child(true), Point::new(1.0, -1.0), 45.0),
        ]));
        root
    }

    #[test]
    fn test_children_accessors() {
        let root = sample();
        assert!(!root.is_leaf());
        assert_eq!(root.left().unwrap().id.to_string(), "0b0");
        assert_eq!(root.right().unwrap().id.to_string(), "0b1");
        assert!(root.left().unwrap().is_leaf());
    }

    #[test]
    fn test_size_and_height() {
        let root = sample();
        assert_eq!(root.size(), 3);
        assert_eq!(root.height(), 1);
        assert_eq!(root.left().unwrap().height(), 0);
    }

    #[test]
    fn test_display() {
        let root = sample();
        assert_eq!(root.right().unwrap().to_string(), "0b1 @ (1.00, -1.00) 45.00°");
    }
}
