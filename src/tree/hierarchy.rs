//! Read-only hierarchy view over a generated tree
//!
//! Arena of entries in pre-order. Parents are indices, never owners, so a
//! view can walk up and down without reference cycles.

use kurbo::Point;

use super::TreeNode;
use crate::bits::NodeId;

/// Position of a node in its [`Hierarchy`] arena (pre-order rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Raw arena offset.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Entry<'t> {
    data: &'t TreeNode,
    depth: usize,
    parent: Option<NodeIndex>,
    children: Option<[NodeIndex; 2]>,
}

/// Traversal structure borrowed from a [`TreeNode`].
#[derive(Debug)]
pub struct Hierarchy<'t> {
    entries: Vec<Entry<'t>>,
}

impl<'t> Hierarchy<'t> {
    /// Index every node of `root` in pre-order.
    pub fn new(root: &'t TreeNode) -> Self {
        let mut entries = Vec::with_capacity(root.size());
        Self::visit(&mut entries, root, 0, None);
        Self { entries }
    }

    fn visit(
        entries: &mut Vec<Entry<'t>>,
        node: &'t TreeNode,
        depth: usize,
        parent: Option<NodeIndex>,
    ) -> NodeIndex {
        let index = NodeIndex(entries.len());
        entries.push(Entry {
            data: node,
            depth,
            parent,
            children: None,
        });

        if let Some(children) = node.children.as_deref() {
            let left = Self::visit(entries, &children[0], depth + 1, Some(index));
            let right = Self::visit(entries, &children[1], depth + 1, Some(index));
            entries[index.0].children = Some([left, right]);
        }
        index
    }

    /// Root view.
    pub fn root(&self) -> HierarchyNode<'_, 't> {
        HierarchyNode {
            hierarchy: self,
            index: NodeIndex(0),
        }
    }

    /// View of the node at `index`, if it belongs to this hierarchy.
    pub fn get(&self, index: NodeIndex) -> Option<HierarchyNode<'_, 't>> {
        (index.0 < self.entries.len()).then_some(HierarchyNode {
            hierarchy: self,
            index,
        })
    }

    /// Locate a node by walking its path bits from the root.
    pub fn find(&self, id: &NodeId) -> Option<HierarchyNode<'_, 't>> {
        let mut node = self.root();
        for right in id.bits().iter().by_vals() {
            let [left_child, right_child] = node.children()?;
            node = if right { right_child } else { left_child };
        }
        Some(node)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a hierarchy holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Depth of the deepest node (0 for a lone root).
    pub fn height(&self) -> usize {
        self.entries.iter().map(|e| e.depth).max().unwrap_or(0)
    }

    /// Pre-order walk from the root, root included.
    pub fn descendants(&self) -> Descendants<'_, 't> {
        self.root().descendants()
    }

    /// Leaves in pre-order, which for generated trees is ascending id order.
    pub fn leaves(&self) -> impl Iterator<Item = HierarchyNode<'_, 't>> + '_ {
        self.descendants().filter(|node| node.is_leaf())
    }

    /// Parent → child pairs for every non-root node, in pre-order.
    pub fn links(&self) -> impl Iterator<Item = Link<'_, 't>> + '_ {
        self.descendants().filter_map(|child| {
            child.parent().map(|parent| Link {
                source: parent,
                target: child,
            })
        })
    }
}

/// Edge between a node and its parent.
#[derive(Debug, Clone, Copy)]
pub struct Link<'h, 't> {
    /// Parent end.
    pub source: HierarchyNode<'h, 't>,
    /// Child end.
    pub target: HierarchyNode<'h, 't>,
}

/// Cursor onto one node of a [`Hierarchy`].
#[derive(Debug, Clone, Copy)]
pub struct HierarchyNode<'h, 't> {
    hierarchy: &'h Hierarchy<'t>,
    index: NodeIndex,
}

impl<'h, 't> HierarchyNode<'h, 't> {
    fn entry(&self) -> &'h Entry<'t> {
        &self.hierarchy.entries[self.index.0]
    }

    fn at(&self, index: NodeIndex) -> Self {
        Self {
            hierarchy: self.hierarchy,
            index,
        }
    }

    /// Arena index.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Underlying tree node.
    pub fn data(&self) -> &'t TreeNode {
        self.entry().data
    }

    /// Shorthand for `data().id`.
    pub fn id(&self) -> &'t NodeId {
        &self.entry().data.id
    }

    /// Shorthand for `data().position`.
    pub fn position(&self) -> Point {
        self.entry().data.position
    }

    /// Distance from the root.
    pub fn depth(&self) -> usize {
        self.entry().depth
    }

    /// Parent view, `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.entry().parent.map(|index| self.at(index))
    }

    /// `[left, right]` child views, `None` on leaves.
    pub fn children(&self) -> Option<[Self; 2]> {
        self.entry()
            .children
            .map(|[left, right]| [self.at(left), self.at(right)])
    }

    /// Check if leaf
    pub fn is_leaf(&self) -> bool {
        self.entry().children.is_none()
    }

    /// This node followed by each ancestor up to the root.
    pub fn ancestors(&self) -> Ancestors<'h, 't> {
        Ancestors { next: Some(*self) }
    }

    /// Pre-order walk of this subtree, this node first.
    pub fn descendants(&self) -> Descendants<'h, 't> {
        Descendants {
            hierarchy: self.hierarchy,
            stack: vec![self.index],
        }
    }
}

impl PartialEq for HierarchyNode<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.hierarchy, other.hierarchy) && self.index == other.index
    }
}

impl Eq for HierarchyNode<'_, '_> {}

/// Iterator returned by [`HierarchyNode::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'h, 't> {
    next: Option<HierarchyNode<'h, 't>>,
}

impl<'h, 't> Iterator for Ancestors<'h, 't> {
    type Item = HierarchyNode<'h, 't>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Lazy pre-order iterator returned by `descendants()`.
///
/// Finite. Call `descendants()` again to restart the walk.
#[derive(Debug, Clone)]
pub struct Descendants<'h, 't> {
    hierarchy: &'h Hierarchy<'t>,
    stack: Vec<NodeIndex>,
}

impl<'h, 't> Iterator for Descendants<'h, 't> {
    type Item = HierarchyNode<'h, 't>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let entry = &self.hierarchy.entries[index.0];
        if let Some([left, right]) = entry.children {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(HierarchyNode {
            hierarchy: self.hierarchy,
            index,
        })
    }
}
