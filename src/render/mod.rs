//! Presentation model and SVG output
//!
//! A [`Frame`] is everything drawn for one state: styled nodes and links,
//! the hexary overlay, heat cells and their labels. Frames are plain data
//! so the SVG writer (or any other backend) only has to walk them.

mod arc;
mod style;
mod svg;

pub use arc::{annular_sector, arc_path, sector_area, ARC_TOLERANCE};
pub use style::{LinkFlags, LinkStyle, NodeFlags, NodeStyle, EMPHASIS_RADIUS, HIGHLIGHT};
pub use svg::{render_svg, write_svg, SvgOptions, LEGEND_SWATCHES};

use kurbo::Point;
use tracing::debug;

use crate::bits::{NodeId, XorDistance};
use crate::heat::{decimal_digits, label_start_angle, within_radius, HeatMap, LabelContext};
use crate::state::{Layer, LayerVisibility, VisualizerState};
use crate::tree::Hierarchy;

/// Path length of a nibble-aligned ("hexary") node.
pub const NIBBLE: usize = 4;

/// Labels past this depth collapse to a dot unless emphasized.
pub const LABEL_DEPTH_LIMIT: usize = 9;

/// A positioned, styled node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeMark {
    /// Node id.
    pub id: NodeId,
    /// Circle center.
    pub position: Point,
    /// Hierarchy depth.
    pub depth: usize,
    /// Whether the node is a leaf (selectable).
    pub leaf: bool,
    /// Resolved style.
    pub style: NodeStyle,
}

/// A styled parent → child line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct LinkMark {
    /// Child end id.
    pub child: NodeId,
    /// Parent position.
    pub source: Point,
    /// Child position.
    pub target: Point,
    /// Resolved style.
    pub style: LinkStyle,
}

/// Kind of hexary overlay line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum HexaryKind {
    /// Center → nibble-aligned node.
    Spoke,
    /// Four-levels-up ancestor → leaf.
    Hop,
}

/// One hexary overlay line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct HexaryLink {
    /// Line kind.
    pub kind: HexaryKind,
    /// Node the line ends at.
    pub target_id: NodeId,
    /// Start point.
    pub source: Point,
    /// End point.
    pub target: Point,
}

/// Distance label drawn along a heat slice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct LabelMark {
    /// Leaf the label belongs to.
    pub id: NodeId,
    /// Printed text.
    pub text: String,
    /// Start of the text path.
    pub start_angle: f64,
    /// End of the text path.
    pub end_angle: f64,
    /// Text path radius.
    pub radius: f64,
    /// Font size in rem.
    pub font_size: f64,
    /// Zero distance (the selection itself).
    pub is_origin: bool,
}

/// Everything drawn for one state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Frame {
    /// Tree depth (levels).
    pub depth: usize,
    /// Layout center.
    pub center: Point,
    /// Highlight radius.
    pub radius_n: u64,
    /// Layer visibility.
    pub layers: LayerVisibility,
    /// Nodes in pre-order.
    pub nodes: Vec<NodeMark>,
    /// Links in pre-order of the child end.
    pub links: Vec<LinkMark>,
    /// Hexary overlay lines.
    pub hexary_links: Vec<HexaryLink>,
    /// Heat cells.
    pub heat: HeatMap,
    /// Distance labels, present with a selection.
    pub labels: Vec<LabelMark>,
}

impl Frame {
    /// Assemble a frame from a hierarchy and the state that produced it.
    pub fn build(hierarchy: &Hierarchy<'_>, state: &VisualizerState) -> Self {
        let depth = hierarchy.height() + 1;
        let center = state.center;
        let selected = state.selected.as_ref();
        let hexary_visible = state.layers.is_visible(Layer::HexaryNodes);

        let nodes: Vec<NodeMark> = hierarchy
            .descendants()
            .map(|node| {
                let id = node.id();
                let in_radius = selected
                    .and_then(|s| XorDistance::between(s, id))
                    .is_some_and(|d| within_radius(d.value(), state.radius_n));
                let flags = NodeFlags {
                    depth: node.depth(),
                    right: id.ends_with(true),
                    selected: state.is_selected(id),
                    hovered: state.is_hovered(id),
                    hexary: hexary_visible && depth > NIBBLE && id.len() == NIBBLE,
                    in_radius,
                };
                NodeMark {
                    id: id.clone(),
                    position: node.position(),
                    depth: node.depth(),
                    leaf: node.is_leaf(),
                    style: NodeStyle::resolve(flags),
                }
            })
            .collect();

        let links: Vec<LinkMark> = hierarchy
            .links()
            .map(|link| {
                let child = link.target.id();
                let flags = LinkFlags {
                    depth: link.target.depth(),
                    right: child.ends_with(true),
                    on_path: state.on_selected_path(child),
                    has_selection: selected.is_some(),
                    hovered: state.is_hovered(child),
                };
                LinkMark {
                    child: child.clone(),
                    source: link.source.position(),
                    target: link.target.position(),
                    style: LinkStyle::resolve(flags),
                }
            })
            .collect();

        let mut hexary_links: Vec<HexaryLink> = hierarchy
            .descendants()
            .filter(|node| node.depth() > 0 && node.depth() % NIBBLE == 0)
            .map(|node| HexaryLink {
                kind: HexaryKind::Spoke,
                target_id: node.id().clone(),
                source: center,
                target: node.position(),
            })
            .collect();
        hexary_links.extend(hierarchy.leaves().filter_map(|leaf| {
            leaf.ancestors().nth(NIBBLE).map(|anchor| HexaryLink {
                kind: HexaryKind::Hop,
                target_id: leaf.id().clone(),
                source: anchor.position(),
                target: leaf.position(),
            })
        }));

        let heat = HeatMap::build(hierarchy, center, selected, state.radius_n);
        let labels = Self::labels(&heat, state, depth);

        debug!(
            depth,
            nodes = nodes.len(),
            links = links.len(),
            hexary = hexary_links.len(),
            labels = labels.len(),
            "assembled frame"
        );
        Self {
            depth,
            center,
            radius_n: state.radius_n,
            layers: state.layers,
            nodes,
            links,
            hexary_links,
            heat,
            labels,
        }
    }

    fn labels(heat: &HeatMap, state: &VisualizerState, depth: usize) -> Vec<LabelMark> {
        let rings = heat.rings();
        heat.cells()
            .iter()
            .filter_map(|cell| {
                let distance = cell.distance_value()?;
                let emphasized = state.is_hovered(&cell.id) || state.is_selected(&cell.id);
                let start_angle = label_start_angle(&LabelContext {
                    span: cell.span,
                    digits: decimal_digits(distance),
                    depth,
                    emphasized,
                    right_child: cell.id.ends_with(true),
                });
                let (end_angle, radius) = if emphasized {
                    (cell.span.end + std::f64::consts::PI, rings.heat_outer + 24.0)
                } else {
                    (cell.span.end, (rings.node_outer + rings.heat_outer + 16.0) / 2.0)
                };
                let font_size = if emphasized || depth < 4 {
                    7.0
                } else {
                    3.0 - depth as f64 / 3.0
                };
                let text = if emphasized || depth < LABEL_DEPTH_LIMIT {
                    distance.to_string()
                } else {
                    ".".to_string()
                };
                Some(LabelMark {
                    id: cell.id.clone(),
                    text,
                    start_angle,
                    end_angle,
                    radius,
                    font_size,
                    is_origin: distance == 0,
                })
            })
            .collect()
    }

    /// Node mark for `id`.
    pub fn node(&self, id: &NodeId) -> Option<&NodeMark> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Digest of the frame contents. Equal frames hash equal.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        let point = |h: &mut blake3::Hasher, p: Point| {
            h.update(&p.x.to_bits().to_le_bytes());
            h.update(&p.y.to_bits().to_le_bytes());
        };
        let text = |h: &mut blake3::Hasher, s: &str| {
            h.update(&(s.len() as u64).to_le_bytes());
            h.update(s.as_bytes());
        };

        hasher.update(&(self.depth as u64).to_le_bytes());
        hasher.update(&self.radius_n.to_le_bytes());
        point(&mut hasher, self.center);
        for layer in Layer::ALL {
            hasher.update(&[self.layers.is_visible(layer) as u8]);
        }

        for node in &self.nodes {
            text(&mut hasher, &node.id.to_string());
            point(&mut hasher, node.position);
            hasher.update(&node.style.radius.to_bits().to_le_bytes());
            text(&mut hasher, node.style.fill);
            text(&mut hasher, node.style.stroke);
            hasher.update(&node.style.stroke_width.to_bits().to_le_bytes());
        }
        for link in &self.links {
            text(&mut hasher, &link.child.to_string());
            point(&mut hasher, link.source);
            point(&mut hasher, link.target);
            text(&mut hasher, &link.style.stroke);
            hasher.update(&link.style.opacity.to_bits().to_le_bytes());
        }
        for link in &self.hexary_links {
            hasher.update(&[link.kind as u8]);
            point(&mut hasher, link.source);
            point(&mut hasher, link.target);
        }
        for cell in self.heat.cells() {
            text(&mut hasher, &cell.id.to_string());
            hasher.update(&cell.span.start.to_bits().to_le_bytes());
            hasher.update(&cell.span.end.to_bits().to_le_bytes());
            hasher.update(&cell.distance_value().unwrap_or(u64::MAX).to_le_bytes());
            hasher.update(&[cell.in_radius as u8]);
        }
        for label in &self.labels {
            text(&mut hasher, &label.text);
            hasher.update(&label.start_angle.to_bits().to_le_bytes());
        }
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, Tooltip};
    use crate::tree::generate_tree;

    fn frame_for(state: &VisualizerState) -> Frame {
        let tree = generate_tree(state.depth, state.center);
        let hierarchy = Hierarchy::new(&tree);
        Frame::build(&hierarchy, state)
    }

    fn state(depth: usize) -> VisualizerState {
        VisualizerState::new(depth, 16, Point::new(400.0, 300.0))
    }

    #[test]
    fn test_counts() {
        let frame = frame_for(&state(4));
        assert_eq!(frame.nodes.len(), 15);
        assert_eq!(frame.links.len(), 14);
        assert_eq!(frame.heat.cells().len(), 8);
        assert!(frame.labels.is_empty());
    }

    #[test]
    fn test_selection_styles_path() {
        let mut s = state(4);
        s.apply(Action::SetSelected("0b101".parse().unwrap()));
        let frame = frame_for(&s);

        let selected = frame.node(&"0b101".parse().unwrap()).unwrap();
        assert_eq!(selected.style.stroke, HIGHLIGHT);
        assert_eq!(selected.style.radius, EMPHASIS_RADIUS);

        let on_path: Vec<String> = frame
            .links
            .iter()
            .filter(|l| l.style.stroke == "#00F" || l.style.stroke == "#0f0")
            .map(|l| l.child.to_string())
            .collect();
        assert_eq!(on_path, vec!["0b1", "0b10", "0b101"]);
        assert_eq!(frame.labels.len(), 8);
        assert!(frame.labels.iter().any(|l| l.is_origin && l.id == selected.id));
    }

    #[test]
    fn test_interior_nodes_never_in_radius() {
        let mut s = state(5);
        s.apply(Action::SetSelected("0b0000".parse().unwrap()));
        s.apply(Action::SetRadius(2));
        let frame = frame_for(&s);
        let highlighted: Vec<String> = frame
            .nodes
            .iter()
            .filter(|n| n.style.stroke == HIGHLIGHT)
            .map(|n| n.id.to_string())
            .collect();
        assert_eq!(highlighted, vec!["0b0000", "0b0001", "0b0010", "0b0011"]);
    }

    #[test]
    fn test_hexary_overlay() {
        let frame = frame_for(&state(6));
        let spokes = frame
            .hexary_links
            .iter()
            .filter(|l| l.kind == HexaryKind::Spoke)
            .count();
        let hops = frame
            .hexary_links
            .iter()
            .filter(|l| l.kind == HexaryKind::Hop)
            .count();
        assert_eq!(spokes, 16);
        assert_eq!(hops, 32);
        assert!(frame
            .nodes
            .iter()
            .filter(|n| n.id.len() == NIBBLE)
            .all(|n| n.style.stroke == "#FFF"));
    }

    #[test]
    fn test_shallow_tree_has_no_hexary_overlay() {
        let frame = frame_for(&state(4));
        assert!(frame.hexary_links.is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_state() {
        let mut s = state(5);
        let before = frame_for(&s).fingerprint();
        assert_eq!(before, frame_for(&s).fingerprint());

        s.apply(Action::SetTooltip(Some(Tooltip {
            id: "0b0110".parse().unwrap(),
            position: Point::ORIGIN,
        })));
        assert_ne!(before, frame_for(&s).fingerprint());
    }
}
