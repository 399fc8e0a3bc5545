//! Interactive visualizer state
//!
//! A plain struct mutated only through [`Action`]s:
//! - depth and center (drive layout regeneration)
//! - selection, tooltip
//! - highlight radius as an exponent `radius` and a count `radius_n`
//! - layer visibility

mod action;
mod layers;

pub use action::Action;
pub use layers::{Layer, LayerVisibility};

use kurbo::Point;
use tracing::debug;

use crate::bits::NodeId;

/// Depth ceiling offered by the default configuration.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Hover tooltip anchored at a node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Tooltip {
    /// Hovered node.
    pub id: NodeId,
    /// Anchor position.
    pub position: Point,
}

/// `2^exp`, saturating at `u64::MAX`.
pub(crate) fn pow2(exp: u32) -> u64 {
    1u64.checked_shl(exp).unwrap_or(u64::MAX)
}

/// Mutable view state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct VisualizerState {
    /// Tree depth (levels, root included), within `[1, max_depth]`.
    pub depth: usize,

    /// Upper bound for `depth`.
    pub max_depth: usize,

    /// Selected node, if any.
    pub selected: Option<NodeId>,

    /// Hovered node, if any.
    pub tooltip: Option<Tooltip>,

    /// Highlight radius exponent; `radius_n` lies in `[2^(r−1), 2^r − 1]`
    /// after radius steps.
    pub radius: u32,

    /// Highlight radius in distance units; 0 highlights nothing.
    pub radius_n: u64,

    /// Layout center.
    pub center: Point,

    /// Layer visibility.
    pub layers: LayerVisibility,
}

impl Default for VisualizerState {
    fn default() -> Self {
        Self::new(1, DEFAULT_MAX_DEPTH, Point::ORIGIN)
    }
}

impl VisualizerState {
    /// Fresh state with nothing selected.
    pub fn new(depth: usize, max_depth: usize, center: Point) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            depth: depth.clamp(1, max_depth),
            max_depth,
            selected: None,
            tooltip: None,
            radius: 0,
            radius_n: 0,
            center,
            layers: LayerVisibility::default(),
        }
    }

    fn clamp_depth(&self, depth: usize) -> usize {
        depth.clamp(1, self.max_depth)
    }

    /// Jump to `depth`, select its leftmost leaf and clear the radius.
    fn reset_to_depth(&mut self, depth: usize) {
        self.depth = self.clamp_depth(depth);
        self.selected = Some(NodeId::zeros(self.depth - 1));
        self.radius = 0;
        self.radius_n = 0;
    }

    /// Apply one action in place.
    pub fn apply(&mut self, action: Action) {
        let name = action.name();
        match action {
            Action::SetDepth(depth) => self.depth = self.clamp_depth(depth),
            Action::ChangeDepth(depth) => self.reset_to_depth(depth),
            Action::IncDepth => self.reset_to_depth(self.depth.saturating_add(1)),
            Action::DecDepth => self.reset_to_depth(self.depth.saturating_sub(1)),
            Action::SetSelected(id) => self.selected = Some(id),
            Action::ClearSelected => self.selected = None,
            Action::SetTooltip(tooltip) => self.tooltip = tooltip,
            Action::SetRadius(radius) => {
                self.radius = radius;
                self.radius_n = pow2(radius).saturating_sub(1);
            }
            Action::SetRadiusN(n) => {
                let limit = pow2(self.radius);
                if n >= limit {
                    self.radius = self.radius.saturating_add(1);
                } else if n < limit / 2 {
                    self.radius = self.radius.saturating_sub(1);
                }
                self.radius_n = n;
            }
            Action::RadiusNInc => {
                if self.radius_n == pow2(self.radius).saturating_sub(1) {
                    self.radius = self.radius.saturating_add(1);
                }
                self.radius_n = self.radius_n.saturating_add(1);
            }
            Action::RadiusNDec => {
                if self.radius_n == 0 {
                    return;
                }
                if self.radius_n == pow2(self.radius) / 2 {
                    self.radius = self.radius.saturating_sub(1);
                }
                self.radius_n -= 1;
            }
            Action::SetCenter(center) => self.center = center,
            Action::SetLayer(layer, visible) => self.layers.set(layer, visible),
        }

        debug!(
            action = name,
            depth = self.depth,
            selected = self.selected.as_ref().map(ToString::to_string),
            radius = self.radius,
            radius_n = self.radius_n,
            "applied action"
        );
    }

    /// Whether `id` is the current selection.
    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Whether `id` is under the tooltip.
    pub fn is_hovered(&self, id: &NodeId) -> bool {
        self.tooltip.as_ref().is_some_and(|t| &t.id == id)
    }

    /// Whether `id` lies on the root → selection path.
    pub fn on_selected_path(&self, id: &NodeId) -> bool {
        self.selected.as_ref().is_some_and(|s| id.is_prefix_of(s))
    }
}
