//! # Radial XOR-distance tree
//!
//! Lays out a complete binary tree radially around a center, labels nodes
//! with root-to-node bit paths, and measures Kademlia-style XOR distance
//! between leaves.
//!
//! ## Pipeline
//!
//! 1. **Generation**: depth + center → positioned [`TreeNode`]s
//! 2. **Hierarchy**: arena view with parent indices and pre-order walks
//! 3. **Spans**: every leaf owns the slice between two boundary ancestors
//! 4. **Heat**: XOR distance from the selection, mapped onto a red ramp
//! 5. **Frame**: styled nodes, links, hexary overlay, heat arcs → SVG
//!
//! ## Usage Example
//!
//! ```
//! use xor_tree::{Visualizer, VisualizerConfig, xor_distance};
//!
//! let mut vis = Visualizer::new(VisualizerConfig::for_viewport(800.0, 600.0)).unwrap();
//! vis.set_depth(3).unwrap();
//! vis.select("0b10").unwrap();
//! let heat = vis.heat_map();
//! assert_eq!(heat.cells().len(), 4);
//! assert_eq!(xor_distance("0b00", "0b11"), "0x03");
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod bits;     // Bit-path ids and XOR distance
pub mod tree;     // Radial layout and hierarchy view
pub mod geometry; // Angles and leaf spans
pub mod heat;     // Distance colouring
pub mod state;    // Interactive state and actions
pub mod render;   // Frames and SVG output

pub use bits::{xor_distance, IdError, NodeId, XorDistance, ZERO_DISTANCE};
pub use geometry::{leaf_angles, leaf_spans, AngleSpan, LeafAngleInfo};
pub use heat::{HeatCell, HeatMap, RingRadii};
pub use render::{render_svg, write_svg, Frame, SvgOptions};
pub use state::{Action, Layer, LayerVisibility, Tooltip, VisualizerState};
pub use tree::{generate_tree, Hierarchy, LayoutConfig, RadialProfile, TreeNode};

use kurbo::Point;
use thiserror::Error;
use tracing::{debug, info};

use tree::MAX_NON_OVERLAPPING_DEPTH;

/// Visualizer parameters
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    /// Deepest tree offered (levels, root included)
    pub max_depth: usize,

    /// Depth shown on start
    pub initial_depth: usize,

    /// Viewport width
    pub width: f64,

    /// Viewport height
    pub height: f64,

    /// Radial spacing profile
    pub profile: RadialProfile,

    /// Leaf radius as a fraction of the center's y
    pub leaf_ratio: f64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self::for_viewport(800.0, 600.0)
    }
}

impl VisualizerConfig {
    /// Defaults for a `width × height` viewport
    pub fn for_viewport(width: f64, height: f64) -> Self {
        Self {
            max_depth: state::DEFAULT_MAX_DEPTH,
            initial_depth: 1,
            width,
            height,
            profile: RadialProfile::default(),
            leaf_ratio: tree::DEFAULT_LEAF_RATIO,
        }
    }

    /// Viewport center, where the root sits
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Layout parameters for `depth` around `center`
    pub fn layout(&self, depth: usize, center: Point) -> LayoutConfig {
        LayoutConfig::new(depth, center)
            .with_profile(self.profile)
            .with_leaf_ratio(self.leaf_ratio)
    }

    /// Check every field
    pub fn validate(&self) -> Result<(), VisualizerError> {
        if !(1..=MAX_NON_OVERLAPPING_DEPTH).contains(&self.max_depth) {
            return Err(VisualizerError::DepthOutOfRange {
                depth: self.max_depth,
                max: MAX_NON_OVERLAPPING_DEPTH,
            });
        }
        if !(1..=self.max_depth).contains(&self.initial_depth) {
            return Err(VisualizerError::DepthOutOfRange {
                depth: self.initial_depth,
                max: self.max_depth,
            });
        }
        validate_viewport(self.width, self.height)?;
        if !(self.leaf_ratio.is_finite() && self.leaf_ratio > 0.0) {
            return Err(VisualizerError::InvalidConfig(format!(
                "leaf ratio must be positive, got {}",
                self.leaf_ratio
            )));
        }
        if let RadialProfile::DepthRatio { offset } = self.profile {
            if !(offset.is_finite() && offset > -1.0) {
                return Err(VisualizerError::InvalidConfig(format!(
                    "depth ratio offset must be finite and above -1, got {offset}"
                )));
            }
        }
        Ok(())
    }
}

fn validate_viewport(width: f64, height: f64) -> Result<(), VisualizerError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(VisualizerError::InvalidViewport { width, height })
    }
}

/// Errors raised at the visualizer boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisualizerError {
    /// Requested depth is outside `[1, max]`
    #[error("depth {depth} outside 1..={max}")]
    DepthOutOfRange {
        /// Requested depth
        depth: usize,
        /// Largest accepted depth
        max: usize,
    },

    /// Viewport has a non-positive or non-finite side
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },

    /// Other configuration problem
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Id does not name a node of the current tree
    #[error("no node {0} in the current tree")]
    UnknownNode(String),

    /// Only leaves can be selected
    #[error("{0} is not a leaf")]
    NotALeaf(String),

    /// Id text failed to parse
    #[error(transparent)]
    InvalidId(#[from] IdError),
}

/// Interactive controller
///
/// Owns the state and the tree generated for its depth and center. Every
/// mutation goes through [`dispatch`](Self::dispatch), which regenerates the
/// tree when the layout inputs change.
#[derive(Debug)]
pub struct Visualizer {
    config: VisualizerConfig,
    state: VisualizerState,
    tree: TreeNode,
    spans: Vec<LeafAngleInfo>,
}

impl Visualizer {
    /// Create a controller showing `config.initial_depth`
    pub fn new(config: VisualizerConfig) -> Result<Self, VisualizerError> {
        config.validate()?;
        let state = VisualizerState::new(config.initial_depth, config.max_depth, config.center());
        let tree = tree::generate(&config.layout(state.depth, state.center));
        let spans = leaf_spans(&Hierarchy::new(&tree), state.center);
        info!(
            depth = state.depth,
            max_depth = config.max_depth,
            width = config.width,
            height = config.height,
            "visualizer ready"
        );
        Ok(Self {
            config,
            state,
            tree,
            spans,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &VisualizerState {
        &self.state
    }

    /// Current tree
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    /// Hierarchy view of the current tree
    pub fn hierarchy(&self) -> Hierarchy<'_> {
        Hierarchy::new(&self.tree)
    }

    /// Leaf spans of the current tree, in ascending id order
    pub fn leaf_spans(&self) -> &[LeafAngleInfo] {
        &self.spans
    }

    /// Apply an action, regenerating the layout when depth or center moved
    pub fn dispatch(&mut self, action: Action) {
        if !action.reshapes_tree() {
            self.state.apply(action);
            return;
        }
        let before = (self.state.depth, self.state.center);
        self.state.apply(action);
        if (self.state.depth, self.state.center) != before {
            self.regenerate();
        }
    }

    fn regenerate(&mut self) {
        let layout = self.config.layout(self.state.depth, self.state.center);
        self.tree = tree::generate(&layout);
        self.spans = leaf_spans(&Hierarchy::new(&self.tree), self.state.center);
        debug!(
            depth = self.state.depth,
            leaves = self.spans.len(),
            "regenerated layout"
        );
    }

    /// Switch depth, resetting selection to the leftmost leaf
    pub fn set_depth(&mut self, depth: usize) -> Result<(), VisualizerError> {
        if !(1..=self.state.max_depth).contains(&depth) {
            return Err(VisualizerError::DepthOutOfRange {
                depth,
                max: self.state.max_depth,
            });
        }
        self.dispatch(Action::ChangeDepth(depth));
        Ok(())
    }

    /// Select the leaf named by `id`
    pub fn select(&mut self, id: &str) -> Result<NodeId, VisualizerError> {
        let id: NodeId = id.parse()?;
        {
            let hierarchy = self.hierarchy();
            let node = hierarchy
                .find(&id)
                .ok_or_else(|| VisualizerError::UnknownNode(id.to_string()))?;
            if !node.is_leaf() {
                return Err(VisualizerError::NotALeaf(id.to_string()));
            }
        }
        self.dispatch(Action::SetSelected(id.clone()));
        Ok(id)
    }

    /// Point the tooltip at `id`, or clear it with `None`
    pub fn hover(&mut self, id: Option<&str>) -> Result<(), VisualizerError> {
        let tooltip = match id {
            None => None,
            Some(text) => {
                let id: NodeId = text.parse()?;
                let position = self
                    .hierarchy()
                    .find(&id)
                    .map(|node| node.position())
                    .ok_or_else(|| VisualizerError::UnknownNode(id.to_string()))?;
                Some(Tooltip { id, position })
            }
        };
        self.dispatch(Action::SetTooltip(tooltip));
        Ok(())
    }

    /// Follow a viewport resize: the root moves to the new center
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), VisualizerError> {
        validate_viewport(width, height)?;
        self.config.width = width;
        self.config.height = height;
        self.dispatch(Action::SetCenter(self.config.center()));
        Ok(())
    }

    /// Heat cells for the current selection and radius
    pub fn heat_map(&self) -> HeatMap {
        HeatMap::build(
            &self.hierarchy(),
            self.state.center,
            self.state.selected.as_ref(),
            self.state.radius_n,
        )
    }

    /// Everything to draw for the current state
    pub fn frame(&self) -> Frame {
        Frame::build(&self.hierarchy(), &self.state)
    }

    /// SVG document for the current state, sized to the viewport
    pub fn render_svg(&self) -> anyhow::Result<String> {
        render_svg(
            &self.frame(),
            &SvgOptions::new(self.config.width, self.config.height),
        )
    }
}
