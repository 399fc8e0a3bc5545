//! XOR heat map
//!
//! Each leaf becomes a ring slice coloured by its distance from the
//! selected leaf. Leaves within the highlight radius get a yellow band.

mod color;
mod label;

pub use color::{interpolate_reds, max_distance, ColorScale, Rgb};
pub use label::{decimal_digits, label_start_angle, LabelContext};

use kurbo::Point;
use tracing::debug;

use crate::bits::{NodeId, XorDistance};
use crate::geometry::{leaf_spans, AngleSpan};
use crate::tree::Hierarchy;

/// Inner radius of the heat ring, and the pad added past the leaf ring.
pub const HEAT_PADDING: f64 = 16.0;

/// Node ring half-width at depth 0.
pub const MAX_NODE_WIDTH: f64 = 16.0;

/// Leaf fill used in the node ring for left children.
pub const LEFT_FILL: &str = "green";

/// Leaf fill used in the node ring for right children.
pub const RIGHT_FILL: &str = "blue";

/// Node ring fill: left children green, right children blue.
pub fn fill_by_id(id: &NodeId) -> &'static str {
    if id.ends_with(true) {
        RIGHT_FILL
    } else {
        LEFT_FILL
    }
}

/// Whether `distance` falls inside the highlight radius. A radius of zero
/// highlights nothing.
pub fn within_radius(distance: u64, radius_n: u64) -> bool {
    radius_n > 0 && distance <= radius_n
}

/// Half-width of a node mark at hierarchy depth `depth`.
pub fn node_width(depth: usize) -> f64 {
    (MAX_NODE_WIDTH - depth as f64 * 1.5).max(1.0)
}

/// Radii of the concentric rings drawn around the center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct RingRadii {
    /// Inner edge of the heat slices.
    pub heat_inner: f64,
    /// Outer edge of the heat slices.
    pub heat_outer: f64,
    /// Inner edge of the leaf ring.
    pub node_inner: f64,
    /// Outer edge of the leaf ring.
    pub node_outer: f64,
}

impl RingRadii {
    /// Rings for leaves at `leaf_distance` from the center and hierarchy
    /// depth `leaf_depth`.
    pub fn new(leaf_distance: f64, leaf_depth: usize) -> Self {
        let width = if leaf_depth <= 1 {
            MAX_NODE_WIDTH
        } else {
            node_width(leaf_depth)
        };
        Self {
            heat_inner: HEAT_PADDING,
            heat_outer: leaf_distance + HEAT_PADDING,
            node_inner: leaf_distance - width,
            node_outer: leaf_distance + width,
        }
    }
}

/// One heat-map slice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct HeatCell {
    /// Leaf id.
    pub id: NodeId,
    /// Leaf position.
    pub position: Point,
    /// Distance from the selection, `None` without a selection.
    pub distance: Option<XorDistance>,
    /// Slice occupied by the leaf.
    pub span: AngleSpan,
    /// Heat colour, `None` without a selection.
    pub fill: Option<Rgb>,
    /// Inside the highlight radius.
    pub in_radius: bool,
}

impl HeatCell {
    /// Numeric distance, if any.
    pub fn distance_value(&self) -> Option<u64> {
        self.distance.as_ref().map(XorDistance::value)
    }
}

/// Legend entry pairing a distance with its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Swatch {
    /// Distance value.
    pub distance: u64,
    /// Colour drawn for it.
    pub color: Rgb,
}

/// All heat cells of one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct HeatMap {
    cells: Vec<HeatCell>,
    scale: ColorScale,
    rings: RingRadii,
}

impl HeatMap {
    /// Build cells for every leaf of `hierarchy`.
    ///
    /// A selection of the wrong length (stale after a depth change) yields
    /// zero distances rather than an error.
    pub fn build(
        hierarchy: &Hierarchy<'_>,
        center: Point,
        selected: Option<&NodeId>,
        radius_n: u64,
    ) -> Self {
        let depth = hierarchy.height() + 1;
        let scale = ColorScale::for_depth(depth);

        let mut cells = Vec::with_capacity(crate::tree::leaf_count(depth));
        let mut leaf_distance = 0.0f64;
        for info in leaf_spans(hierarchy, center) {
            let Some(leaf) = hierarchy.get(info.leaf) else {
                continue;
            };
            leaf_distance = leaf_distance.max(leaf.position().distance(center));

            let distance = selected.map(|selected| {
                XorDistance::between(selected, leaf.id()).unwrap_or_else(XorDistance::zero)
            });
            let value = distance.as_ref().map(XorDistance::value);
            cells.push(HeatCell {
                id: leaf.id().clone(),
                position: leaf.position(),
                fill: value.map(|v| scale.color(v)),
                in_radius: value.is_some_and(|v| within_radius(v, radius_n)),
                distance,
                span: info.span(),
            });
        }

        debug!(
            cells = cells.len(),
            selected = selected.map(ToString::to_string),
            radius_n,
            "built heat map"
        );
        Self {
            cells,
            scale,
            rings: RingRadii::new(leaf_distance, depth - 1),
        }
    }

    /// Cells in ascending leaf order.
    pub fn cells(&self) -> &[HeatCell] {
        &self.cells
    }

    /// Cell for `id`.
    pub fn cell(&self, id: &NodeId) -> Option<&HeatCell> {
        self.cells.iter().find(|cell| &cell.id == id)
    }

    /// Colour scale in use.
    pub fn scale(&self) -> ColorScale {
        self.scale
    }

    /// Ring radii in use.
    pub fn rings(&self) -> RingRadii {
        self.rings
    }

    /// `count` evenly spaced legend entries from the scale's min to max,
    /// without repeats.
    pub fn swatches(&self, count: usize) -> Vec<Swatch> {
        let (min, max) = (self.scale.min(), self.scale.max());
        let span = max - min;
        let count = (count.max(1) as u64).min(span.saturating_add(1));

        let mut swatches: Vec<Swatch> = (0..count)
            .map(|i| {
                let distance = if count == 1 {
                    min
                } else {
                    min + ((span as u128 * i as u128) / (count as u128 - 1)) as u64
                };
                Swatch {
                    distance,
                    color: self.scale.color(distance),
                }
            })
            .collect();
        swatches.dedup_by_key(|s| s.distance);
        swatches
    }
}
