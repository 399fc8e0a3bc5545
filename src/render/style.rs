//! Node and link appearance

/// Node radius when hovered or selected, and the depth-0 radius.
pub const EMPHASIS_RADIUS: f64 = 16.0;

/// Highlight colour for the selection and the radius band.
pub const HIGHLIGHT: &str = "yellow";

/// What a node's appearance depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeFlags {
    /// Hierarchy depth of the node.
    pub depth: usize,
    /// Last path bit is 1.
    pub right: bool,
    /// Node is the selection.
    pub selected: bool,
    /// Node is under the tooltip.
    pub hovered: bool,
    /// Nibble-aligned node of a tree deeper than 4 levels.
    pub hexary: bool,
    /// Within the highlight radius of the selection.
    pub in_radius: bool,
}

/// Resolved circle attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeStyle {
    /// Circle radius.
    pub radius: f64,
    /// Fill colour.
    pub fill: &'static str,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Stroke colour.
    pub stroke: &'static str,
    /// Stroke width.
    pub stroke_width: f64,
}

impl NodeStyle {
    /// Resolve the style for `flags`.
    pub fn resolve(flags: NodeFlags) -> Self {
        let NodeFlags {
            depth,
            right,
            selected,
            hovered,
            hexary,
            in_radius,
        } = flags;

        let radius = if hovered || selected {
            EMPHASIS_RADIUS
        } else {
            (EMPHASIS_RADIUS - depth as f64 * 1.5).max(1.0)
        };

        let fill = match (selected, hovered, right) {
            (true, _, true) => "#00f",
            (true, _, false) => "#0f0",
            (false, true, true) => "#55f",
            (false, true, false) => "#5f5",
            (false, false, true) => "#99f",
            (false, false, false) => "#9f9",
        };

        let stroke = if selected || in_radius {
            HIGHLIGHT
        } else if hexary {
            "#FFF"
        } else if hovered {
            if right { "#00f" } else { "#0f0" }
        } else if right {
            "#88f"
        } else {
            "#8f8"
        };

        let stroke_width = if selected {
            4.0
        } else if in_radius {
            3.0
        } else {
            2.0
        };

        Self {
            radius,
            fill,
            fill_opacity: if selected || hovered || hexary { 1.0 } else { 0.75 },
            stroke,
            stroke_width,
        }
    }
}

/// What a link's appearance depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkFlags {
    /// Hierarchy depth of the child end.
    pub depth: usize,
    /// Child is a right child.
    pub right: bool,
    /// Child lies on the root → selection path.
    pub on_path: bool,
    /// Something is selected.
    pub has_selection: bool,
    /// Child is under the tooltip.
    pub hovered: bool,
}

/// Resolved line attributes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct LinkStyle {
    /// Stroke colour (`#rgb`).
    pub stroke: String,
    /// Stroke width.
    pub width: f64,
    /// Stroke opacity.
    pub opacity: f64,
}

impl LinkStyle {
    /// Resolve the style for `flags`.
    ///
    /// Right links shade from blue towards cyan with depth, left links from
    /// green towards white. Links on the selected path stay saturated.
    pub fn resolve(flags: LinkFlags) -> Self {
        let stroke = if flags.right {
            let shade = if flags.on_path { 0 } else { flags.depth.min(15) };
            format!("#0{shade:x}F")
        } else {
            let shade = if flags.on_path {
                0
            } else {
                ((flags.depth as f64 * 1.75).floor() as usize).min(15)
            };
            format!("#{shade:x}f{shade:x}")
        };

        let opacity = if flags.has_selection {
            1.0
        } else if flags.hovered || flags.on_path {
            0.8
        } else {
            0.7
        };

        Self {
            stroke,
            width: (32.0 - flags.depth as f64 * 2.0).max(1.0),
            opacity,
        }
    }
}
