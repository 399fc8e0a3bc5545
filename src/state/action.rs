//! Actions accepted by the visualizer state

use kurbo::Point;

use super::{Layer, Tooltip};
use crate::bits::NodeId;

/// One state transition request
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set the depth, leaving the selection alone
    SetDepth(usize),

    /// Set the depth and reset selection to the leftmost leaf, radius to 0
    ChangeDepth(usize),

    /// One level deeper (same reset as `ChangeDepth`)
    IncDepth,

    /// One level shallower (same reset as `ChangeDepth`)
    DecDepth,

    /// Select a node
    SetSelected(NodeId),

    /// Clear the selection
    ClearSelected,

    /// Show or hide the hover tooltip
    SetTooltip(Option<Tooltip>),

    /// Set the radius exponent; `radius_n` becomes `2^r − 1`
    SetRadius(u32),

    /// Set `radius_n` directly, stepping the exponent by at most one
    SetRadiusN(u64),

    /// `radius_n + 1`
    RadiusNInc,

    /// `radius_n − 1`, no-op at zero
    RadiusNDec,

    /// Move the layout center
    SetCenter(Point),

    /// Toggle one drawing layer
    SetLayer(Layer, bool),
}

impl Action {
    /// Whether applying this action may invalidate the generated layout.
    pub fn reshapes_tree(&self) -> bool {
        matches!(
            self,
            Action::SetDepth(_)
                | Action::ChangeDepth(_)
                | Action::IncDepth
                | Action::DecDepth
                | Action::SetCenter(_)
        )
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetDepth(_) => "set_depth",
            Action::ChangeDepth(_) => "change_depth",
            Action::IncDepth => "inc_depth",
            Action::DecDepth => "dec_depth",
            Action::SetSelected(_) => "set_selected",
            Action::ClearSelected => "clear_selected",
            Action::SetTooltip(_) => "set_tooltip",
            Action::SetRadius(_) => "set_radius",
            Action::SetRadiusN(_) => "set_radius_n",
            Action::RadiusNInc => "radius_n_inc",
            Action::RadiusNDec => "radius_n_dec",
            Action::SetCenter(_) => "set_center",
            Action::SetLayer(..) => "set_layer",
        }
    }
}
