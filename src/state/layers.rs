//! Drawing layer visibility

use std::fmt;

/// Independently toggled parts of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Layer {
    /// Node circles
    BinaryNodes,
    /// Parent → child links
    BinaryLinks,
    /// White outline on nibble-aligned nodes
    HexaryNodes,
    /// Center → nibble links and 4-level hops
    HexaryLinks,
    /// Distance ring
    Heat,
}

impl Layer {
    /// Every layer, in drawing order.
    pub const ALL: [Layer; 5] = [
        Layer::Heat,
        Layer::BinaryLinks,
        Layer::HexaryLinks,
        Layer::BinaryNodes,
        Layer::HexaryNodes,
    ];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::BinaryNodes => "binary-nodes",
            Layer::BinaryLinks => "binary-links",
            Layer::HexaryNodes => "hexary-nodes",
            Layer::HexaryLinks => "hexary-links",
            Layer::Heat => "heat",
        };
        f.write_str(name)
    }
}

/// Visibility flag per [`Layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct LayerVisibility {
    binary_nodes: bool,
    binary_links: bool,
    hexary_nodes: bool,
    hexary_links: bool,
    heat: bool,
}

impl Default for LayerVisibility {
    /// Binary tree and hexary node outlines on; hexary links and heat off.
    fn default() -> Self {
        Self {
            binary_nodes: true,
            binary_links: true,
            hexary_nodes: true,
            hexary_links: false,
            heat: false,
        }
    }
}

impl LayerVisibility {
    /// Everything visible.
    pub fn all() -> Self {
        Self {
            binary_nodes: true,
            binary_links: true,
            hexary_nodes: true,
            hexary_links: true,
            heat: true,
        }
    }

    fn slot(&mut self, layer: Layer) -> &mut bool {
        match layer {
            Layer::BinaryNodes => &mut self.binary_nodes,
            Layer::BinaryLinks => &mut self.binary_links,
            Layer::HexaryNodes => &mut self.hexary_nodes,
            Layer::HexaryLinks => &mut self.hexary_links,
            Layer::Heat => &mut self.heat,
        }
    }

    /// Whether `layer` is drawn.
    pub fn is_visible(&self, layer: Layer) -> bool {
        match layer {
            Layer::BinaryNodes => self.binary_nodes,
            Layer::BinaryLinks => self.binary_links,
            Layer::HexaryNodes => self.hexary_nodes,
            Layer::HexaryLinks => self.hexary_links,
            Layer::Heat => self.heat,
        }
    }

    /// Show or hide `layer`.
    pub fn set(&mut self, layer: Layer, visible: bool) {
        *self.slot(layer) = visible;
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, layer: Layer, visible: bool) -> Self {
        self.set(layer, visible);
        self
    }
}
