//! SVG writer for frames

use std::io::Write;

use anyhow::{anyhow, Result};

use super::{annular_sector, arc_path, Frame, HexaryKind};
use crate::heat::fill_by_id;
use crate::state::Layer;

const HEAT_OPACITY: f64 = 0.65;
const BAND_PAD: f64 = 8.0;

/// Entries in the distance legend.
pub const LEGEND_SWATCHES: usize = 8;
const SWATCH_SIZE: f64 = 20.0;

/// Document-level options.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Background fill, none when `None`.
    pub background: Option<String>,
}

impl SvgOptions {
    /// Canvas of `width × height` on a black background.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: Some("black".to_string()),
        }
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Write `frame` as a standalone SVG document.
///
/// Drawing order: heat slices and legend, radius band, labels, links,
/// hexary overlay, nodes. Hidden layers are skipped.
pub fn write_svg<W: Write>(writer: &mut W, frame: &Frame, options: &SvgOptions) -> Result<()> {
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = options.width,
        h = options.height
    )?;
    if let Some(background) = &options.background {
        writeln!(writer, r#"<rect width="100%" height="100%" fill="{background}"/>"#)?;
    }

    let rings = frame.heat.rings();
    let center = frame.center;

    if frame.layers.is_visible(Layer::Heat) {
        writeln!(writer, r#"<g class="heat">"#)?;
        for cell in frame.heat.cells() {
            let fill = match cell.fill {
                Some(color) if frame.depth > 2 => color.to_string(),
                _ => "none".to_string(),
            };
            let slice = annular_sector(center, rings.heat_inner, rings.heat_outer, cell.span.start, cell.span.end);
            writeln!(
                writer,
                r#"<path data-id="{id}" d="{d}" fill="{fill}" opacity="{HEAT_OPACITY}"/>"#,
                id = cell.id,
                d = slice.to_svg()
            )?;
            let ring = annular_sector(center, rings.node_inner, rings.node_outer, cell.span.start, cell.span.end);
            writeln!(
                writer,
                r#"<path data-id="{id}" d="{d}" fill="{fill}"/>"#,
                id = cell.id,
                d = ring.to_svg(),
                fill = fill_by_id(&cell.id)
            )?;
        }
        writeln!(writer, "</g>")?;

        if frame.heat.cells().iter().any(|c| c.fill.is_some()) {
            write_legend(writer, frame)?;
        }
    }

    if frame.radius_n > 0 {
        writeln!(writer, r#"<g class="radius">"#)?;
        for cell in frame.heat.cells().iter().filter(|c| c.in_radius) {
            let band = annular_sector(
                center,
                rings.node_outer,
                rings.heat_outer + BAND_PAD,
                cell.span.start,
                cell.span.end,
            );
            writeln!(
                writer,
                r#"<path data-id="{id}" d="{d}" fill="yellow"/>"#,
                id = cell.id,
                d = band.to_svg()
            )?;
        }
        writeln!(writer, "</g>")?;
    }

    if !frame.labels.is_empty() {
        writeln!(writer, r#"<g class="labels">"#)?;
        for (index, label) in frame.labels.iter().enumerate() {
            let guide = arc_path(center, label.radius, label.start_angle, label.end_angle);
            writeln!(
                writer,
                r#"<path id="label-{index}" d="{d}" fill="none"/>"#,
                d = guide.to_svg()
            )?;
            writeln!(
                writer,
                r##"<text fill="{fill}" font-size="{size:.2}rem"><textPath href="#label-{index}">{text}</textPath></text>"##,
                fill = if label.is_origin { "yellow" } else { "purple" },
                size = label.font_size,
                text = label.text
            )?;
        }
        writeln!(writer, "</g>")?;
    }

    if frame.layers.is_visible(Layer::BinaryLinks) {
        writeln!(writer, r#"<g class="links">"#)?;
        for link in &frame.links {
            writeln!(
                writer,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-opacity="{}"/>"#,
                link.source.x,
                link.source.y,
                link.target.x,
                link.target.y,
                link.style.stroke,
                link.style.width,
                link.style.opacity
            )?;
        }
        writeln!(writer, "</g>")?;
    }

    if frame.layers.is_visible(Layer::HexaryLinks) {
        writeln!(writer, r#"<g class="hexary">"#)?;
        for link in &frame.hexary_links {
            let (width, opacity) = match link.kind {
                HexaryKind::Spoke => (12.0, 0.5),
                HexaryKind::Hop => (1.0, 1.0),
            };
            writeln!(
                writer,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="white" stroke-width="{width}" stroke-opacity="{opacity}"/>"#,
                link.source.x, link.source.y, link.target.x, link.target.y
            )?;
        }
        writeln!(writer, "</g>")?;
    }

    if frame.layers.is_visible(Layer::BinaryNodes) {
        writeln!(writer, r#"<g class="nodes">"#)?;
        for node in &frame.nodes {
            let style = &node.style;
            writeln!(
                writer,
                r#"<circle data-id="{}" cx="{:.2}" cy="{:.2}" r="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
                node.id,
                node.position.x,
                node.position.y,
                style.radius,
                style.fill,
                style.fill_opacity,
                style.stroke,
                style.stroke_width
            )?;
        }
        writeln!(writer, "</g>")?;
    }

    writeln!(writer, "</svg>")?;
    writer.flush()?;
    Ok(())
}

fn write_legend<W: Write>(writer: &mut W, frame: &Frame) -> Result<()> {
    writeln!(writer, r#"<g class="legend">"#)?;
    for (row, swatch) in frame.heat.swatches(LEGEND_SWATCHES).iter().enumerate() {
        let y = SWATCH_SIZE * (1.0 + 1.2 * row as f64);
        writeln!(
            writer,
            r#"<rect x="{SWATCH_SIZE}" y="{y:.2}" width="{SWATCH_SIZE}" height="{SWATCH_SIZE}" fill="{}"/>"#,
            swatch.color
        )?;
        writeln!(
            writer,
            r#"<text x="{:.2}" y="{:.2}" fill="white">{}</text>"#,
            SWATCH_SIZE * 2.5,
            y + SWATCH_SIZE * 0.75,
            swatch.distance
        )?;
    }
    writeln!(writer, "</g>")?;
    Ok(())
}

/// Render `frame` into an SVG string.
pub fn render_svg(frame: &Frame, options: &SvgOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_svg(&mut buffer, frame, options)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered SVG is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, VisualizerState};
    use crate::tree::{generate_tree, Hierarchy};
    use kurbo::Point;

    fn render(state: &VisualizerState) -> String {
        let tree = generate_tree(state.depth, state.center);
        let hierarchy = Hierarchy::new(&tree);
        let frame = Frame::build(&hierarchy, state);
        render_svg(&frame, &SvgOptions::default()).unwrap()
    }

    #[test]
    fn test_default_layers() {
        let state = VisualizerState::new(3, 16, Point::new(400.0, 300.0));
        let svg = render(&state);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 7);
        assert_eq!(svg.matches("<line").count(), 6);
        assert!(!svg.contains(r#"class="heat""#));
    }

    #[test]
    fn test_heat_and_band() {
        let mut state = VisualizerState::new(4, 16, Point::new(400.0, 300.0));
        state.apply(Action::SetLayer(Layer::Heat, true));
        state.apply(Action::SetSelected("0b000".parse().unwrap()));
        state.apply(Action::SetRadiusN(1));
        let svg = render(&state);

        assert!(svg.contains(r#"class="heat""#));
        assert!(svg.contains(r#"class="legend""#));
        assert_eq!(svg.matches(r#"fill="yellow"/>"#).count(), 2);
        assert_eq!(svg.matches("<textPath").count(), 8);
    }

    #[test]
    fn test_hidden_nodes() {
        let mut state = VisualizerState::new(3, 16, Point::new(400.0, 300.0));
        state.apply(Action::SetLayer(Layer::BinaryNodes, false));
        assert_eq!(render(&state).matches("<circle").count(), 0);
    }
}
