use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xor_tree::{
    write_svg, xor_distance, Action, Layer, NodeId, SvgOptions, Visualizer, VisualizerConfig,
    XorDistance,
};

#[derive(Parser, Debug)]
#[command(name = "xor-tree", about = "Radial binary trees and the Kademlia XOR metric")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct View {
    /// Tree depth (levels, root included).
    #[arg(long, default_value_t = 4)]
    depth: usize,
    /// Viewport width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    /// Viewport height.
    #[arg(long, default_value_t = 600.0)]
    height: f64,
    /// Largest depth accepted.
    #[arg(long, default_value_t = 16)]
    max_depth: usize,
}

#[derive(Args, Debug, Clone)]
struct Selection {
    /// Selected leaf (`0b…`). Defaults to the leftmost leaf.
    #[arg(long)]
    selected: Option<String>,
    /// Highlight every leaf within this XOR distance.
    #[arg(long, default_value_t = 0)]
    radius_n: u64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every node of the generated layout.
    Tree {
        #[command(flatten)]
        view: View,
    },
    /// XOR distance between two `0b…` ids.
    Distance {
        /// First id.
        a: String,
        /// Second id.
        b: String,
    },
    /// Print per-leaf distances, slices and colours.
    Heat {
        #[command(flatten)]
        view: View,
        #[command(flatten)]
        selection: Selection,
    },
    /// Render an SVG frame.
    Svg {
        #[command(flatten)]
        view: View,
        #[command(flatten)]
        selection: Selection,
        /// Output file (stdout when omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Draw the heat ring.
        #[arg(long)]
        heat: bool,
        /// Draw hexary links.
        #[arg(long)]
        hexary_links: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tree { view } => run_tree(&view)?,
        Commands::Distance { a, b } => run_distance(&a, &b)?,
        Commands::Heat { view, selection } => run_heat(&view, &selection)?,
        Commands::Svg {
            view,
            selection,
            output,
            heat,
            hexary_links,
        } => run_svg(&view, &selection, output, heat, hexary_links)?,
    }

    Ok(())
}

fn build(view: &View, selection: Option<&Selection>) -> Result<Visualizer> {
    let mut config = VisualizerConfig::for_viewport(view.width, view.height);
    config.max_depth = view.max_depth;
    let mut vis = Visualizer::new(config).context("invalid viewport or depth limit")?;
    vis.set_depth(view.depth)
        .with_context(|| format!("cannot show depth {}", view.depth))?;

    if let Some(selection) = selection {
        if let Some(id) = &selection.selected {
            vis.select(id)
                .with_context(|| format!("cannot select {id}"))?;
        }
        vis.dispatch(Action::SetRadiusN(selection.radius_n));
    }
    Ok(vis)
}

fn run_tree(view: &View) -> Result<()> {
    let vis = build(view, None)?;
    let hierarchy = vis.hierarchy();
    let mut out = BufWriter::new(io::stdout().lock());
    for node in hierarchy.descendants() {
        let data = node.data();
        writeln!(
            out,
            "{}\t{}\tdepth={}\tx={:.2}\ty={:.2}\tangle={:.2}",
            data.id,
            data.id.to_hex(),
            node.depth(),
            data.x(),
            data.y(),
            data.angle
        )?;
    }
    out.flush()?;
    Ok(())
}

fn run_distance(a: &str, b: &str) -> Result<()> {
    let hex = xor_distance(a, b);
    let parsed = a.parse::<NodeId>().ok().zip(b.parse::<NodeId>().ok());
    match parsed.and_then(|(a, b)| XorDistance::between(&a, &b)) {
        Some(distance) => match distance.bucket() {
            Some(bucket) => println!("{hex}\t{}\tbucket={bucket}", distance.value()),
            None => println!("{hex}\t0\tidentical"),
        },
        None => println!("{hex}\tincomparable"),
    }
    Ok(())
}

fn run_heat(view: &View, selection: &Selection) -> Result<()> {
    let vis = build(view, Some(selection))?;
    let heat = vis.heat_map();
    let mut out = BufWriter::new(io::stdout().lock());
    for cell in heat.cells() {
        let distance = cell
            .distance
            .as_ref()
            .map(|d| format!("{d}\t{}", d.value()))
            .unwrap_or_else(|| "-\t-".to_string());
        let fill = cell.fill.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string());
        writeln!(
            out,
            "{}\t{}\tspan=[{:.2}°, {:.2}°]\t{}{}",
            cell.id,
            distance,
            cell.span.start.to_degrees(),
            cell.span.end.to_degrees(),
            fill,
            if cell.in_radius { "\tin-radius" } else { "" }
        )?;
    }
    out.flush()?;
    Ok(())
}

fn run_svg(
    view: &View,
    selection: &Selection,
    output: Option<PathBuf>,
    heat: bool,
    hexary_links: bool,
) -> Result<()> {
    let mut vis = build(view, Some(selection))?;
    vis.dispatch(Action::SetLayer(Layer::Heat, heat));
    vis.dispatch(Action::SetLayer(Layer::HexaryLinks, hexary_links));

    let frame = vis.frame();
    let options = SvgOptions::new(view.width, view.height);
    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_svg(&mut writer, &frame, &options)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            write_svg(&mut writer, &frame, &options).context("failed to write SVG")?;
        }
    }
    Ok(())
}
