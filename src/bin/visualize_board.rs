use std::path::PathBuf;

use catanviz::render::{DEFAULT_CANVAS, render_svg};
use catanviz::view::{MAX_ZOOM, MIN_ZOOM};
use catanviz::{GameSnapshot, Layout, Session};
use clap::Parser;
use log::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "catanviz-render")]
#[command(about = "Render the board, its vertices and the current game state to SVG")]
struct Args {
    /// Canonical point mapping (JSON)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Game-state snapshot (JSON) to draw buildings, roads and harbors from
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Layout constants (JSON object with radius/center_x/center_y/row_tolerance)
    #[arg(long)]
    layout: Option<PathBuf>,

    #[arg(long, default_value = "catan_board.svg")]
    out: PathBuf,

    #[arg(long, default_value_t = DEFAULT_CANVAS.0)]
    width: u32,

    #[arg(long, default_value_t = DEFAULT_CANVAS.1)]
    height: u32,

    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Leave the vertex markers out
    #[arg(long)]
    hide_vertices: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    let layout = match &args.layout {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Layout::default(),
    };
    let mut session = Session::new(layout);

    if let Some(path) = &args.snapshot {
        let snapshot = GameSnapshot::from_json_str(&std::fs::read_to_string(path)?)?;
        session.apply_snapshot(snapshot);
    }

    if let Some(path) = &args.mapping {
        match std::fs::read_to_string(path) {
            Ok(text) => session.load_mapping_json(&text),
            Err(err) => warn!("{}: {err}", path.display()),
        }
    }

    let viewport = session.viewport_mut();
    viewport.zoom = args.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    if args.hide_vertices {
        viewport.toggle_vertices();
    }

    render_svg(&session, &args.out, (args.width, args.height))?;
    info!(
        "wrote {} ({} vertices from {})",
        args.out.display(),
        session.vertices().len(),
        session.source()
    );
    Ok(())
}
