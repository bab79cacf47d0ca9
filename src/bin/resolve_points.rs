use std::path::PathBuf;

use catanviz::board::{Board, HexTile};
use catanviz::mapping::{BoardMapping, PointMapper};
use catanviz::resolver::{ResolveInputs, resolve_vertices};
use catanviz::Layout;
use clap::Parser;
use log::{error, info};

#[derive(Debug, Parser)]
#[command(name = "catanviz-resolve")]
#[command(about = "Print the board's vertex layout as JSON")]
struct Args {
    /// Canonical point mapping (JSON) to adopt instead of deriving geometry
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Hex tiles (JSON array) to derive vertices from
    #[arg(long)]
    hexes: Option<PathBuf>,

    /// Use a blank board of this many rings instead of the built-in one
    #[arg(long, conflicts_with = "hexes")]
    rings: Option<i32>,

    /// Start from no hexes at all
    #[arg(long, conflicts_with_all = ["hexes", "rings"])]
    empty: bool,

    #[arg(long, default_value_t = 45.0)]
    radius: f64,

    #[arg(long, default_value_t = 400.0)]
    center_x: f64,

    #[arg(long, default_value_t = 300.0)]
    center_y: f64,

    #[arg(long, default_value_t = 10.0)]
    row_tolerance: f64,

    /// Print the point-id to grid-coordinate table and exit
    #[arg(long)]
    export_grid: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    if args.export_grid {
        println!("{}", PointMapper::default().to_json()?);
        return Ok(());
    }

    let layout = Layout {
        radius: args.radius,
        center_x: args.center_x,
        center_y: args.center_y,
        row_tolerance: args.row_tolerance,
    };

    let board = if args.empty {
        Board::default()
    } else if let Some(path) = &args.hexes {
        let hexes: Vec<HexTile> = serde_json::from_reader(std::fs::File::open(path)?)?;
        Board::new(hexes)
    } else if let Some(rings) = args.rings {
        Board::rings(rings)
    } else {
        Board::standard()
    };

    // An unreadable mapping only costs us the preferred source.
    let mapping = args.mapping.as_ref().and_then(|path| match BoardMapping::from_path(path) {
        Ok(mapping) => Some(mapping),
        Err(err) => {
            error!("{}: {err}", path.display());
            None
        }
    });

    let inputs = ResolveInputs {
        mapping: mapping.as_ref(),
        game_hexes: &[],
        default_hexes: board.hexes(),
    };
    let resolution = resolve_vertices(&inputs, &layout);
    info!(
        "{} vertices from {}",
        resolution.vertices.len(),
        resolution.source
    );

    println!("{}", serde_json::to_string_pretty(&resolution.vertices)?);
    Ok(())
}
