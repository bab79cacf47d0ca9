//! SVG rendering of a session through plotters.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::board::HexTile;
use crate::geometry::{Layout, PixelPoint};
use crate::session::Session;
use crate::types::{BuildingKind, HarborKind, HexType, PlayerId};

pub const DEFAULT_CANVAS: (u32, u32) = (800, 600);
const ROBBER_RADIUS: f64 = 18.0;
const VERTEX_RADIUS: f64 = 8.0;
const HARBOR_RADIUS: f64 = 16.0;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to draw board: {0}")]
    Draw(#[from] DrawingAreaErrorKind<std::io::Error>),
}

fn hex_color(hex_type: HexType) -> RGBColor {
    match hex_type {
        HexType::Wood => RGBColor(0x22, 0x8B, 0x22),
        HexType::Brick => RGBColor(0xCD, 0x5C, 0x5C),
        HexType::Sheep => RGBColor(0x90, 0xEE, 0x90),
        HexType::Wheat => RGBColor(0xFF, 0xD7, 0x00),
        HexType::Ore => RGBColor(0x69, 0x69, 0x69),
        HexType::Desert => RGBColor(0xED, 0xC9, 0xAF),
    }
}

fn harbor_color(kind: HarborKind) -> RGBColor {
    match kind {
        HarborKind::Wood => RGBColor(0x22, 0x8B, 0x22),
        HarborKind::Sheep => RGBColor(0x90, 0xEE, 0x90),
        HarborKind::Brick => RGBColor(0xCD, 0x5C, 0x5C),
        HarborKind::Wheat => RGBColor(0xFF, 0xD7, 0x00),
        HarborKind::Ore => RGBColor(0x69, 0x69, 0x69),
        HarborKind::Any => RGBColor(0x41, 0x69, 0xE1),
    }
}

fn player_color(player: PlayerId) -> RGBColor {
    match player {
        1 => RGBColor(0xE5, 0x39, 0x35),
        2 => RGBColor(0x1E, 0x88, 0xE5),
        3 => RGBColor(0xFB, 0x8C, 0x00),
        _ => RGBColor(0xF5, 0xF5, 0xF5),
    }
}

/// House-shaped outline of a building centred on its vertex.
pub fn building_outline(kind: BuildingKind, at: PixelPoint) -> [PixelPoint; 5] {
    let (half, roof, shoulder) = match kind {
        BuildingKind::Settlement => (8.0, 12.0, 4.0),
        BuildingKind::City => (12.0, 16.0, 8.0),
    };
    [
        PixelPoint::new(at.x, at.y - roof),
        PixelPoint::new(at.x - half, at.y - shoulder),
        PixelPoint::new(at.x - half, at.y + half),
        PixelPoint::new(at.x + half, at.y + half),
        PixelPoint::new(at.x + half, at.y - shoulder),
    ]
}

pub fn render_svg(session: &Session, path: impl AsRef<Path>, size: (u32, u32)) -> Result<(), RenderError> {
    let root = SVGBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE)?;
    draw_session(&root, session)?;
    root.present()?;
    Ok(())
}

fn draw_session(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    session: &Session,
) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
    let view = *session.viewport();
    let layout = *session.layout();
    let to_canvas = |p: PixelPoint| -> (i32, i32) {
        (
            (p.x * view.zoom + view.pan_x).round() as i32,
            (p.y * view.zoom + view.pan_y).round() as i32,
        )
    };
    let scaled = |r: f64| (r * view.zoom).round().max(1.0) as i32;
    let centered = |size: u32| {
        ("sans-serif", size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center))
    };

    for hex in session.board().hexes() {
        draw_hex(root, hex, &layout, &to_canvas, &centered)?;
        if hex.robber {
            let center = to_canvas(layout.hex_to_pixel(hex.q, hex.r));
            root.draw(&Circle::new(center, scaled(ROBBER_RADIUS), BLACK.mix(0.8).filled()))?;
            root.draw(&Text::new("R", center, centered(14).color(&WHITE)))?;
        }
    }

    for marker in session.harbor_markers() {
        let color = harbor_color(marker.harbor.kind);
        let anchor = to_canvas(marker.anchor);
        for end in [marker.ends.0, marker.ends.1] {
            root.draw(&PathElement::new(
                vec![to_canvas(end), anchor],
                color.mix(0.7).stroke_width(2),
            ))?;
        }
        root.draw(&Circle::new(anchor, scaled(HARBOR_RADIUS), color.filled()))?;
        root.draw(&Text::new(
            format!("{}:1", marker.harbor.ratio),
            (anchor.0, anchor.1 + scaled(HARBOR_RADIUS) + 6),
            centered(9),
        ))?;
    }

    for segment in session.road_segments() {
        root.draw(&PathElement::new(
            vec![to_canvas(segment.from), to_canvas(segment.to)],
            player_color(segment.road.player).stroke_width(5),
        ))?;
    }

    if view.show_vertices {
        for vertex in session.vertices() {
            let at = to_canvas(vertex.position());
            root.draw(&Circle::new(at, scaled(VERTEX_RADIUS), WHITE.mix(0.85).filled()))?;
            root.draw(&Circle::new(at, scaled(VERTEX_RADIUS), BLACK.stroke_width(1)))?;
            root.draw(&Text::new(vertex.id.to_string(), at, centered(9)))?;
        }
    }

    for vertex in session.vertices() {
        for building in &vertex.buildings {
            let outline: Vec<(i32, i32)> = building_outline(building.kind, vertex.position())
                .into_iter()
                .map(&to_canvas)
                .collect();
            root.draw(&Polygon::new(outline.clone(), player_color(building.player).filled()))?;
            let mut closed = outline;
            closed.push(closed[0]);
            root.draw(&PathElement::new(closed, BLACK.stroke_width(1)))?;
        }
    }

    Ok(())
}

fn draw_hex(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    hex: &HexTile,
    layout: &Layout,
    to_canvas: &impl Fn(PixelPoint) -> (i32, i32),
    centered: &impl Fn(u32) -> TextStyle<'static>,
) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
    let corners: Vec<(i32, i32)> = layout
        .hex_corners(hex.q, hex.r)
        .into_iter()
        .map(to_canvas)
        .collect();
    root.draw(&Polygon::new(corners.clone(), hex_color(hex.hex_type).filled()))?;
    let mut outline = corners;
    outline.push(outline[0]);
    root.draw(&PathElement::new(outline, BLACK.stroke_width(2)))?;

    if let Some(number) = hex.number {
        let style = if number == 6 || number == 8 {
            centered(18).color(&RED)
        } else {
            centered(18)
        };
        root.draw(&Text::new(
            number.to_string(),
            to_canvas(layout.hex_to_pixel(hex.q, hex.r)),
            style,
        ))?;
    }
    Ok(())
}
