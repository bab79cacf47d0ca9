use std::collections::HashMap;

use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::{Layout, PixelPoint};
use crate::types::{BuildingId, BuildingKind, HexId, PlayerId, PointId};

/// Row widths of the fixed-grid layout, top to bottom.
pub const FALLBACK_ROWS: [usize; 6] = [7, 9, 11, 11, 9, 7];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub kind: BuildingKind,
    pub player: PlayerId,
}

/// A board corner where buildings sit and roads end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    /// `[row, col]` in the game engine's point grid, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_coords: Option<(u8, u8)>,
    #[serde(default)]
    pub adjacent_hexes: SmallVec<[HexId; 3]>,
    #[serde(default)]
    pub adjacent_points: Vec<PointId>,
    #[serde(default)]
    pub buildings: Vec<Building>,
}

impl Vertex {
    pub fn position(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }
}

/// Anything placed on the axial grid that vertices can be derived from.
pub trait HexSite {
    fn hex_id(&self) -> HexId;
    fn axial(&self) -> (i32, i32);
}

struct Corner {
    point: PixelPoint,
    hexes: SmallVec<[HexId; 3]>,
}

/// Derive the vertex set of `hexes` from their corner geometry.
///
/// Corners are merged on their whole-pixel position, ordered row by row
/// (rows banded by `layout.row_tolerance`) and left to right, then numbered
/// from 1.
///
/// Ids are [`PointId`]s, so at most `PointId::MAX` vertices are numbered;
/// corners past that point in row order are dropped with a warning.
pub fn derive_vertices<H: HexSite>(hexes: &[H], layout: &Layout) -> Vec<Vertex> {
    let mut corners: Vec<Corner> = Vec::new();
    let mut by_key: HashMap<(i64, i64), usize> = HashMap::new();

    for hex in hexes {
        let hex_id = hex.hex_id();
        let (q, r) = hex.axial();
        for point in layout.hex_corners(q, r) {
            match by_key.get(&point.rounded_key()) {
                Some(&idx) => {
                    let hex_ids = &mut corners[idx].hexes;
                    if !hex_ids.contains(&hex_id) {
                        hex_ids.push(hex_id);
                    }
                }
                None => {
                    by_key.insert(point.rounded_key(), corners.len());
                    let mut hex_ids = SmallVec::new();
                    hex_ids.push(hex_id);
                    corners.push(Corner { point, hexes: hex_ids });
                }
            }
        }
    }

    let total = corners.len();
    let ordered = order_rows(corners, layout.row_tolerance);
    let numbered: Vec<Vertex> = (1..=PointId::MAX)
        .zip(ordered)
        .map(|(id, corner)| Vertex {
            id,
            x: corner.point.x,
            y: corner.point.y,
            game_coords: None,
            adjacent_hexes: corner.hexes,
            adjacent_points: Vec::new(),
            buildings: Vec::new(),
        })
        .collect();
    if numbered.len() < total {
        warn!(
            "{total} corners exceed the point id range; keeping the first {}",
            numbered.len()
        );
    }
    numbered
}

/// Row-major order. A row starts at its topmost corner and takes every
/// following corner within `tolerance` pixels of it.
fn order_rows(mut corners: Vec<Corner>, tolerance: f64) -> Vec<Corner> {
    corners.sort_by(|a, b| a.point.y.total_cmp(&b.point.y));

    let mut row = 0usize;
    let mut row_top = f64::NEG_INFINITY;
    let banded: Vec<(usize, Corner)> = corners
        .into_iter()
        .map(|corner| {
            if corner.point.y - row_top > tolerance {
                if row_top.is_finite() {
                    row += 1;
                }
                row_top = corner.point.y;
            }
            (row, corner)
        })
        .collect();

    banded
        .into_iter()
        .sorted_by(|(row_a, a), (row_b, b)| {
            row_a.cmp(row_b).then(a.point.x.total_cmp(&b.point.x))
        })
        .map(|(_, corner)| corner)
        .collect()
}

/// Evenly spaced stand-in grid used when there is nothing to derive from.
/// Not aligned with any hex outline.
pub fn fallback_vertices(layout: &Layout) -> Vec<Vertex> {
    let spacing = layout.radius * 0.75;
    let row_height = layout.radius * 0.866;
    let mut vertices = Vec::with_capacity(FALLBACK_ROWS.iter().sum());
    let mut next_id: PointId = 1;

    for (row, &width) in FALLBACK_ROWS.iter().enumerate() {
        let offset_x = -((width - 1) as f64) * spacing * 0.5;
        for col in 0..width {
            vertices.push(Vertex {
                id: next_id,
                x: layout.center_x + offset_x + col as f64 * spacing,
                y: layout.center_y + (row as f64 - 2.5) * row_height,
                game_coords: Some((row as u8, col as u8)),
                adjacent_hexes: SmallVec::new(),
                adjacent_points: Vec::new(),
                buildings: Vec::new(),
            });
            next_id += 1;
        }
    }
    vertices
}

pub fn vertex_by_id(vertices: &[Vertex], id: PointId) -> Option<&Vertex> {
    vertices.iter().find(|vertex| vertex.id == id)
}

/// First vertex strictly closer than `tolerance` pixels to `(x, y)`.
pub fn vertex_near(vertices: &[Vertex], x: f64, y: f64, tolerance: f64) -> Option<&Vertex> {
    let target = PixelPoint::new(x, y);
    vertices
        .iter()
        .find(|vertex| vertex.position().distance(target) < tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::HexTile;
    use crate::types::HexType;

    fn hex(id: HexId, q: i32, r: i32) -> HexTile {
        HexTile::new(id, q, r, HexType::Wood, Some(8))
    }

    #[test]
    fn empty_input_yields_no_vertices() {
        assert!(derive_vertices::<HexTile>(&[], &Layout::default()).is_empty());
    }

    #[test]
    fn single_hex_has_six_corners_at_radius() {
        let layout = Layout::default();
        let vertices = derive_vertices(&[hex(1, 0, 0)], &layout);
        assert_eq!(vertices.len(), 6);

        let mut angles: Vec<i64> = vertices
            .iter()
            .map(|v| {
                assert!((v.position().distance(layout.center()) - 45.0).abs() < 1e-9);
                let deg = (v.y - 300.0).atan2(v.x - 400.0).to_degrees();
                (deg.rem_euclid(360.0)).round() as i64 % 360
            })
            .collect();
        angles.sort();
        assert_eq!(angles, vec![0, 60, 120, 180, 240, 300]);
        assert!(vertices.iter().all(|v| v.adjacent_hexes.as_slice() == [1]));
    }

    #[test]
    fn single_hex_numbering_is_row_major() {
        let vertices = derive_vertices(&[hex(1, 0, 0)], &Layout::default());
        // top pair, middle pair (west, east), bottom pair
        assert!(vertices[0].x < vertices[1].x);
        assert!(vertices[0].y < vertices[2].y);
        assert!((vertices[2].x - 355.0).abs() < 1e-9);
        assert!((vertices[3].x - 445.0).abs() < 1e-9);
        assert_eq!(vertices.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn neighbours_share_two_corners() {
        let vertices = derive_vertices(&[hex(1, 0, 0), hex(2, 1, 0)], &Layout::default());
        assert_eq!(vertices.len(), 10);
        let shared: Vec<_> = vertices.iter().filter(|v| v.adjacent_hexes.len() == 2).collect();
        assert_eq!(shared.len(), 2);
        for vertex in shared {
            assert_eq!(vertex.adjacent_hexes.as_slice(), &[1, 2]);
        }
    }

    #[test]
    fn repeated_hex_is_not_recorded_twice() {
        let vertices = derive_vertices(&[hex(7, 0, 0), hex(7, 0, 0)], &Layout::default());
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.adjacent_hexes.as_slice() == [7]));
    }

    #[test]
    fn input_order_does_not_change_geometry() {
        let layout = Layout::default();
        let forward = derive_vertices(&[hex(1, 0, 0), hex(2, 1, 0), hex(3, 0, 1)], &layout);
        let backward = derive_vertices(&[hex(3, 0, 1), hex(2, 1, 0), hex(1, 0, 0)], &layout);
        let keys = |vs: &[Vertex]| vs.iter().map(|v| v.position().rounded_key()).collect::<Vec<_>>();
        assert_eq!(keys(&forward), keys(&backward));
    }

    #[test]
    fn numbering_stops_at_the_id_range() {
        // 182 x 182 parallelogram: 2 * 183 * 183 - 2 corners, more than u16 ids
        let hexes: Vec<HexTile> = (0..182)
            .flat_map(|q| (0..182).map(move |r| (q, r)))
            .enumerate()
            .map(|(idx, (q, r))| hex(idx as HexId + 1, q, r))
            .collect();
        let vertices = derive_vertices(&hexes, &Layout::default());
        assert_eq!(vertices.len(), usize::from(PointId::MAX));
        assert!(vertices.iter().map(|v| v.id).eq(1..=PointId::MAX));
    }

    #[test]
    fn fallback_grid_has_fifty_four_points() {
        let vertices = fallback_vertices(&Layout::default());
        assert_eq!(vertices.len(), 54);
        assert_eq!(vertices.first().map(|v| v.game_coords), Some(Some((0, 0))));
        assert_eq!(vertices.last().map(|v| (v.id, v.game_coords)), Some((54, Some((5, 6)))));
        assert!(vertices.iter().all(|v| v.adjacent_hexes.is_empty()));
        // rows are centred on the board
        let top: Vec<_> = vertices.iter().filter(|v| v.game_coords.map(|c| c.0) == Some(0)).collect();
        assert!((top[3].x - 400.0).abs() < 1e-9);
    }

    #[test]
    fn lookup_by_id_and_position() {
        let vertices = derive_vertices(&[hex(1, 0, 0)], &Layout::default());
        let east = vertex_near(&vertices, 440.0, 302.0, 20.0).unwrap();
        assert_eq!(east.id, 4);
        assert_eq!(vertex_by_id(&vertices, 4), Some(east));
        assert!(vertex_near(&vertices, 400.0, 300.0, 20.0).is_none());
        assert!(vertex_by_id(&vertices, 7).is_none());
    }
}
