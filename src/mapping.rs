//! Canonical point mappings supplied by the game server.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{HexSite, HexTile, Vertex};
use crate::board::vertices::FALLBACK_ROWS;
use crate::types::{HexId, PointId};

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("failed to read board mapping: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed board mapping: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board mapping carries no points")]
    NoPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedPoint {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub game_coords: Option<(u8, u8)>,
    #[serde(default)]
    pub adjacent_points: Vec<PointId>,
    #[serde(default)]
    pub adjacent_hexes: Vec<HexId>,
}

/// Hex position as listed in a mapping document. Terrain and tokens are not
/// part of the mapping; they arrive with game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedHex {
    pub id: HexId,
    pub q: i32,
    pub r: i32,
    #[serde(default)]
    pub game_coords: Option<(u8, u8)>,
}

impl HexSite for MappedHex {
    fn hex_id(&self) -> HexId {
        self.id
    }

    fn axial(&self) -> (i32, i32) {
        (self.q, self.r)
    }
}

impl From<&HexTile> for MappedHex {
    fn from(hex: &HexTile) -> Self {
        Self {
            id: hex.id,
            q: hex.q,
            r: hex.r,
            game_coords: None,
        }
    }
}

/// The server's board mapping document. Counters such as `total_points`
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardMapping {
    #[serde(default)]
    pub points: Vec<MappedPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hexes: Option<Vec<MappedHex>>,
}

impl BoardMapping {
    pub fn from_json_str(text: &str) -> Result<Self, MappingError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, MappingError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Hexes shipped alongside the points, if any.
    pub fn hexes(&self) -> &[MappedHex] {
        self.hexes.as_deref().unwrap_or(&[])
    }

    /// Take the server's points as they are: ids, positions and adjacency are
    /// not recomputed or reordered.
    pub fn adopt(&self) -> Result<Vec<Vertex>, MappingError> {
        if self.points.is_empty() {
            return Err(MappingError::NoPoints);
        }
        Ok(self
            .points
            .iter()
            .map(|point| Vertex {
                id: point.id,
                x: point.x,
                y: point.y,
                game_coords: point.game_coords,
                adjacent_hexes: SmallVec::from_slice(&point.adjacent_hexes),
                adjacent_points: point.adjacent_points.clone(),
                buildings: Vec::new(),
            })
            .collect())
    }
}

/// Translates between point ids (1, 2, 3, ...) and the engine's `[row, col]`
/// point grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointMapper {
    point_to_coords: BTreeMap<PointId, (u8, u8)>,
    coords_to_point: HashMap<(u8, u8), PointId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PointMapperExport {
    point_to_coords: BTreeMap<PointId, (u8, u8)>,
    coords_to_point: BTreeMap<String, PointId>,
    total_points: usize,
}

static DEFAULT_POINT_GRID: Lazy<Vec<(u8, u8)>> = Lazy::new(|| {
    FALLBACK_ROWS
        .iter()
        .enumerate()
        .flat_map(|(row, &width)| (0..width).map(move |col| (row as u8, col as u8)))
        .collect()
});

impl Default for PointMapper {
    fn default() -> Self {
        Self::from_pairs(
            DEFAULT_POINT_GRID
                .iter()
                .enumerate()
                .map(|(idx, coords)| (idx as PointId + 1, *coords)),
        )
    }
}

impl PointMapper {
    fn from_pairs(pairs: impl IntoIterator<Item = (PointId, (u8, u8))>) -> Self {
        let point_to_coords: BTreeMap<PointId, (u8, u8)> = pairs.into_iter().collect();
        let coords_to_point = point_to_coords
            .iter()
            .map(|(point, coords)| (*coords, *point))
            .collect();
        Self {
            point_to_coords,
            coords_to_point,
        }
    }

    pub fn coords_of(&self, point: PointId) -> Option<(u8, u8)> {
        self.point_to_coords.get(&point).copied()
    }

    pub fn point_at(&self, row: u8, col: u8) -> Option<PointId> {
        self.coords_to_point.get(&(row, col)).copied()
    }

    pub fn all_points(&self) -> Vec<PointId> {
        self.point_to_coords.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.point_to_coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_to_coords.is_empty()
    }

    /// Grid neighbours of `point` (the eight surrounding grid cells). This is
    /// a coarse approximation of the real board topology.
    pub fn adjacent_points(&self, point: PointId) -> Vec<PointId> {
        let Some((row, col)) = self.coords_of(point) else {
            return Vec::new();
        };
        let (row, col) = (row as i16, col as i16);
        let mut adjacent = Vec::new();
        for dr in -1..=1i16 {
            for dc in -1..=1i16 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (r, c) = (row + dr, col + dc);
                if r < 0 || c < 0 {
                    continue;
                }
                if let Some(other) = self.point_at(r as u8, c as u8) {
                    adjacent.push(other);
                }
            }
        }
        adjacent
    }

    pub fn is_road_candidate(&self, start: PointId, end: PointId) -> bool {
        start != end && self.adjacent_points(start).contains(&end)
    }

    pub fn to_json(&self) -> Result<String, MappingError> {
        let export = PointMapperExport {
            point_to_coords: self.point_to_coords.clone(),
            coords_to_point: self
                .point_to_coords
                .iter()
                .map(|(point, (row, col))| (format!("{row},{col}"), *point))
                .collect(),
            total_points: self.point_to_coords.len(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    pub fn from_json(text: &str) -> Result<Self, MappingError> {
        let export: PointMapperExport = serde_json::from_str(text)?;
        Ok(Self::from_pairs(export.point_to_coords))
    }
}
