use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::coords::{AxialCoord, generate_coordinate_system};
use crate::types::{HexId, HexType};

pub mod vertices;

pub use vertices::{Building, HexSite, Vertex, derive_vertices, fallback_vertices, vertex_by_id, vertex_near};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexTile {
    pub id: HexId,
    pub q: i32,
    pub r: i32,
    #[serde(rename = "type")]
    pub hex_type: HexType,
    /// Production token; `None` only on the desert.
    #[serde(default)]
    pub number: Option<u8>,
    #[serde(default, alias = "has_robber")]
    pub robber: bool,
}

impl HexTile {
    pub fn new(id: HexId, q: i32, r: i32, hex_type: HexType, number: Option<u8>) -> Self {
        Self {
            id,
            q,
            r,
            hex_type,
            number,
            robber: false,
        }
    }

    pub fn coord(&self) -> AxialCoord {
        AxialCoord::new(self.q, self.r)
    }
}

impl HexSite for HexTile {
    fn hex_id(&self) -> HexId {
        self.id
    }

    fn axial(&self) -> (i32, i32) {
        (self.q, self.r)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no hex with id {0} on the board")]
    UnknownHex(HexId),
}

/// The hex tiles of the active layout. Vertex geometry is kept by the session
/// that owns the board, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    hexes: Vec<HexTile>,
}

impl Board {
    pub fn new(hexes: Vec<HexTile>) -> Self {
        Self { hexes }
    }

    /// The built-in 19-hex board shown when no server data is available.
    pub fn standard() -> Self {
        Self::new(STANDARD_HEXES.clone())
    }

    /// A featureless board of `layers` rings around the origin, every tile a
    /// desert and the robber on the centre tile.
    pub fn rings(layers: i32) -> Self {
        let hexes = generate_coordinate_system(layers)
            .into_iter()
            .enumerate()
            .map(|(idx, coord)| {
                let mut tile = HexTile::new(idx as HexId + 1, coord.q, coord.r, HexType::Desert, None);
                tile.robber = idx == 0;
                tile
            })
            .collect();
        Self::new(hexes)
    }

    pub fn hexes(&self) -> &[HexTile] {
        &self.hexes
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn hex(&self, id: HexId) -> Option<&HexTile> {
        self.hexes.iter().find(|hex| hex.id == id)
    }

    pub fn robber_hex(&self) -> Option<&HexTile> {
        self.hexes.iter().find(|hex| hex.robber)
    }

    pub fn move_robber(&mut self, hex_id: HexId) -> Result<(), BoardError> {
        if self.hex(hex_id).is_none() {
            return Err(BoardError::UnknownHex(hex_id));
        }
        for hex in &mut self.hexes {
            hex.robber = hex.id == hex_id;
        }
        Ok(())
    }

    pub fn replace_hexes(&mut self, hexes: Vec<HexTile>) {
        self.hexes = hexes;
    }
}

static STANDARD_HEXES: Lazy<Vec<HexTile>> = Lazy::new(|| {
    use HexType::*;
    let layout: [(i32, i32, HexType, Option<u8>); 19] = [
        (0, -2, Wood, Some(11)),
        (1, -2, Sheep, Some(12)),
        (2, -2, Wheat, Some(9)),
        (-1, -1, Brick, Some(4)),
        (0, -1, Ore, Some(6)),
        (1, -1, Sheep, Some(5)),
        (2, -1, Wheat, Some(10)),
        (-2, 0, Wood, Some(3)),
        (-1, 0, Brick, Some(11)),
        (0, 0, Desert, None),
        (1, 0, Wheat, Some(4)),
        (2, 0, Ore, Some(8)),
        (-2, 1, Ore, Some(8)),
        (-1, 1, Sheep, Some(10)),
        (0, 1, Wood, Some(9)),
        (1, 1, Brick, Some(3)),
        (-2, 2, Wheat, Some(2)),
        (-1, 2, Sheep, Some(5)),
        (0, 2, Ore, Some(6)),
    ];
    layout
        .into_iter()
        .enumerate()
        .map(|(idx, (q, r, hex_type, number))| {
            let mut tile = HexTile::new(idx as HexId + 1, q, r, hex_type, number);
            tile.robber = hex_type == Desert;
            tile
        })
        .collect()
});
