use serde::{Deserialize, Serialize};

use crate::board::HexTile;
use crate::types::{BuildingId, BuildingKind, HarborKind, HexId, PlayerId, PointId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBuilding {
    pub id: BuildingId,
    pub vertex: PointId,
    pub player: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub id: u32,
    pub from: PointId,
    pub to: PointId,
    pub player: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Harbor {
    pub id: u32,
    #[serde(rename = "type", default)]
    pub kind: HarborKind,
    #[serde(default = "default_harbor_ratio")]
    pub ratio: u8,
    pub point_one: PointId,
    pub point_two: PointId,
}

fn default_harbor_ratio() -> u8 {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: usize,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub victory_points: u8,
    #[serde(default)]
    pub total_cards: u32,
}

/// A game-state push from the server, already in the viewer's shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSnapshot {
    pub hexes: Vec<HexTile>,
    pub settlements: Vec<PlacedBuilding>,
    pub cities: Vec<PlacedBuilding>,
    pub roads: Vec<Road>,
    pub harbors: Vec<Harbor>,
    pub players: Vec<PlayerSummary>,
    pub current_player: usize,
    pub current_phase: Option<String>,
    pub dice_result: Option<(u8, u8)>,
    pub robber_position: Option<HexId>,
}

impl GameSnapshot {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Settlements and cities together, tagged with their kind.
    pub fn buildings(&self) -> impl Iterator<Item = (BuildingKind, &PlacedBuilding)> {
        self.settlements
            .iter()
            .map(|b| (BuildingKind::Settlement, b))
            .chain(self.cities.iter().map(|b| (BuildingKind::City, b)))
    }

    /// The hex holding the robber: the flagged hex if any, else
    /// `robber_position`.
    pub fn robber_hex(&self) -> Option<HexId> {
        self.hexes
            .iter()
            .find(|hex| hex.robber)
            .map(|hex| hex.id)
            .or(self.robber_position)
    }
}
