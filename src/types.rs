use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub type HexId = u16;
pub type PointId = u16;
pub type PlayerId = u8;

/// Building identifier as the server sends it: a plain counter on older
/// pushes, `"b_<point>"` on current ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildingId {
    Num(u32),
    Text(String),
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildingId::Num(id) => write!(f, "{id}"),
            BuildingId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u32> for BuildingId {
    fn from(id: u32) -> Self {
        BuildingId::Num(id)
    }
}

/// Terrain of a land hex. The server reports terrain names (`FOREST`,
/// `hills`, ...) while the viewer speaks in resources, so both spellings are
/// accepted on input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HexType {
    #[serde(alias = "forest", alias = "FOREST", alias = "WOOD")]
    #[strum(to_string = "wood", serialize = "forest")]
    Wood,
    #[serde(alias = "hills", alias = "HILLS", alias = "BRICK")]
    #[strum(to_string = "brick", serialize = "hills")]
    Brick,
    #[serde(alias = "pasture", alias = "PASTURE", alias = "SHEEP")]
    #[strum(to_string = "sheep", serialize = "pasture")]
    Sheep,
    #[serde(alias = "fields", alias = "FIELDS", alias = "WHEAT")]
    #[strum(to_string = "wheat", serialize = "fields")]
    Wheat,
    #[serde(alias = "mountains", alias = "MOUNTAINS", alias = "ORE")]
    #[strum(to_string = "ore", serialize = "mountains")]
    Ore,
    #[serde(alias = "DESERT")]
    Desert,
}

impl HexType {
    pub const ALL: [HexType; 6] = [
        HexType::Wood,
        HexType::Brick,
        HexType::Sheep,
        HexType::Wheat,
        HexType::Ore,
        HexType::Desert,
    ];

    pub fn produces(self) -> bool {
        self != HexType::Desert
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HarborKind {
    Wood,
    Brick,
    Sheep,
    Wheat,
    Ore,
    #[default]
    Any,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BuildingKind {
    Settlement,
    City,
}
