//! Picks where the vertex layout comes from.
//!
//! Sources are tried in [`Strategy::ORDERED`] order and the first one that
//! produces vertices wins. The last strategy cannot fail, so resolution
//! always yields a layout.

use log::{debug, info, warn};
use serde::Serialize;
use strum::{Display, EnumIter};

use crate::board::{HexSite, HexTile, Vertex, derive_vertices, fallback_vertices};
use crate::geometry::Layout;
use crate::mapping::{BoardMapping, MappingError};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no usable point mapping: {0}")]
    MissingMapping(#[source] MappingError),
    #[error("no point mapping supplied")]
    NoMapping,
    #[error("no hex data to derive vertices from")]
    DegenerateInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Server-provided canonical mapping, adopted verbatim.
    ExternalMapping,
    /// Hexes from the latest game-state snapshot.
    GameStateHexes,
    /// Hexes shipped with the mapping document.
    MappingHexes,
    /// The board configured locally.
    DefaultHexes,
    FixedGrid,
}

impl Strategy {
    pub const ORDERED: [Strategy; 5] = [
        Strategy::ExternalMapping,
        Strategy::GameStateHexes,
        Strategy::MappingHexes,
        Strategy::DefaultHexes,
        Strategy::FixedGrid,
    ];

    pub fn attempt(self, inputs: &ResolveInputs<'_>, layout: &Layout) -> Result<Vec<Vertex>, ResolveError> {
        match self {
            Strategy::ExternalMapping => inputs
                .mapping
                .ok_or(ResolveError::NoMapping)?
                .adopt()
                .map_err(ResolveError::MissingMapping),
            Strategy::GameStateHexes => derive_from(inputs.game_hexes, layout),
            Strategy::MappingHexes => {
                derive_from(inputs.mapping.map(BoardMapping::hexes).unwrap_or(&[]), layout)
            }
            Strategy::DefaultHexes => derive_from(inputs.default_hexes, layout),
            Strategy::FixedGrid => Ok(fallback_vertices(layout)),
        }
    }
}

fn derive_from<H: HexSite>(hexes: &[H], layout: &Layout) -> Result<Vec<Vertex>, ResolveError> {
    if hexes.is_empty() {
        return Err(ResolveError::DegenerateInput);
    }
    Ok(derive_vertices(hexes, layout))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveInputs<'a> {
    pub mapping: Option<&'a BoardMapping>,
    pub game_hexes: &'a [HexTile],
    pub default_hexes: &'a [HexTile],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub source: Strategy,
    pub vertices: Vec<Vertex>,
}

pub fn resolve_vertices(inputs: &ResolveInputs<'_>, layout: &Layout) -> Resolution {
    for strategy in Strategy::ORDERED {
        match strategy.attempt(inputs, layout) {
            Ok(vertices) => {
                info!("resolved {} vertices from {strategy}", vertices.len());
                return Resolution {
                    source: strategy,
                    vertices,
                };
            }
            Err(err @ ResolveError::MissingMapping(_)) => warn!("{strategy}: {err}"),
            Err(err) => debug!("{strategy}: {err}"),
        }
    }
    // Unreachable while FixedGrid closes the chain.
    Resolution {
        source: Strategy::FixedGrid,
        vertices: fallback_vertices(layout),
    }
}
