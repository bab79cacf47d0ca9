use log::{debug, info, warn};

use crate::board::{Board, Building, Vertex, vertex_by_id};
use crate::geometry::{HARBOR_OFFSET, Layout, PixelPoint, harbor_anchor};
use crate::mapping::BoardMapping;
use crate::resolver::{ResolveInputs, Strategy, resolve_vertices};
use crate::state::{GameSnapshot, Harbor, Road};
use crate::types::PointId;
use crate::view::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    pub road: Road,
    pub from: PixelPoint,
    pub to: PixelPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarborMarker {
    pub harbor: Harbor,
    pub anchor: PixelPoint,
    pub ends: (PixelPoint, PixelPoint),
}

/// Everything one viewer session shows: the active board, the vertex layout
/// resolved for it, and the latest server state on top.
///
/// The vertex list is replaced wholesale by [`Session::reload`] and is
/// otherwise only touched to attach buildings.
#[derive(Debug, Clone)]
pub struct Session {
    layout: Layout,
    board: Board,
    mapping: Option<BoardMapping>,
    snapshot: Option<GameSnapshot>,
    source: Strategy,
    vertices: Vec<Vertex>,
    roads: Vec<RoadSegment>,
    harbors: Vec<HarborMarker>,
    viewport: Viewport,
}

impl Session {
    pub fn new(layout: Layout) -> Self {
        Self::with_board(layout, Board::standard())
    }

    pub fn with_board(layout: Layout, board: Board) -> Self {
        let mut session = Self {
            layout,
            board,
            mapping: None,
            snapshot: None,
            source: Strategy::FixedGrid,
            vertices: Vec::new(),
            roads: Vec::new(),
            harbors: Vec::new(),
            viewport: Viewport::default(),
        };
        session.reload(None);
        session
    }

    /// Recompute the vertex layout from scratch, preferring `mapping`.
    pub fn reload(&mut self, mapping: Option<BoardMapping>) {
        self.mapping = mapping;
        let game_hexes = self
            .snapshot
            .as_ref()
            .map(|snapshot| snapshot.hexes.as_slice())
            .unwrap_or(&[]);
        let inputs = ResolveInputs {
            mapping: self.mapping.as_ref(),
            game_hexes,
            default_hexes: self.board.hexes(),
        };
        let resolution = resolve_vertices(&inputs, &self.layout);
        self.source = resolution.source;
        self.vertices = resolution.vertices;
        self.attach_snapshot_features();
    }

    /// Reload with a mapping document; an unreadable one counts as absent.
    pub fn load_mapping_json(&mut self, text: &str) {
        let mapping = match BoardMapping::from_json_str(text) {
            Ok(mapping) => Some(mapping),
            Err(err) => {
                warn!("ignoring board mapping: {err}");
                None
            }
        };
        self.reload(mapping);
    }

    /// Mirror a server push. Vertex geometry stays as resolved.
    pub fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        if !snapshot.hexes.is_empty() {
            self.board.replace_hexes(snapshot.hexes.clone());
        }
        if let Some(robber) = snapshot.robber_hex() {
            if let Err(err) = self.board.move_robber(robber) {
                warn!("robber position: {err}");
            }
        }
        self.snapshot = Some(snapshot);
        self.attach_snapshot_features();
    }

    fn attach_snapshot_features(&mut self) {
        for vertex in &mut self.vertices {
            vertex.buildings.clear();
        }
        self.roads.clear();
        self.harbors.clear();

        let Some(snapshot) = self.snapshot.as_ref() else {
            return;
        };

        for (kind, placed) in snapshot.buildings() {
            match self.vertices.iter_mut().find(|v| v.id == placed.vertex) {
                Some(vertex) => vertex.buildings.push(Building {
                    id: placed.id.clone(),
                    kind,
                    player: placed.player,
                }),
                None => warn!("no vertex {} for {kind} {}", placed.vertex, placed.id),
            }
        }

        for road in &snapshot.roads {
            match (self.position_of(road.from), self.position_of(road.to)) {
                (Some(from), Some(to)) => self.roads.push(RoadSegment {
                    road: road.clone(),
                    from,
                    to,
                }),
                _ => warn!("no vertices {}->{} for road {}", road.from, road.to, road.id),
            }
        }

        for harbor in &snapshot.harbors {
            match (self.position_of(harbor.point_one), self.position_of(harbor.point_two)) {
                (Some(a), Some(b)) => self.harbors.push(HarborMarker {
                    harbor: harbor.clone(),
                    anchor: harbor_anchor(a, b, self.layout.center(), HARBOR_OFFSET),
                    ends: (a, b),
                }),
                _ => warn!(
                    "no vertices {}-{} for harbor {}",
                    harbor.point_one, harbor.point_two, harbor.id
                ),
            }
        }

        debug!(
            "attached {} buildings, {} roads, {} harbors",
            snapshot.settlements.len() + snapshot.cities.len(),
            self.roads.len(),
            self.harbors.len()
        );
    }

    fn position_of(&self, id: PointId) -> Option<PixelPoint> {
        vertex_by_id(&self.vertices, id).map(Vertex::position)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn source(&self) -> Strategy {
        self.source
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn road_segments(&self) -> &[RoadSegment] {
        &self.roads
    }

    pub fn harbor_markers(&self) -> &[HarborMarker] {
        &self.harbors
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Full reset: drop server state and mapping, start over from `board`.
    pub fn reset(&mut self, board: Board) {
        info!("resetting session board ({} hexes)", board.hexes().len());
        self.board = board;
        self.snapshot = None;
        self.viewport = Viewport::default();
        self.reload(None);
    }
}
