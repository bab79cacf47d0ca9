#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod coords;
pub mod geometry;
pub mod mapping;
pub mod render;
pub mod resolver;
pub mod session;
pub mod state;
pub mod types;
pub mod view;

pub use board::{Board, HexTile, Vertex};
pub use geometry::Layout;
pub use mapping::{BoardMapping, PointMapper};
pub use resolver::{Resolution, ResolveInputs, Strategy, resolve_vertices};
pub use session::Session;
pub use state::GameSnapshot;
