use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    SouthEast,
    South,
    SouthWest,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    /// Axial step towards the neighbouring hex in this direction, for the
    /// layout used by [`crate::geometry::Layout`] (`x` grows with `q`, `y`
    /// grows with `r`).
    pub const fn offset(self) -> AxialCoord {
        match self {
            Direction::SouthEast => AxialCoord::new(1, 0),
            Direction::South => AxialCoord::new(0, 1),
            Direction::SouthWest => AxialCoord::new(-1, 1),
            Direction::NorthWest => AxialCoord::new(-1, 0),
            Direction::North => AxialCoord::new(0, -1),
            Direction::NorthEast => AxialCoord::new(1, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube component; `q + r + s == 0`.
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    pub fn add(self, other: AxialCoord) -> Self {
        AxialCoord::new(self.q + other.q, self.r + other.r)
    }

    pub fn neighbor(self, direction: Direction) -> Self {
        self.add(direction.offset())
    }

    pub fn neighbors(self) -> impl Iterator<Item = AxialCoord> {
        Direction::iter().map(move |direction| self.neighbor(direction))
    }

    pub fn distance(self, other: AxialCoord) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        dq.max(dr).max(ds)
    }
}

impl From<(i32, i32)> for AxialCoord {
    fn from((q, r): (i32, i32)) -> Self {
        AxialCoord::new(q, r)
    }
}

fn num_tiles_for(layer: i32) -> i32 {
    if layer == 0 {
        return 1;
    }
    6 * layer + num_tiles_for(layer - 1)
}

/// Every coordinate within `num_layers` rings of the origin, in breadth-first
/// order starting at the centre.
pub fn generate_coordinate_system(num_layers: i32) -> Vec<AxialCoord> {
    let target = num_tiles_for(num_layers.max(0)) as usize;
    let mut visited = HashSet::new();
    let mut ordered = Vec::with_capacity(target);
    let mut queue = VecDeque::from([AxialCoord::default()]);

    while ordered.len() < target {
        let Some(node) = queue.pop_front() else {
            break;
        };
        if !visited.insert(node) {
            continue;
        }
        ordered.push(node);
        for neighbor in node.neighbors() {
            if !visited.contains(&neighbor) && !queue.contains(&neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_sizes_match_hexagonal_numbers() {
        assert_eq!(generate_coordinate_system(0).len(), 1);
        assert_eq!(generate_coordinate_system(1).len(), 7);
        assert_eq!(generate_coordinate_system(2).len(), 19);
    }

    #[test]
    fn generated_coordinates_stay_within_radius() {
        let origin = AxialCoord::default();
        for coord in generate_coordinate_system(2) {
            assert!(origin.distance(coord) <= 2, "{coord:?} outside radius");
        }
    }

    #[test]
    fn neighbors_are_at_distance_one() {
        let center = AxialCoord::new(1, -1);
        let neighbors: Vec<_> = center.neighbors().collect();
        assert_eq!(neighbors.len(), 6);
        assert!(neighbors.iter().all(|n| center.distance(*n) == 1));
    }
}
