//! Pixel geometry shared by the vertex resolver and the renderer.
//!
//! Both sides must use the same [`Layout`]: vertex markers are only aligned
//! with the drawn hex outlines when they are computed from identical
//! constants.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::coords::AxialCoord;

pub const DEFAULT_HEX_RADIUS: f64 = 45.0;
pub const DEFAULT_CENTER_X: f64 = 400.0;
pub const DEFAULT_CENTER_Y: f64 = 300.0;
pub const DEFAULT_ROW_TOLERANCE: f64 = 10.0;
pub const HARBOR_OFFSET: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Centre-to-corner distance of every hex.
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Corners whose `y` lies within this many pixels of a row's first
    /// corner belong to that row. Only meaningful for the default radius;
    /// re-derive it when changing `radius`.
    pub row_tolerance: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            radius: DEFAULT_HEX_RADIUS,
            center_x: DEFAULT_CENTER_X,
            center_y: DEFAULT_CENTER_Y,
            row_tolerance: DEFAULT_ROW_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whole-pixel identity of a point. Corners computed from neighbouring
    /// hexes differ in the last bits, so they are merged on this key.
    pub fn rounded_key(self) -> (i64, i64) {
        (whole_pixel(self.x), whole_pixel(self.y))
    }

    pub fn distance(self, other: PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: PixelPoint) -> PixelPoint {
        PixelPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

const SNAP_SCALE: f64 = 1e6;

/// Nearest whole pixel. Corners of the default layout land exactly on
/// half pixels (`x = 400 ± 22.5k`), where last-bit noise would pick either
/// neighbour; snapping to a micro-pixel grid first and breaking ties to even
/// sends both copies the same way.
fn whole_pixel(v: f64) -> i64 {
    ((v * SNAP_SCALE).round() / SNAP_SCALE).round_ties_even() as i64
}

impl Layout {
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(self.center_x, self.center_y)
    }

    pub fn hex_to_pixel(&self, q: i32, r: i32) -> PixelPoint {
        let (q, r) = (q as f64, r as f64);
        let x = self.radius * (3.0 / 2.0 * q);
        let y = self.radius * (3.0_f64.sqrt() / 2.0 * q + 3.0_f64.sqrt() * r);
        PixelPoint::new(self.center_x + x, self.center_y + y)
    }

    pub fn coord_to_pixel(&self, coord: AxialCoord) -> PixelPoint {
        self.hex_to_pixel(coord.q, coord.r)
    }

    /// The six corners of hex `(q, r)`, counter-clockwise on screen from the
    /// east corner (angle `i * 60°`).
    pub fn hex_corners(&self, q: i32, r: i32) -> [PixelPoint; 6] {
        let center = self.hex_to_pixel(q, r);
        std::array::from_fn(|i| {
            let angle = PI / 3.0 * i as f64;
            PixelPoint::new(
                center.x + self.radius * angle.cos(),
                center.y + self.radius * angle.sin(),
            )
        })
    }
}

/// Where a harbor marker sits: the midpoint of its two vertices, pushed
/// `offset` pixels away from the board centre.
pub fn harbor_anchor(a: PixelPoint, b: PixelPoint, center: PixelPoint, offset: f64) -> PixelPoint {
    let mid = a.midpoint(b);
    let (dx, dy) = (mid.x - center.x, mid.y - center.y);
    let dist = dx.hypot(dy);
    if dist == 0.0 {
        return mid;
    }
    PixelPoint::new(mid.x + dx / dist * offset, mid.y + dy / dist * offset)
}
