use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub show_vertices: bool,
    #[serde(skip)]
    drag_origin: Option<(f64, f64)>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            show_vertices: true,
            drag_origin: None,
        }
    }
}

impl Viewport {
    /// Mouse-wheel zoom: scrolling down zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.2).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * 0.8).max(MIN_ZOOM);
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    pub fn start_drag(&mut self, x: f64, y: f64) {
        self.drag_origin = Some((x, y));
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        let Some((last_x, last_y)) = self.drag_origin else {
            return;
        };
        self.pan_x += x - last_x;
        self.pan_y += y - last_y;
        self.drag_origin = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    pub fn toggle_vertices(&mut self) -> bool {
        self.show_vertices = !self.show_vertices;
        self.show_vertices
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan_x, self.pan_y, self.zoom
        )
    }
}
