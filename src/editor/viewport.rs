//! Viewport management for pan/zoom operations

use crate::constants::viewport::{MAX_ZOOM, MIN_ZOOM};
use egui::{Pos2, Vec2};

/// Manages viewport state including pan and zoom
///
/// Screen coordinates here are local to the canvas area.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub pan_offset: Vec2,
    pub zoom: f32,
}

impl Viewport {
    /// Creates a new viewport with default settings
    pub fn new() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Zoom at a specific screen point
    pub fn zoom_at_point(&mut self, screen_point: Pos2, zoom_delta: f32) {
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * zoom_delta).clamp(MIN_ZOOM, MAX_ZOOM);

        // Adjust pan to keep the zoom point stationary
        let zoom_factor = self.zoom / old_zoom;
        let screen_point_vec = screen_point.to_vec2();
        self.pan_offset = screen_point_vec + (self.pan_offset - screen_point_vec) * zoom_factor;
    }

    /// Apply pan offset
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Pan so that a world position lands in the middle of the view, keeping zoom
    pub fn center_on(&mut self, world_pos: Pos2, view_size: Vec2) {
        self.pan_offset = view_size * 0.5 - world_pos.to_vec2() * self.zoom;
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, world_pos: Pos2) -> Pos2 {
        Pos2::new(
            world_pos.x * self.zoom + self.pan_offset.x,
            world_pos.y * self.zoom + self.pan_offset.y,
        )
    }

    /// Convert screen coordinates to world coordinates
    pub fn screen_to_world(&self, screen_pos: Pos2) -> Pos2 {
        Pos2::new(
            (screen_pos.x - self.pan_offset.x) / self.zoom,
            (screen_pos.y - self.pan_offset.y) / self.zoom,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
