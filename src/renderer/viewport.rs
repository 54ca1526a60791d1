//! Mapping between arena (world) coordinates and the canvas
//!
//! The arena keeps its aspect ratio and is centered in the canvas, with
//! letterbox bars on the long axis. World y grows downward.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas size in pixels
    pub size: Vec2,
    /// Arena size in world units
    pub world: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32, world: Vec2) -> Self {
        Self {
            size: Vec2::new(width, height),
            world,
        }
    }

    /// Pixels per world unit
    pub fn scale(&self) -> f32 {
        let s = (self.size / self.world).min_element();
        if s.is_finite() && s > 0.0 { s } else { 1.0 }
    }

    /// Top-left corner of the arena on the canvas, in pixels
    pub fn origin(&self) -> Vec2 {
        (self.size - self.world * self.scale()) / 2.0
    }

    /// World position to normalized device coordinates
    pub fn world_to_ndc(&self, p: Vec2) -> Vec2 {
        let pixel = self.origin() + p * self.scale();
        let ndc = pixel / self.size * 2.0 - Vec2::ONE;
        Vec2::new(ndc.x, -ndc.y)
    }

    /// Canvas pixel position (e.g. a mouse offset) to world coordinates
    pub fn screen_to_world(&self, pixel: Vec2) -> Vec2 {
        (pixel - self.origin()) / self.scale()
    }
}
