//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.067, 0.067, 0.067, 1.0]; // #111111
    pub const PLAYER: [f32; 4] = [0.298, 0.765, 1.0, 1.0]; // #4cc3ff
    pub const AIM: [f32; 4] = [0.553, 0.89, 1.0, 1.0]; // #8de3ff
    pub const BULLET: [f32; 4] = [1.0, 0.784, 0.341, 1.0]; // #ffc857
    pub const BOSS_BULLET: [f32; 4] = [1.0, 0.722, 0.42, 1.0]; // #ffb86b
    pub const BOSS: [f32; 4] = [1.0, 0.42, 0.42, 1.0]; // #ff6b6b
    pub const BOSS_FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SHIELD_FILL: [f32; 4] = [0.42, 0.839, 1.0, 0.2]; // #6bd6ff
    pub const SHIELD_EDGE: [f32; 4] = [0.42, 0.839, 1.0, 0.9];
    pub const SPLASH: [f32; 4] = [1.0, 0.945, 0.659, 0.5]; // #fff1a8

    /// Same color with alpha scaled by `factor`
    pub fn faded(color: [f32; 4], factor: f32) -> [f32; 4] {
        [color[0], color[1], color[2], color[3] * factor.clamp(0.0, 1.0)]
    }
}
