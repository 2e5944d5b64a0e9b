//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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
    pub const BACKGROUND: [f32; 4] = [0.03, 0.03, 0.06, 1.0];
    pub const PLAY_AREA: [f32; 4] = [0.06, 0.06, 0.11, 1.0];
    pub const GRID: [f32; 4] = [0.14, 0.14, 0.24, 1.0];

    /// Standard target: red body, white mid ring, red bullseye
    pub const TARGET: [f32; 4] = [1.0, 0.27, 0.33, 1.0];
    pub const TARGET_RING: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Spike-mode core
    pub const CORE: [f32; 4] = [0.07, 0.72, 0.99, 1.0];
    /// Spike-mode decoy grays
    pub const DECOY: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
    pub const DECOY_RING: [f32; 4] = [0.6, 0.6, 0.6, 1.0];

    pub const TEXT: [f32; 4] = [0.92, 0.92, 0.95, 1.0];
    pub const TEXT_DIM: [f32; 4] = [0.55, 0.55, 0.62, 1.0];
    pub const ACCENT: [f32; 4] = [0.07, 0.72, 0.99, 1.0];
    pub const WARNING: [f32; 4] = [1.0, 0.27, 0.33, 1.0];
    pub const GOLD: [f32; 4] = [1.0, 0.84, 0.0, 1.0];

    pub const BUTTON: [f32; 4] = [0.1, 0.1, 0.17, 1.0];
    pub const BUTTON_HOVER: [f32; 4] = [0.55, 0.16, 0.2, 1.0];
    pub const BUTTON_BORDER: [f32; 4] = [1.0, 0.27, 0.33, 1.0];

    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.72];
    pub const TIMER_BAR: [f32; 4] = [0.07, 0.72, 0.99, 0.9];
    pub const AMMO: [f32; 4] = [0.92, 0.92, 0.95, 0.9];
    pub const AMMO_EMPTY: [f32; 4] = [0.25, 0.25, 0.32, 0.9];
}
