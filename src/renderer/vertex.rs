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
    /// Floats per vertex when flattened for a host buffer
    pub const FLOATS: usize = 6;

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Fixed colors; gameplay colors come from the configuration
pub mod colors {
    pub const SHIELD_RING: [f32; 4] = [100.0 / 255.0, 200.0 / 255.0, 1.0, 0.7];
    pub const HEALTH_BAR_BACK: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BAR_FILL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const POWERUP_CORE: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const LIFE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const HUD_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HUD_SHIELD: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const HUD_SPEED: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const HUD_MULTISHOT: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
}
