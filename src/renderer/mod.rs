//! Rendering module
//!
//! The simulation hands out a read-only `Frame` each tick. A `Renderer`
//! draws it however the host likes; `DrawList` tessellates it into plain
//! triangles and text labels that any backend (WebGL, WebGPU, canvas) can
//! upload as-is.

pub mod draw_list;
pub mod shapes;
pub mod vertex;

use serde::Serialize;

pub use draw_list::{Anchor, DrawList, Label};
pub use vertex::Vertex;

use crate::config::Colors;
use crate::sim::{Arena, Enemy, GamePhase, GameState, Particle, Player, Powerup, Projectile};

/// Read-only snapshot of a session for one render pass
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a> {
    pub arena: Arena,
    pub phase: GamePhase,
    pub colors: Colors,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub powerups: &'a [Powerup],
    pub particles: &'a [Particle],
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub high_score: u64,
}

impl<'a> Frame<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            arena: state.arena,
            phase: state.phase,
            colors: state.tuning.colors,
            player: &state.player,
            enemies: &state.enemies,
            projectiles: &state.projectiles,
            powerups: &state.powerups,
            particles: &state.particles,
            score: state.score,
            level: state.level,
            lives: state.lives,
            high_score: state.high_score,
        }
    }
}

/// Shown once when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverSummary {
    pub score: u64,
    pub high_score: u64,
    /// The final score beat the stored best
    pub new_record: bool,
}

/// Draw target for session snapshots
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);

    /// Terminal overlay hook; called once per finished session
    fn game_over(&mut self, _summary: &GameOverSummary) {}
}
