//! Scripted input for headless sessions
//!
//! Shots always travel from the player toward the arena centre, so the
//! autopilot parks the player on the far side of the centre from the nearest
//! enemy and fires at a fixed cadence.

use glam::Vec2;

use crate::sim::{GameState, TickInput};

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Ticks between shots
    pub fire_every: u64,
    /// Distance from the centre the player holds
    pub standoff: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_every: 8,
            standoff: 120.0,
        }
    }
}

impl Autopilot {
    /// Input for the next tick
    pub fn steer(&self, state: &GameState) -> TickInput {
        let center = state.arena.center();
        let nearest = state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(state.player.pos)
                    .total_cmp(&b.pos.distance_squared(state.player.pos))
            })
            .map(|e| e.pos);

        let pointer = nearest.map(|enemy| {
            let away = (center - enemy).try_normalize().unwrap_or(Vec2::X);
            center + away * self.standoff
        });

        let fire = nearest.is_some()
            && self.fire_every > 0
            && state.time_ticks % self.fire_every == 0;

        TickInput {
            pointer,
            fire: fire as u32,
        }
    }
}
