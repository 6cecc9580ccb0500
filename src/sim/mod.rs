//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - State owned by a `GameState`, never global
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, outside_bounds};
pub use spawn::{enemy_speed_for_level, health_for_size, score_for_size, spawn_rate_for_level};
pub use state::{
    ActivePowerups, Arena, Enemy, GameEvent, GamePhase, GameState, Particle, Player, Powerup,
    PowerupKind, Projectile,
};
pub use tick::{TickInput, add_score, fire, tick};
