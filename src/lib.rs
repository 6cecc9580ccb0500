//! Arena Shooter - top-down survival shooter core
//!
//! Core modules:
//! - `sim`: Simulation (player, enemies, projectiles, powerups, particles)
//! - `game`: Frame loop driving a session (start, reset, input, render step)
//! - `config`: Data-driven difficulty and sizing
//! - `highscore`: Best-score persistence shim
//! - `renderer`: Backend-neutral tessellation of a frame snapshot
//! - `platform`: Browser bindings and scripted input

pub mod config;
pub mod game;
pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig, Tuning};
pub use game::Game;
pub use highscore::{HighScoreStore, MemoryStore};

use glam::Vec2;

/// Fixed game rules (tunables live in `GameConfig`)
pub mod consts {
    /// Default arena dimensions (profile page canvas)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Enemies spawn this far outside the visible edge
    pub const SPAWN_OFFSET: f32 = 20.0;
    /// Enemies further than this outside the bounds have escaped
    pub const ENEMY_ESCAPE_MARGIN: f32 = 100.0;
    /// Projectiles further than this outside the bounds are dropped
    pub const PROJECTILE_ESCAPE_MARGIN: f32 = 50.0;

    /// Random extra enemy speed, px/tick
    pub const ENEMY_SPEED_JITTER: f32 = 2.0;
    /// Enemy speed grows 10% of base per level
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.1;
    /// Spawn rate shrinks 5% of base per level
    pub const SPAWN_RATE_PER_LEVEL: f32 = 0.05;

    /// Projectile speed, px/tick
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    /// Angle between multishot projectiles (radians)
    pub const MULTISHOT_SPREAD: f32 = 0.3;

    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const SPEED_DURATION_SECS: f64 = 10.0;
    pub const MULTISHOT_DURATION_SECS: f64 = 15.0;
    /// Powerup label floats this far above the player
    pub const POWERUP_LABEL_LIFT: f32 = 50.0;
    /// Chase-model speed multiplier while the speed powerup is live
    pub const SPEED_BOOST: f32 = 2.0;

    /// Score for a kill is `KILL_SCORE_NUMERATOR / size`
    pub const KILL_SCORE_NUMERATOR: u32 = 100;
    /// Level n ends at n * LEVEL_SCORE_STEP points
    pub const LEVEL_SCORE_STEP: u64 = 1000;
    pub const LEVEL_UP_PARTICLES: usize = 50;

    /// Particle tuning (per-tick units)
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 6.0;
    pub const PARTICLE_MIN_LIFE: f32 = 60.0;
    pub const PARTICLE_MAX_LIFE: f32 = 100.0;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Parse a `#rrggbb` colour into `0xRRGGBB`
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Expand `0xRRGGBB` into normalized RGBA
#[inline]
pub fn rgba(color: u32, alpha: f32) -> [f32; 4] {
    let r = ((color >> 16) & 0xff) as f32 / 255.0;
    let g = ((color >> 8) & 0xff) as f32 / 255.0;
    let b = (color & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}
