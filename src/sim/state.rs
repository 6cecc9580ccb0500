//! Game state and core simulation types
//!
//! A session owns every entity and counter. Nothing here is global, so several
//! sessions can run side by side and tests can step one without a display.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::{enemy_speed_for_level, spawn_rate_for_level};
use crate::config::Tuning;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; terminal overlay shown
    GameOver,
}

/// The bounded playfield, origin top-left, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a circle so it lies fully inside the arena
    ///
    /// If the circle is wider than the arena it is centred on that axis.
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        let clamp_axis = |v: f32, extent: f32| {
            if 2.0 * radius >= extent {
                extent / 2.0
            } else {
                v.clamp(radius, extent - radius)
            }
        };
        Vec2::new(clamp_axis(pos.x, self.width), clamp_axis(pos.y, self.height))
    }

    /// Uniform random point inside the arena
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * self.width,
            rng.random::<f32>() * self.height,
        )
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerupKind {
    /// Absorbs one enemy contact
    Shield,
    /// Faster movement (chase model only)
    Speed,
    /// Three projectiles per shot
    Multishot,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::Shield,
        PowerupKind::Speed,
        PowerupKind::Multishot,
    ];

    /// Label shown when collected
    pub fn label(&self) -> &'static str {
        match self {
            PowerupKind::Shield => "SHIELD",
            PowerupKind::Speed => "SPEED",
            PowerupKind::Multishot => "MULTISHOT",
        }
    }

    /// How long the effect lasts; `None` for one-shot effects
    pub fn duration_secs(&self) -> Option<f64> {
        match self {
            PowerupKind::Shield => None,
            PowerupKind::Speed => Some(SPEED_DURATION_SECS),
            PowerupKind::Multishot => Some(MULTISHOT_DURATION_SECS),
        }
    }
}

/// Active power-up effects
///
/// Timed effects hold their expiry on the session clock. A flag is live
/// exactly while its expiry is set; `expire` clears it once due.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerups {
    pub shield: bool,
    pub speed_until: Option<f64>,
    pub multishot_until: Option<f64>,
}

impl ActivePowerups {
    #[inline]
    pub fn speed(&self) -> bool {
        self.speed_until.is_some()
    }

    #[inline]
    pub fn multishot(&self) -> bool {
        self.multishot_until.is_some()
    }

    /// Activate an effect; collecting a timed effect again restarts its timer
    pub fn apply(&mut self, kind: PowerupKind, now: f64) {
        let until = kind.duration_secs().map(|d| now + d);
        match kind {
            PowerupKind::Shield => self.shield = true,
            PowerupKind::Speed => self.speed_until = until,
            PowerupKind::Multishot => self.multishot_until = until,
        }
    }

    /// Clear an effect regardless of its timer
    pub fn clear(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Shield => self.shield = false,
            PowerupKind::Speed => self.speed_until = None,
            PowerupKind::Multishot => self.multishot_until = None,
        }
    }

    /// Clear timed effects that are due, returning which ones ended
    pub fn expire(&mut self, now: f64) -> Vec<PowerupKind> {
        let mut ended = Vec::new();
        if self.speed_until.is_some_and(|t| now >= t) {
            self.speed_until = None;
            ended.push(PowerupKind::Speed);
        }
        if self.multishot_until.is_some_and(|t| now >= t) {
            self.multishot_until = None;
            ended.push(PowerupKind::Multishot);
        }
        ended
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Latest pointer position
    pub target: Option<Vec2>,
    pub powerups: ActivePowerups,
}

impl Player {
    /// Player centred in the arena
    pub fn new(arena: &Arena, radius: f32) -> Self {
        Self {
            pos: arena.center(),
            radius,
            target: None,
            powerups: ActivePowerups::default(),
        }
    }

    /// Move toward the pointer target, then clamp inside the arena
    ///
    /// With no follow speed the player snaps to the target.
    pub fn update(&mut self, arena: &Arena, follow_speed: Option<f32>) {
        if let Some(target) = self.target {
            self.pos = match follow_speed {
                None => target,
                Some(speed) => {
                    let speed = if self.powerups.speed() {
                        speed * SPEED_BOOST
                    } else {
                        speed
                    };
                    let delta = target - self.pos;
                    if delta.length() <= speed {
                        target
                    } else {
                        self.pos + delta.normalize_or_zero() * speed
                    }
                }
            };
        }
        self.pos = arena.clamp_circle(self.pos, self.radius);
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Size tier; also the radius in px
    pub size: u32,
    pub radius: f32,
    pub health: u32,
    pub max_health: u32,
    pub color: u32,
}

impl Enemy {
    /// Remaining health in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A pickup lying in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// Floating label instead of a dot
    pub text: Option<String>,
    /// Remaining ticks
    pub life: f32,
}

impl Particle {
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.life / 100.0).clamp(0.0, 1.0)
    }
}

/// Something that happened during a tick, for hosts (HUD, audio, logging)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { id: u32, size: u32, points: u32 },
    EnemyEscaped { id: u32 },
    PlayerHit { lives: u32 },
    ShieldAbsorbed,
    PowerupCollected(PowerupKind),
    PowerupExpired(PowerupKind),
    LevelUp(u32),
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tuning captured at session start
    pub tuning: Tuning,
    pub arena: Arena,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    /// Persisted best, mirrored for the HUD
    pub high_score: u64,
    /// Session clock, seconds
    pub clock: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Identifies this session among restarts
    pub generation: u32,
    /// Current spawn rate, percent per tick
    pub spawn_rate: f32,
    /// Current base enemy speed, px/tick
    pub enemy_speed: f32,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh idle session
    pub fn new(tuning: Tuning, arena: Arena, seed: u64, generation: u32) -> Self {
        let player = Player::new(&arena, tuning.player_radius);
        let lives = tuning.lives;
        let mut state = Self {
            tuning,
            arena,
            phase: GamePhase::Idle,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            score: 0,
            level: 1,
            lives,
            high_score: 0,
            clock: 0.0,
            time_ticks: 0,
            generation,
            spawn_rate: 0.0,
            enemy_speed: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.recompute_difficulty();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Refresh the level-derived spawn rate and enemy speed
    pub fn recompute_difficulty(&mut self) {
        self.spawn_rate = spawn_rate_for_level(&self.tuning, self.level);
        self.enemy_speed = enemy_speed_for_level(&self.tuning, self.level);
    }

    /// End a timed powerup from an externally scheduled callback
    ///
    /// Callbacks carry the generation they were scheduled in; one that
    /// outlived its session is ignored. Returns whether anything changed.
    pub fn expire_powerup(&mut self, kind: PowerupKind, generation: u32) -> bool {
        if generation != self.generation || !self.is_running() {
            log::debug!(
                "Ignoring stale {} expiry (generation {}, live {})",
                kind.label(),
                generation,
                self.generation
            );
            return false;
        }
        self.player.powerups.clear(kind);
        true
    }

    /// Take the events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let tuning = crate::GameConfig::default().resolve().unwrap();
        GameState::new(tuning, Arena::default(), 7, 1)
    }

    #[test]
    fn test_new_session_defaults() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.score, 0);
        assert_eq!(s.level, 1);
        assert_eq!(s.lives, 3);
        assert_eq!(s.player.pos, Vec2::new(400.0, 300.0));
        assert!(s.enemies.is_empty() && s.projectiles.is_empty());
        // medium: 40 * (1 - 0.05), 5 * (1 + 0.1)
        assert!((s.spawn_rate - 38.0).abs() < 1e-4);
        assert!((s.enemy_speed - 5.5).abs() < 1e-4);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut s = state();
        let a = s.next_entity_id();
        let b = s.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_clamp_keeps_radius_inside() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.clamp_circle(Vec2::new(-50.0, 900.0), 30.0), Vec2::new(30.0, 570.0));
        assert_eq!(arena.clamp_circle(Vec2::new(400.0, 300.0), 30.0), Vec2::new(400.0, 300.0));
        // Wider than the arena: centred
        let tiny = Arena::new(40.0, 600.0);
        assert_eq!(tiny.clamp_circle(Vec2::new(0.0, 300.0), 30.0).x, 20.0);
    }

    #[test]
    fn test_player_snaps_to_target() {
        let arena = Arena::default();
        let mut player = Player::new(&arena, 30.0);
        player.target = Some(Vec2::new(100.0, 120.0));
        player.update(&arena, None);
        assert_eq!(player.pos, Vec2::new(100.0, 120.0));

        player.target = Some(Vec2::new(5.0, 5.0));
        player.update(&arena, None);
        assert_eq!(player.pos, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_player_chase_respects_speed_powerup() {
        let arena = Arena::default();
        let mut player = Player::new(&arena, 30.0);
        player.target = Some(Vec2::new(600.0, 300.0));
        player.update(&arena, Some(5.0));
        assert_eq!(player.pos, Vec2::new(405.0, 300.0));

        player.powerups.apply(PowerupKind::Speed, 0.0);
        player.update(&arena, Some(5.0));
        assert_eq!(player.pos, Vec2::new(415.0, 300.0));
    }

    #[test]
    fn test_timed_powerups_expire() {
        let mut p = ActivePowerups::default();
        p.apply(PowerupKind::Speed, 1.0);
        p.apply(PowerupKind::Multishot, 1.0);
        p.apply(PowerupKind::Shield, 1.0);
        assert!(p.speed() && p.multishot() && p.shield);

        assert!(p.expire(10.9).is_empty());
        assert_eq!(p.expire(11.0), vec![PowerupKind::Speed]);
        assert!(p.multishot());
        assert_eq!(p.expire(16.0), vec![PowerupKind::Multishot]);
        // Shield is one-shot, never times out
        assert!(p.shield);
    }

    #[test]
    fn test_recollect_extends_timer() {
        let mut p = ActivePowerups::default();
        p.apply(PowerupKind::Speed, 0.0);
        p.apply(PowerupKind::Speed, 8.0);
        assert!(p.expire(12.0).is_empty());
        assert!(p.speed());
    }

    #[test]
    fn test_stale_expiry_is_ignored() {
        let mut s = state();
        s.phase = GamePhase::Running;
        s.player.powerups.apply(PowerupKind::Multishot, 0.0);

        assert!(!s.expire_powerup(PowerupKind::Multishot, 0));
        assert!(s.player.powerups.multishot());

        assert!(s.expire_powerup(PowerupKind::Multishot, 1));
        assert!(!s.player.powerups.multishot());
    }

    #[test]
    fn test_particle_alpha() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            color: 0,
            text: None,
            life: 80.0,
        };
        assert!((p.alpha() - 0.8).abs() < 1e-6);
        p.life = -3.0;
        assert_eq!(p.alpha(), 0.0);
    }
}
