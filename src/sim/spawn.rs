//! Enemy and powerup spawning
//!
//! Enemies enter from a random edge aimed at where the player is at that
//! moment; they are never re-aimed. Powerups appear at random points or where
//! an enemy died.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Enemy, GameState, Powerup};
use crate::config::Tuning;
use crate::consts::*;

/// Spawn rate (percent per tick) for a level
///
/// Shrinks with level and is floored so it never goes negative. The floor
/// never exceeds the tier's own base rate.
pub fn spawn_rate_for_level(tuning: &Tuning, level: u32) -> f32 {
    let rate = tuning.base_spawn_rate * (1.0 - level as f32 * SPAWN_RATE_PER_LEVEL);
    let floor = tuning.min_spawn_rate.min(tuning.base_spawn_rate);
    rate.max(floor)
}

/// Base enemy speed (px/tick) for a level, before jitter
pub fn enemy_speed_for_level(tuning: &Tuning, level: u32) -> f32 {
    tuning.base_speed * (1.0 + level as f32 * ENEMY_SPEED_PER_LEVEL)
}

/// Hits an enemy of this size absorbs (size / 10, rounded up, at least 1)
pub fn health_for_size(size: u32) -> u32 {
    size.div_ceil(10).max(1)
}

/// Points for killing an enemy of this size; smaller is worth more
pub fn score_for_size(size: u32) -> u32 {
    KILL_SCORE_NUMERATOR / size.max(1)
}

/// Point just outside a random arena edge
fn edge_spawn_point<R: Rng>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    match rng.random_range(0..4) {
        // top
        0 => Vec2::new(rng.random::<f32>() * width, -SPAWN_OFFSET),
        // right
        1 => Vec2::new(width + SPAWN_OFFSET, rng.random::<f32>() * height),
        // bottom
        2 => Vec2::new(rng.random::<f32>() * width, height + SPAWN_OFFSET),
        // left
        _ => Vec2::new(-SPAWN_OFFSET, rng.random::<f32>() * height),
    }
}

/// Spawn one enemy at a random edge, aimed at the player
pub fn spawn_enemy(state: &mut GameState) -> Option<u32> {
    let size = *state.tuning.enemy_sizes.choose(&mut state.rng)?;
    let pos = edge_spawn_point(&mut state.rng, state.arena.width, state.arena.height);
    let speed = state.enemy_speed + state.rng.random::<f32>() * ENEMY_SPEED_JITTER;
    let vel = (state.player.pos - pos).normalize_or_zero() * speed;
    let health = health_for_size(size);

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        vel,
        size,
        radius: size as f32,
        health,
        max_health: health,
        color: state.tuning.colors.enemy,
    });
    Some(id)
}

/// Spawn a powerup at `at`, or at a random arena point
pub fn spawn_powerup(state: &mut GameState, at: Option<Vec2>) -> Option<u32> {
    let kind = *state.tuning.powerup_kinds.choose(&mut state.rng)?;
    let pos = match at {
        Some(pos) => pos,
        None => state.arena.random_point(&mut state.rng),
    };

    let id = state.next_entity_id();
    state.powerups.push(Powerup {
        id,
        kind,
        pos,
        radius: POWERUP_RADIUS,
    });
    log::debug!("Powerup {:?} spawned at ({:.0}, {:.0})", kind, pos.x, pos.y);
    Some(id)
}

/// Per-tick spawn rolls
pub fn roll_spawns(state: &mut GameState) {
    let enemy_chance = (state.spawn_rate / 100.0).clamp(0.0, 1.0) as f64;
    if state.rng.random_bool(enemy_chance) {
        spawn_enemy(state);
    }

    if state.rng.random_bool(state.tuning.powerup_spawn_chance) {
        spawn_powerup(state, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::sim::state::Arena;
    use proptest::prelude::*;

    fn state_with(config: GameConfig) -> GameState {
        GameState::new(config.resolve().unwrap(), Arena::default(), 42, 1)
    }

    #[test]
    fn test_health_and_score_for_default_tiers() {
        assert_eq!(health_for_size(20), 2);
        assert_eq!(health_for_size(30), 3);
        assert_eq!(health_for_size(40), 4);
        assert_eq!(score_for_size(20), 5);
        assert_eq!(score_for_size(30), 3);
        assert_eq!(score_for_size(40), 2);
    }

    #[test]
    fn test_small_enemies_still_take_a_hit() {
        assert_eq!(health_for_size(1), 1);
        assert_eq!(health_for_size(15), 2);
    }

    #[test]
    fn test_spawn_rate_decreases_and_floors() {
        let tuning = GameConfig::default().resolve().unwrap();
        assert!((spawn_rate_for_level(&tuning, 1) - 38.0).abs() < 1e-4);
        assert!((spawn_rate_for_level(&tuning, 2) - 36.0).abs() < 1e-4);
        assert!(spawn_rate_for_level(&tuning, 3) < spawn_rate_for_level(&tuning, 2));
        // 40 * (1 - 25 * 0.05) < 0
        assert_eq!(spawn_rate_for_level(&tuning, 25), tuning.min_spawn_rate);
    }

    #[test]
    fn test_spawn_floor_never_exceeds_base() {
        let mut config = GameConfig::default();
        config.difficulty.get_mut("medium").unwrap().spawn_rate = 0.0;
        let tuning = config.resolve().unwrap();
        assert_eq!(spawn_rate_for_level(&tuning, 1), 0.0);
        assert_eq!(spawn_rate_for_level(&tuning, 30), 0.0);
    }

    #[test]
    fn test_enemy_speed_grows_with_level() {
        let tuning = GameConfig::default().resolve().unwrap();
        assert!((enemy_speed_for_level(&tuning, 1) - 5.5).abs() < 1e-5);
        assert!((enemy_speed_for_level(&tuning, 2) - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_spawned_enemy_starts_outside_and_aims_at_player() {
        let mut state = state_with(GameConfig::default());
        for _ in 0..50 {
            spawn_enemy(&mut state).unwrap();
        }
        let arena = state.arena;
        let player = state.player.pos;
        for enemy in &state.enemies {
            let outside = enemy.pos.x < 0.0
                || enemy.pos.x > arena.width
                || enemy.pos.y < 0.0
                || enemy.pos.y > arena.height;
            assert!(outside, "enemy spawned inside at {:?}", enemy.pos);

            let to_player = (player - enemy.pos).normalize();
            assert!(enemy.vel.normalize().dot(to_player) > 0.9999);

            let speed = enemy.vel.length();
            assert!(speed >= state.enemy_speed - 1e-4);
            assert!(speed < state.enemy_speed + ENEMY_SPEED_JITTER + 1e-4);

            assert!([20, 30, 40].contains(&enemy.size));
            assert_eq!(enemy.health, enemy.size / 10);
            assert_eq!(enemy.radius, enemy.size as f32);
        }
    }

    #[test]
    fn test_spawn_uses_every_edge() {
        let mut state = state_with(GameConfig::default());
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        let arena = state.arena;
        let top = state.enemies.iter().any(|e| e.pos.y == -SPAWN_OFFSET);
        let bottom = state.enemies.iter().any(|e| e.pos.y == arena.height + SPAWN_OFFSET);
        let left = state.enemies.iter().any(|e| e.pos.x == -SPAWN_OFFSET);
        let right = state.enemies.iter().any(|e| e.pos.x == arena.width + SPAWN_OFFSET);
        assert!(top && bottom && left && right);
    }

    #[test]
    fn test_powerup_at_position_and_kind_from_config() {
        let mut config = GameConfig::default();
        config.powerup_types = vec![crate::sim::PowerupKind::Shield];
        let mut state = state_with(config);
        spawn_powerup(&mut state, Some(Vec2::new(12.0, 34.0))).unwrap();
        spawn_powerup(&mut state, None).unwrap();

        assert_eq!(state.powerups.len(), 2);
        assert_eq!(state.powerups[0].pos, Vec2::new(12.0, 34.0));
        assert!(
            state
                .powerups
                .iter()
                .all(|p| p.kind == crate::sim::PowerupKind::Shield)
        );
        let p = state.powerups[1].pos;
        assert!(p.x >= 0.0 && p.x <= state.arena.width);
        assert!(p.y >= 0.0 && p.y <= state.arena.height);
    }

    #[test]
    fn test_zero_rates_never_spawn() {
        let mut config = GameConfig::default();
        config.difficulty.get_mut("medium").unwrap().spawn_rate = 0.0;
        config.powerup_spawn_chance = 0.0;
        let mut state = state_with(config);
        for _ in 0..1000 {
            roll_spawns(&mut state);
        }
        assert!(state.enemies.is_empty());
        assert!(state.powerups.is_empty());
    }

    proptest! {
        #[test]
        fn prop_health_and_score_follow_size(size in 1u32..500) {
            prop_assert_eq!(score_for_size(size), 100 / size);
            let health = health_for_size(size);
            prop_assert!(health >= 1);
            if size % 10 == 0 {
                prop_assert_eq!(health, size / 10);
            }
        }
    }
}
