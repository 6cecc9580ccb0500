//! Simulation tick
//!
//! One call advances a running session by one frame. Movement is in px per
//! tick, so game speed follows the display refresh rate as it always has;
//! `dt` only advances the session clock that timed powerups expire against.
//!
//! Collections are walked back to front so removing the current entity never
//! shifts one that has yet to be visited.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_overlap, first_overlap, outside_bounds};
use super::particles;
use super::spawn::{roll_spawns, score_for_size, spawn_powerup};
use super::state::{GameEvent, GamePhase, GameState, Powerup, Projectile};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position (arena coordinates)
    pub pointer: Option<Vec2>,
    /// Fire presses
    pub fire: u32,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;
    state.clock += dt.max(0.0) as f64;

    for kind in state.player.powerups.expire(state.clock) {
        log::debug!("{} expired", kind.label());
        state.events.push(GameEvent::PowerupExpired(kind));
    }

    if let Some(pointer) = input.pointer {
        state.player.target = Some(pointer);
    }
    state
        .player
        .update(&state.arena, state.tuning.player_follow_speed);

    for _ in 0..input.fire {
        fire(state);
    }

    update_enemies(state);
    if !state.is_running() {
        return;
    }
    update_projectiles(state);
    update_powerups(state);
    particles::update(&mut state.particles);

    roll_spawns(state);
    particles::enforce_cap(&mut state.particles, state.tuning.max_particles);
}

/// Fire from the player, returning how many projectiles were created
///
/// Shots travel from the player toward the arena centre. Multishot fans
/// three projectiles out around that line.
pub fn fire(state: &mut GameState) -> usize {
    if !state.is_running() {
        return 0;
    }

    let origin = state.player.pos;
    let center = state.arena.center();
    let angle = (origin.y - center.y).atan2(origin.x - center.x);

    let offsets: &[f32] = if state.player.powerups.multishot() {
        &[-MULTISHOT_SPREAD, 0.0, MULTISHOT_SPREAD]
    } else {
        &[0.0]
    };

    for &offset in offsets {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: origin,
            vel: -polar_to_cartesian(PROJECTILE_SPEED, angle + offset),
            radius: PROJECTILE_RADIUS,
        });
    }
    offsets.len()
}

/// Add kill points and level up once per threshold crossed
pub fn add_score(state: &mut GameState, points: u32) {
    state.score += points as u64;

    while state.score >= state.level as u64 * LEVEL_SCORE_STEP {
        state.level += 1;
        state.recompute_difficulty();

        let center = state.arena.center();
        particles::emit(
            &mut state.particles,
            &mut state.rng,
            center,
            LEVEL_UP_PARTICLES,
            state.tuning.colors.level_up,
            Some(format!("LEVEL {}", state.level)),
        );
        state.events.push(GameEvent::LevelUp(state.level));
        log::info!("Level {} reached at {} points", state.level, state.score);
    }
}

/// Move enemies, resolve player contact, drop escapees
fn update_enemies(state: &mut GameState) {
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;

        let enemy = &mut state.enemies[i];
        enemy.pos += enemy.vel;
        let (pos, radius) = (enemy.pos, enemy.radius);

        if circles_overlap(state.player.pos, state.player.radius, pos, radius) {
            let enemy = state.enemies.remove(i);
            particles::emit(
                &mut state.particles,
                &mut state.rng,
                enemy.pos,
                enemy.size as usize,
                enemy.color,
                None,
            );

            if state.player.powerups.shield {
                state.player.powerups.shield = false;
                state.events.push(GameEvent::ShieldAbsorbed);
                continue;
            }

            state.lives = state.lives.saturating_sub(1);
            state.events.push(GameEvent::PlayerHit { lives: state.lives });
            if state.lives == 0 {
                game_over(state);
                return;
            }
            continue;
        }

        if outside_bounds(pos, &state.arena, ENEMY_ESCAPE_MARGIN) {
            let enemy = state.enemies.remove(i);
            state.events.push(GameEvent::EnemyEscaped { id: enemy.id });
        }
    }
}

/// Move projectiles, resolve hits, drop strays
fn update_projectiles(state: &mut GameState) {
    let mut i = state.projectiles.len();
    while i > 0 {
        i -= 1;

        let projectile = &mut state.projectiles[i];
        projectile.pos += projectile.vel;
        let (pos, radius) = (projectile.pos, projectile.radius);

        let target = first_overlap(
            pos,
            radius,
            state.enemies.iter().map(|e| (e.pos, e.radius)),
        );
        if let Some(j) = target {
            state.projectiles.remove(i);
            particles::emit(
                &mut state.particles,
                &mut state.rng,
                pos,
                radius as usize,
                state.tuning.colors.projectile,
                None,
            );
            damage_enemy(state, j);
            continue;
        }

        if outside_bounds(pos, &state.arena, PROJECTILE_ESCAPE_MARGIN) {
            state.projectiles.remove(i);
        }
    }
}

/// One point of damage to enemy `index`; kills it at zero health
fn damage_enemy(state: &mut GameState, index: usize) {
    let enemy = &mut state.enemies[index];
    enemy.health = enemy.health.saturating_sub(1);
    if enemy.health > 0 {
        return;
    }

    let enemy = state.enemies.remove(index);
    let points = score_for_size(enemy.size);
    state.events.push(GameEvent::EnemyKilled {
        id: enemy.id,
        size: enemy.size,
        points,
    });
    add_score(state, points);

    if state.rng.random_bool(state.tuning.powerup_drop_chance) {
        spawn_powerup(state, Some(enemy.pos));
    }

    particles::emit(
        &mut state.particles,
        &mut state.rng,
        enemy.pos,
        enemy.size as usize * 2,
        enemy.color,
        None,
    );
}

/// Collect powerups touching the player
fn update_powerups(state: &mut GameState) {
    let mut i = state.powerups.len();
    while i > 0 {
        i -= 1;

        let powerup = &state.powerups[i];
        if circles_overlap(
            state.player.pos,
            state.player.radius,
            powerup.pos,
            powerup.radius,
        ) {
            let powerup = state.powerups.remove(i);
            collect_powerup(state, powerup);
        }
    }
}

fn collect_powerup(state: &mut GameState, powerup: Powerup) {
    state.player.powerups.apply(powerup.kind, state.clock);

    let color = state.tuning.colors.powerup;
    let label_pos = state.player.pos - Vec2::new(0.0, POWERUP_LABEL_LIFT);
    particles::emit(
        &mut state.particles,
        &mut state.rng,
        label_pos,
        1,
        color,
        Some(powerup.kind.label().to_string()),
    );
    particles::emit(
        &mut state.particles,
        &mut state.rng,
        powerup.pos,
        (powerup.radius * 2.0) as usize,
        color,
        None,
    );

    log::debug!("Collected {}", powerup.kind.label());
    state.events.push(GameEvent::PowerupCollected(powerup.kind));
}

/// Freeze the session; the host persists the score
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    if state.score > state.high_score {
        state.high_score = state.score;
    }
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {} at level {} after {} ticks",
        state.score,
        state.level,
        state.time_ticks
    );
}
