//! Particle effects
//!
//! Purely visual; nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Emit a burst of `count` particles at `pos`
///
/// A text label produces exactly one labelled particle; `count` is ignored.
pub fn emit<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    count: usize,
    color: u32,
    text: Option<String>,
) {
    let count = if text.is_some() { 1 } else { count };
    particles.reserve(count);

    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        particles.push(Particle {
            pos,
            vel: polar_to_cartesian(speed, angle),
            radius: rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS),
            color,
            text: text.clone(),
            life: rng.random_range(PARTICLE_MIN_LIFE..PARTICLE_MAX_LIFE),
        });
    }
}

/// Advance particles one tick and drop dead ones
pub fn update(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.pos += p.vel;
        // Labels float; dots fall
        if p.text.is_none() {
            p.vel.y += PARTICLE_GRAVITY;
        }
        p.life -= 1.0;
        p.life > 0.0
    });
}

/// Drop the oldest particles beyond `max`
pub fn enforce_cap(particles: &mut Vec<Particle>, max: usize) {
    if particles.len() > max {
        let excess = particles.len() - max;
        particles.drain(..excess);
    }
}
