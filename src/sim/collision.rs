//! Collision tests
//!
//! Every entity is a circle. Two circles collide iff the distance between
//! their centres is strictly less than the sum of their radii; touching
//! circles do not collide.

use glam::Vec2;

use super::state::Arena;

/// Circle-circle overlap (strict)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Whether a point lies more than `margin` outside the arena on any side
#[inline]
pub fn outside_bounds(pos: Vec2, arena: &Arena, margin: f32) -> bool {
    pos.x < -margin
        || pos.x > arena.width + margin
        || pos.y < -margin
        || pos.y > arena.height + margin
}

/// Index of the first circle in `targets` overlapping the given one
pub fn first_overlap<I>(pos: Vec2, radius: f32, targets: I) -> Option<usize>
where
    I: IntoIterator<Item = (Vec2, f32)>,
{
    targets
        .into_iter()
        .position(|(p, r)| circles_overlap(pos, radius, p, r))
}
