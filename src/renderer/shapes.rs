//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Segment count for a circle of the given radius (small circles stay cheap)
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 0.8) as u32).clamp(8, 48)
}

/// Point on a circle around `center`
#[inline]
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + crate::polar_to_cartesian(radius, theta)
}

/// Append vertices for a filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let a = on_circle(center, radius, theta1);
        let b = on_circle(center, radius, theta2);

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(a.x, a.y, color));
        out.push(Vertex::new(b.x, b.y, color));
    }
}

/// Append vertices for a ring (hollow circle)
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    out.reserve((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        let inner1 = on_circle(center, inner_radius, theta1);
        let outer1 = on_circle(center, outer_radius, theta1);
        let inner2 = on_circle(center, inner_radius, theta2);
        let outer2 = on_circle(center, outer_radius, theta2);

        // Two triangles per segment
        out.push(Vertex::new(inner1.x, inner1.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(inner2.x, inner2.y, color));

        out.push(Vertex::new(inner2.x, inner2.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(outer2.x, outer2.y, color));
    }
}

/// Append vertices for an axis-aligned rectangle with top-left `min`
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;

    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertices_on_radius() {
        let mut out = Vec::new();
        let center = Vec2::new(100.0, 50.0);
        circle(&mut out, center, 10.0, WHITE, 12);
        assert_eq!(out.len(), 36);

        for tri in out.chunks(3) {
            assert_eq!(tri[0].position, [100.0, 50.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(center);
                assert!((d - 10.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_ring_stays_between_radii() {
        let mut out = Vec::new();
        ring(&mut out, Vec2::ZERO, 40.0, 43.0, WHITE, 16);
        assert_eq!(out.len(), 96);
        for v in &out {
            let d = Vec2::from(v.position).length();
            assert!(d > 39.99 && d < 43.01);
        }
    }

    #[test]
    fn test_rect_skips_empty() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::ZERO, Vec2::new(0.0, 3.0), WHITE);
        assert!(out.is_empty());

        rect(&mut out, Vec2::new(5.0, 5.0), Vec2::new(10.0, 3.0), WHITE);
        assert_eq!(out.len(), 6);
        assert!(out.iter().any(|v| v.position == [15.0, 8.0]));
    }

    #[test]
    fn test_segments_clamped() {
        assert_eq!(segments_for(2.0), 8);
        assert_eq!(segments_for(30.0), 24);
        assert_eq!(segments_for(500.0), 48);
    }
}
