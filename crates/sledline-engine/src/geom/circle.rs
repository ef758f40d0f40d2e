use core::f32::consts::TAU;

use crate::batch::Vertex;
use crate::coords::Vec2;
use crate::paint::Color;

/// Number of fan segments per circle.
///
/// Caps and knobs are at most a few dozen pixels wide at practical zoom levels;
/// 16 segments keep them visually round there.
pub const CIRCLE_SEGMENTS: usize = 16;

/// Appends a filled circle as `CIRCLE_SEGMENTS` triangles fanning out from `center`.
///
/// Each triangle is `(center, boundary[i], boundary[i + 1])`, wrapping around.
/// A zero radius yields zero-area triangles rather than nothing, so callers can
/// rely on the vertex count.
pub fn circle_fan(center: Vec2, radius: f32, color: Color, out: &mut Vec<Vertex>) {
    let radius = radius.max(0.0);
    out.reserve(CIRCLE_SEGMENTS * 3);

    let boundary = |i: usize| {
        let angle = TAU * (i % CIRCLE_SEGMENTS) as f32 / CIRCLE_SEGMENTS as f32;
        let (sin, cos) = angle.sin_cos();
        center + Vec2::new(cos, sin) * radius
    };

    let mut prev = boundary(0);
    for i in 1..=CIRCLE_SEGMENTS {
        let next = boundary(i);
        out.push(Vertex::new(center, color));
        out.push(Vertex::new(prev, color));
        out.push(Vertex::new(next, color));
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan(center: Vec2, radius: f32) -> Vec<Vertex> {
        let mut out = Vec::new();
        circle_fan(center, radius, Color::WHITE, &mut out);
        out
    }

    #[test]
    fn emits_one_triangle_per_segment() {
        assert_eq!(fan(Vec2::zero(), 3.0).len(), CIRCLE_SEGMENTS * 3);
    }

    #[test]
    fn every_triangle_starts_at_center() {
        let c = Vec2::new(4.0, -2.0);
        for tri in fan(c, 5.0).chunks(3) {
            assert_eq!(tri[0].pos, c);
        }
    }

    #[test]
    fn boundary_points_lie_on_radius() {
        let c = Vec2::new(10.0, 10.0);
        for tri in fan(c, 2.5).chunks(3) {
            assert!((tri[1].pos.distance(c) - 2.5).abs() < 1e-4);
            assert!((tri[2].pos.distance(c) - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn boundary_is_rotationally_symmetric() {
        let c = Vec2::new(1.0, 2.0);
        let tris = fan(c, 6.0);
        let step = TAU / CIRCLE_SEGMENTS as f32;
        let starts: Vec<Vec2> = tris.chunks(3).map(|t| t[1].pos).collect();

        for (i, p) in starts.iter().enumerate() {
            let rotated = c + (*p - c).rotated(step);
            let expected = starts[(i + 1) % starts.len()];
            assert!(rotated.distance(expected) < 1e-3, "segment {i}");
        }
        // Consecutive triangles share an edge point.
        for pair in tris.chunks(3).collect::<Vec<_>>().windows(2) {
            assert!(pair[0][2].pos.distance(pair[1][1].pos) < 1e-5);
        }
    }

    #[test]
    fn zero_radius_is_degenerate_but_complete() {
        let c = Vec2::new(-3.0, 8.0);
        let tris = fan(c, 0.0);
        assert_eq!(tris.len(), CIRCLE_SEGMENTS * 3);
        assert!(tris.iter().all(|v| v.pos == c));
    }
}
