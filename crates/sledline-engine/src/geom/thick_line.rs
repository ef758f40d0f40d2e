use crate::coords::Vec2;

/// Oriented rectangle around the segment `p1 → p2`.
///
/// Corners are `[p1 - n, p1 + n, p2 + n, p2 - n]` where `n` is the left-hand
/// normal of the segment scaled to `thickness / 2`. A zero-length segment has
/// no direction and yields four copies of `p1`.
pub fn thick_line(p1: Vec2, p2: Vec2, thickness: f32) -> [Vec2; 4] {
    let Some(dir) = (p2 - p1).try_normalize() else {
        return [p1; 4];
    };
    let n = dir.perp() * (thickness * 0.5);
    [p1 - n, p1 + n, p2 + n, p2 - n]
}

/// Splits quad corners into the triangles `(c0, c1, c2)` and `(c0, c2, c3)`.
#[inline]
pub fn quad_triangles(corners: [Vec2; 4]) -> [Vec2; 6] {
    let [c0, c1, c2, c3] = corners;
    [c0, c1, c2, c0, c2, c3]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn horizontal_reference_corners() {
        let c = thick_line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0);
        assert_eq!(
            c,
            [
                Vec2::new(0.0, -1.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(10.0, 1.0),
                Vec2::new(10.0, -1.0),
            ]
        );
    }

    #[test]
    fn degenerate_segment_collapses_to_p1() {
        let p = Vec2::new(3.5, -7.0);
        assert_eq!(thick_line(p, p, 4.0), [p; 4]);
    }

    #[test]
    fn corners_form_rectangle_of_requested_size() {
        let cases = [
            (Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), 2.0),
            (Vec2::new(-5.0, 2.0), Vec2::new(-5.0, -8.0), 0.5),
            (Vec2::new(1.0, 1.0), Vec2::new(-6.0, 9.0), 7.0),
        ];
        for (p1, p2, t) in cases {
            let c = thick_line(p1, p2, t);
            let len = p1.distance(p2);

            // Width edges and length edges.
            assert!((c[0].distance(c[1]) - t).abs() < 1e-4);
            assert!((c[3].distance(c[2]) - t).abs() < 1e-4);
            assert!((c[1].distance(c[2]) - len).abs() < 1e-4);
            assert!((c[0].distance(c[3]) - len).abs() < 1e-4);

            // Long axis parallel to the segment, short axis perpendicular.
            let axis = p2 - p1;
            let long = c[2] - c[1];
            let short = c[1] - c[0];
            assert!((long.x * axis.y - long.y * axis.x).abs() < 1e-3);
            assert!(short.dot(axis).abs() < 1e-3);

            // Centered on the segment.
            assert!(close((c[0] + c[1]) * 0.5, p1));
            assert!(close((c[2] + c[3]) * 0.5, p2));

            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(c[i], c[j]);
                }
            }
        }
    }

    #[test]
    fn quad_triangles_share_the_diagonal() {
        let c = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];
        assert_eq!(quad_triangles(c), [c[0], c[1], c[2], c[0], c[2], c[3]]);
    }
}
