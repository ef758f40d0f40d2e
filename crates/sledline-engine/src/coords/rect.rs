use super::Vec2;

/// Axis-aligned rectangle (origin + size).
///
/// Sprite quads use it in rider-model units, relative to the sprite's anchor,
/// so `origin` is frequently negative.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    /// Corners in winding order: top-left, top-right, bottom-right, bottom-left.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        let (min, max) = (self.min(), self.max());
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_wind_from_top_left() {
        let c = Rect::new(-1.0, -2.0, 4.0, 3.0).corners();
        assert_eq!(c[0], Vec2::new(-1.0, -2.0));
        assert_eq!(c[1], Vec2::new(3.0, -2.0));
        assert_eq!(c[2], Vec2::new(3.0, 1.0));
        assert_eq!(c[3], Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn max_is_origin_plus_size() {
        let r = Rect::new(-12.0, 4.5, 20.0, 3.0);
        assert_eq!(r.min(), Vec2::new(-12.0, 4.5));
        assert_eq!(r.max(), Vec2::new(8.0, 7.5));
    }
}
