use super::{Transform, Vec2};

/// Render target size in screen pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Visible extent in world units under `transform`.
    #[inline]
    pub fn world_size(self, transform: Transform) -> Vec2 {
        Vec2::new(self.width / transform.zoom, self.height / transform.zoom)
    }
}
