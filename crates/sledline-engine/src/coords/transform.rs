use super::Vec2;

/// World-to-screen mapping: pan followed by uniform zoom.
///
/// `screen = (world + translation) * zoom`
///
/// The camera owns the values; this type is a plain copyable snapshot so every
/// assembler call sees the same mapping for the whole frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    /// Uniform scale factor. Expected `> 0`.
    pub zoom: f32,
    /// Pan offset in world units, applied before zoom.
    pub translation: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[inline]
    pub const fn new(zoom: f32, translation: Vec2) -> Self {
        Self { zoom, translation }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self { zoom: 1.0, translation: Vec2::zero() }
    }

    #[inline]
    pub fn to_screen(self, world: Vec2) -> Vec2 {
        (world + self.translation) * self.zoom
    }

    /// Inverse of [`to_screen`](Self::to_screen). Only meaningful for `zoom != 0`.
    #[inline]
    pub fn to_world(self, screen: Vec2) -> Vec2 {
        screen / self.zoom - self.translation
    }

    /// Scales a world-space length (line thickness, radius) to screen pixels.
    #[inline]
    pub fn scale_len(self, world_len: f32) -> f32 {
        world_len * self.zoom
    }

    /// World-space position of the screen's top-left corner.
    #[inline]
    pub fn screen_origin(self) -> Vec2 {
        -self.translation
    }
}
