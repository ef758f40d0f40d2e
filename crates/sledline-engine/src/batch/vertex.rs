use crate::coords::Vec2;
use crate::paint::Color;

/// Opaque texture identifier issued by the asset manager.
///
/// `TextureHandle::NONE` (0) means untextured.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const NONE: TextureHandle = TextureHandle(0);

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// A single colored, optionally textured, screen-space vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
    pub color: Color,
    pub uv: Option<Vec2>,
}

impl Vertex {
    #[inline]
    pub const fn new(pos: Vec2, color: Color) -> Self {
        Self { pos, color, uv: None }
    }

    #[inline]
    pub const fn textured(pos: Vec2, color: Color, uv: Vec2) -> Self {
        Self { pos, color, uv: Some(uv) }
    }
}
