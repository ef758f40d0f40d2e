use crate::coords::{Transform, Viewport};

use super::TextureTable;

/// Everything an assembler needs to know about the current frame.
///
/// Passed explicitly into every draw; there is no ambient camera or asset state.
#[derive(Debug, Copy, Clone)]
pub struct FrameCtx<'a> {
    pub transform: Transform,
    pub viewport: Viewport,
    pub textures: &'a TextureTable,
}

impl<'a> FrameCtx<'a> {
    #[inline]
    pub fn new(transform: Transform, viewport: Viewport, textures: &'a TextureTable) -> Self {
        Self { transform, viewport, textures }
    }
}
