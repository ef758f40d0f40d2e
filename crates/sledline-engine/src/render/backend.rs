use crate::batch::VertexBatch;

/// Toggleable backend state, mirroring fixed-function enable/disable switches.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Alpha blending with the current [`BlendMode`]. Disabled means source replaces destination.
    Blend,
    /// Sample the batch texture. Disabled means the batch is drawn untextured.
    Texture2D,
}

/// Blend equation used while [`Capability::Blend`] is enabled.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BlendMode {
    /// `src * src.a + dst * (1 - src.a)`; vertex colors are straight alpha.
    #[default]
    Alpha,
    /// `src + dst * (1 - src.a)`; backends premultiply vertex colors before output.
    Premultiplied,
}

/// How a batch's vertex stream is assembled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Triangles,
    Lines,
}

impl Primitive {
    #[inline]
    pub const fn vertices_per_primitive(self) -> usize {
        match self {
            Primitive::Triangles => 3,
            Primitive::Lines => 2,
        }
    }

    /// True when `len` vertices form whole primitives.
    #[inline]
    pub const fn accepts(self, len: usize) -> bool {
        len % self.vertices_per_primitive() == 0
    }
}

/// Rasterization backend consumed by the assemblers.
///
/// Implementations must draw batches in submission order; there is no depth
/// test, so later draws paint over earlier ones.
pub trait RenderBackend {
    fn enable(&mut self, cap: Capability);

    fn disable(&mut self, cap: Capability);

    fn set_blend(&mut self, mode: BlendMode);

    /// Draws `batch` with the current state. The batch length always satisfies
    /// [`Primitive::accepts`] when called through the scene painter.
    fn draw(&mut self, batch: &VertexBatch, primitive: Primitive);
}
