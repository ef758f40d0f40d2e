use crate::coords::Vec2;
use crate::paint::Color;

use super::{TextureHandle, Vertex};

/// Ordered, reusable vertex stream plus the texture it is drawn with.
///
/// Performance characteristics:
/// - `push*()` is amortized O(1)
/// - [`clear`](Self::clear) keeps the allocation, so a batch owned by the caller
///   stops allocating once warmed
///
/// Single-owner: one batch belongs to one painter and is not shared across
/// threads, even though the type itself is `Send + Sync`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    texture: TextureHandle,
}

impl VertexBatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(vertices: usize) -> Self {
        Self { vertices: Vec::with_capacity(vertices), texture: TextureHandle::NONE }
    }

    /// Drops all vertices and resets the texture. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.texture = TextureHandle::NONE;
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Backing vertex list, for generators that append to a `Vec<Vertex>`.
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut Vec<Vertex> {
        &mut self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    #[inline]
    pub fn set_texture(&mut self, texture: TextureHandle) {
        self.texture = texture;
    }

    /// True when the stream can be drawn as a triangle list.
    #[inline]
    pub fn is_triangle_list(&self) -> bool {
        self.vertices.len() % 3 == 0
    }

    #[inline]
    pub fn push(&mut self, v: Vertex) {
        self.vertices.push(v);
    }

    #[inline]
    pub fn extend_from_slice(&mut self, vertices: &[Vertex]) {
        self.vertices.extend_from_slice(vertices);
    }

    #[inline]
    pub fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.vertices.extend_from_slice(&[
            Vertex::new(a, color),
            Vertex::new(b, color),
            Vertex::new(c, color),
        ]);
    }

    /// Appends a quad as triangles `(c0, c1, c2)` and `(c0, c2, c3)`.
    #[inline]
    pub fn push_quad(&mut self, corners: [Vec2; 4], color: Color) {
        let [c0, c1, c2, c3] = corners;
        self.push_triangle(c0, c1, c2, color);
        self.push_triangle(c0, c2, c3, color);
    }

    #[inline]
    pub fn push_line(&mut self, a: Vec2, b: Vec2, color: Color) {
        self.vertices.extend_from_slice(&[Vertex::new(a, color), Vertex::new(b, color)]);
    }
}

impl Extend<Vertex> for VertexBatch {
    fn extend<I: IntoIterator<Item = Vertex>>(&mut self, iter: I) {
        self.vertices.extend(iter);
    }
}
