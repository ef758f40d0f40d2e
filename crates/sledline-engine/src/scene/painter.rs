use crate::batch::VertexBatch;
use crate::coords::{Transform, Vec2};
use crate::geom::{push_rounded_line, Knobs};
use crate::paint::Color;
use crate::render::{BlendMode, Capability, Primitive, RenderBackend, StateScope};

use super::FrameCtx;

/// Draw entry point for the scene assemblers.
///
/// Borrows the backend and a caller-owned [`VertexBatch`] for the duration of
/// a frame. Every draw refills the batch from empty and clears it again after
/// submission, so the batch never carries vertices from one draw into the next.
///
/// Assembler-specific operations live next to their geometry
/// (`scene::track`, `scene::rider`, `scene::scarf`, `scene::grid`).
pub struct Painter<'a, B: RenderBackend + ?Sized> {
    backend: &'a mut B,
    batch: &'a mut VertexBatch,
    frame: FrameCtx<'a>,
}

impl<'a, B: RenderBackend + ?Sized> Painter<'a, B> {
    pub fn new(backend: &'a mut B, batch: &'a mut VertexBatch, frame: FrameCtx<'a>) -> Self {
        batch.clear();
        Self { backend, batch, frame }
    }

    #[inline]
    pub fn frame(&self) -> FrameCtx<'a> {
        self.frame
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.frame.transform
    }

    #[inline]
    pub fn backend(&mut self) -> &mut B {
        &mut *self.backend
    }

    /// Capsule from `p1` to `p2` (world space), drawn immediately.
    ///
    /// Blending (premultiplied) and texturing are enabled for the draw and
    /// released afterwards.
    pub fn render_rounded_line(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        color: Color,
        thickness: f32,
        knobs: Knobs,
    ) {
        self.batch.clear();
        push_rounded_line(
            self.batch.vertices_mut(),
            self.frame.transform,
            p1,
            p2,
            color,
            thickness,
            knobs,
        );
        self.flush_rounded();
    }

    /// Fills the batch with `fill` and submits it, scoping `blend` and texturing
    /// around the draw.
    pub(crate) fn draw_with(
        &mut self,
        primitive: Primitive,
        blend: Option<BlendMode>,
        textured: bool,
        fill: impl FnOnce(&mut VertexBatch, FrameCtx<'a>),
    ) {
        self.batch.clear();
        fill(&mut *self.batch, self.frame);
        submit_scoped(&mut *self.backend, &mut *self.batch, primitive, blend, textured);
    }

    /// Submits rounded-line geometry already in the batch.
    pub(crate) fn flush_rounded(&mut self) {
        submit_scoped(
            &mut *self.backend,
            &mut *self.batch,
            Primitive::Triangles,
            Some(BlendMode::Premultiplied),
            true,
        );
    }

    pub(crate) fn batch_mut(&mut self) -> &mut VertexBatch {
        &mut *self.batch
    }
}

fn submit_scoped<B: RenderBackend + ?Sized>(
    backend: &mut B,
    batch: &mut VertexBatch,
    primitive: Primitive,
    blend: Option<BlendMode>,
    textured: bool,
) {
    match blend {
        Some(mode) => {
            let mut scope = StateScope::enable(backend, Capability::Blend);
            scope.set_blend(mode);
            submit_textured(&mut *scope, batch, primitive, textured);
        }
        None => submit_textured(backend, batch, primitive, textured),
    }
}

fn submit_textured<B: RenderBackend + ?Sized>(
    backend: &mut B,
    batch: &mut VertexBatch,
    primitive: Primitive,
    textured: bool,
) {
    if textured {
        let mut scope = StateScope::enable(backend, Capability::Texture2D);
        submit(&mut *scope, batch, primitive);
    } else {
        submit(backend, batch, primitive);
    }
}

/// Draws `batch` and clears it.
///
/// Empty batches are skipped. A batch whose length does not form whole
/// primitives is dropped with a warning instead of reaching the backend.
pub fn submit<B: RenderBackend + ?Sized>(
    backend: &mut B,
    batch: &mut VertexBatch,
    primitive: Primitive,
) {
    if batch.is_empty() {
        return;
    }
    if !primitive.accepts(batch.len()) {
        log::warn!(
            "dropping batch of {} vertices: not a whole number of {:?}",
            batch.len(),
            primitive
        );
        batch.clear();
        return;
    }
    log::trace!("submit: {:?} x{} texture={:?}", primitive, batch.len(), batch.texture());
    backend.draw(batch, primitive);
    batch.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::geom::rounded_line_vertex_count;
    use crate::render::{BackendCall, RecordingBackend};
    use crate::scene::TextureTable;

    fn frame(textures: &TextureTable) -> FrameCtx<'_> {
        FrameCtx::new(Transform::identity(), Viewport::new(800.0, 600.0), textures)
    }

    // ── submit ────────────────────────────────────────────────────────────

    #[test]
    fn submit_skips_empty_batches() {
        let mut backend = RecordingBackend::new();
        let mut batch = VertexBatch::new();
        submit(&mut backend, &mut batch, Primitive::Triangles);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn submit_drops_partial_primitives() {
        let mut backend = RecordingBackend::new();
        let mut batch = VertexBatch::new();
        batch.push_line(Vec2::zero(), Vec2::new(1.0, 1.0), Color::RED);

        submit(&mut backend, &mut batch, Primitive::Triangles);
        assert_eq!(backend.draw_count(), 0);
        assert!(batch.is_empty());
    }

    #[test]
    fn submit_clears_after_draw() {
        let mut backend = RecordingBackend::new();
        let mut batch = VertexBatch::new();
        batch.push_line(Vec2::zero(), Vec2::new(1.0, 1.0), Color::RED);

        submit(&mut backend, &mut batch, Primitive::Lines);
        assert_eq!(backend.draw_count(), 1);
        assert!(batch.is_empty());
    }

    // ── render_rounded_line ───────────────────────────────────────────────

    #[test]
    fn rounded_line_scopes_blend_and_texture() {
        let textures = TextureTable::default();
        let mut backend = RecordingBackend::new();
        let mut batch = VertexBatch::new();
        {
            let mut painter = Painter::new(&mut backend, &mut batch, frame(&textures));
            painter.render_rounded_line(
                Vec2::zero(),
                Vec2::new(10.0, 0.0),
                Color::BLACK,
                2.0,
                Knobs::White,
            );
        }

        let calls = backend.calls();
        assert_eq!(calls[0], BackendCall::Enable(Capability::Blend));
        assert_eq!(calls[1], BackendCall::SetBlend(BlendMode::Premultiplied));
        assert_eq!(calls[2], BackendCall::Enable(Capability::Texture2D));
        assert!(matches!(calls[3], BackendCall::Draw(_)));
        assert_eq!(calls[4], BackendCall::Disable(Capability::Texture2D));
        assert_eq!(calls[5], BackendCall::Disable(Capability::Blend));
        assert_eq!(backend.enabled().count(), 0);

        let draw = backend.draws().next().unwrap();
        assert_eq!(draw.vertices.len(), rounded_line_vertex_count(true));
        assert_eq!(draw.blend, Some(BlendMode::Premultiplied));
        assert!(draw.textured);
    }

    #[test]
    fn stale_vertices_never_leak_into_the_next_draw() {
        let textures = TextureTable::default();
        let mut backend = RecordingBackend::new();
        let mut batch = VertexBatch::new();
        batch.push_line(Vec2::zero(), Vec2::zero(), Color::RED);
        {
            let mut painter = Painter::new(&mut backend, &mut batch, frame(&textures));
            painter.render_rounded_line(Vec2::zero(), Vec2::new(1.0, 0.0), Color::RED, 1.0, Knobs::None);
            painter.render_rounded_line(Vec2::zero(), Vec2::new(1.0, 0.0), Color::RED, 1.0, Knobs::None);
        }
        let counts: Vec<_> = backend.draws().map(|d| d.vertices.len()).collect();
        assert_eq!(counts, vec![rounded_line_vertex_count(false); 2]);
    }
}
